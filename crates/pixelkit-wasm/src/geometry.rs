//! WASM bindings for the crop and watermark geometry model.
//!
//! The drag controllers are exposed as stateful objects the front end feeds
//! pointer events into; rectangles and anchors cross the boundary as plain
//! `{x, y, ...}` objects via serde.

use pixelkit_core::geometry::{
    resolve_crop_rect as core_resolve, AnchorPoint, AspectConstraint, ContainerSize,
    CropDragController, DragMode, NormalizedRect, PointerPosition, WatermarkDragController,
};
use wasm_bindgen::prelude::*;

/// Convert a u8 drag mode value to the core DragMode enum.
///
/// Values:
/// - 0 = Move (translate the whole box)
/// - 1 = NorthWest corner
/// - 2 = NorthEast corner
/// - 3 = SouthWest corner
/// - 4 = SouthEast corner
///
/// Any other value defaults to Move.
pub(crate) fn drag_mode_from_u8(value: u8) -> DragMode {
    match value {
        1 => DragMode::NorthWest,
        2 => DragMode::NorthEast,
        3 => DragMode::SouthWest,
        4 => DragMode::SouthEast,
        _ => DragMode::Move, // Default
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the initial crop rectangle for an image.
///
/// Returns a `{x, y, width, height}` object in percent of the image
/// dimensions. Without an aspect constraint this is the default centered 80%
/// box; with one, it is the largest centered box of that pixel-space aspect
/// fitting inside the 80% box.
///
/// # Arguments
///
/// * `aspect_ratio` - Desired width/height ratio of the crop, or undefined
///   for a free crop. Invalid values (0, negative, non-finite) fall back to
///   the default box.
/// * `image_aspect` - Natural width/height ratio of the image
#[wasm_bindgen]
pub fn resolve_crop_rect(aspect_ratio: Option<f64>, image_aspect: f64) -> Result<JsValue, JsValue> {
    to_js(&core_resolve(aspect_ratio, image_aspect))
}

/// Interactive crop-box drag controller.
///
/// Feed pointer events in device pixels; geometry comes back in percent of
/// the reference container. Deltas are computed against the gesture-start
/// snapshot, so long gestures do not drift.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const drag = new CropDrag();
/// drag.set_aspect(16 / 9, img.width / img.height);
///
/// el.onpointerdown = (e) => drag.pointer_down(e.clientX, e.clientY, mode);
/// el.onpointermove = (e) => {
///   const rect = drag.pointer_move(e.clientX, e.clientY, el.clientWidth, el.clientHeight);
///   if (rect) render(rect);
/// };
/// el.onpointerup = () => drag.pointer_up();
/// ```
#[wasm_bindgen]
pub struct CropDrag {
    inner: CropDragController,
}

impl Default for CropDrag {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CropDrag {
    /// Create a controller with the default centered crop box and no lock.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CropDrag {
        CropDrag {
            inner: CropDragController::new(),
        }
    }

    /// Current crop box as a `{x, y, width, height}` object in percent.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.rect())
    }

    /// Replace the crop box outside of a gesture. Ignored mid-gesture.
    pub fn set_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.set_rect(NormalizedRect::new(x, y, width, height));
    }

    /// Lock corner drags to a pixel-space aspect ratio.
    ///
    /// # Arguments
    ///
    /// * `target` - Desired width/height ratio of the crop
    /// * `image_aspect` - Natural width/height ratio of the image
    pub fn set_aspect(&mut self, target: f64, image_aspect: f64) {
        self.inner
            .set_aspect(Some(AspectConstraint::new(target, image_aspect)));
    }

    /// Remove the aspect-ratio lock.
    pub fn clear_aspect(&mut self) {
        self.inner.set_aspect(None);
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Begin a gesture at a pointer position (device pixels).
    ///
    /// `mode`: 0 = move, 1-4 = north-west, north-east, south-west,
    /// south-east corner.
    pub fn pointer_down(&mut self, x: f64, y: f64, mode: u8) {
        self.inner
            .pointer_down(PointerPosition { x, y }, drag_mode_from_u8(mode));
    }

    /// Process a pointer move against the rendered container size.
    ///
    /// Returns the recomputed crop box, or undefined when no gesture is
    /// active or the container has no usable size.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<JsValue, JsValue> {
        let container = ContainerSize {
            width: container_width,
            height: container_height,
        };
        match self.inner.pointer_move(PointerPosition { x, y }, container) {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// End the gesture.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }
}

/// Interactive watermark anchor drag controller.
///
/// Same event model as [`CropDrag`], but the geometry is a single
/// `{x, y}` anchor point in percent of the target surface.
#[wasm_bindgen]
pub struct WatermarkDrag {
    inner: WatermarkDragController,
}

impl Default for WatermarkDrag {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WatermarkDrag {
    /// Create a controller with the anchor at the surface center.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WatermarkDrag {
        WatermarkDrag {
            inner: WatermarkDragController::new(),
        }
    }

    /// Current anchor as a `{x, y}` object in percent.
    pub fn anchor(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.anchor())
    }

    /// Replace the anchor outside of a gesture. Ignored mid-gesture.
    pub fn set_anchor(&mut self, x: f64, y: f64) {
        self.inner.set_anchor(AnchorPoint { x, y });
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Begin a gesture at a pointer position (device pixels).
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(PointerPosition { x, y });
    }

    /// Process a pointer move against the rendered container size.
    ///
    /// Returns the recomputed anchor, or undefined when no gesture is active
    /// or the container has no usable size.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        container_width: f64,
        container_height: f64,
    ) -> Result<JsValue, JsValue> {
        let container = ContainerSize {
            width: container_width,
            height: container_height,
        };
        match self.inner.pointer_move(PointerPosition { x, y }, container) {
            Some(anchor) => to_js(&anchor),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// End the gesture.
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }
}


/// WASM-specific tests that require JsValue. Use `wasm-pack test` to run.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_resolve_crop_rect_default() {
        let rect = resolve_crop_rect(None, 1.5).unwrap();
        let rect: NormalizedRect = serde_wasm_bindgen::from_value(rect).unwrap();
        assert_eq!(rect, NormalizedRect::default());
    }

    #[wasm_bindgen_test]
    fn test_crop_drag_move_cycle() {
        let mut drag = CropDrag::new();
        drag.pointer_down(100.0, 100.0, 0);
        let rect = drag.pointer_move(180.0, 100.0, 800.0, 400.0).unwrap();
        let rect: NormalizedRect = serde_wasm_bindgen::from_value(rect).unwrap();
        assert_eq!(rect.x, 20.0);
        drag.pointer_up();
    }

    #[wasm_bindgen_test]
    fn test_pointer_move_idle_returns_undefined() {
        let mut drag = WatermarkDrag::new();
        let result = drag.pointer_move(10.0, 10.0, 800.0, 400.0).unwrap();
        assert!(result.is_undefined());
    }
}
