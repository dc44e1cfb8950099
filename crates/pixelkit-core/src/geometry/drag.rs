//! Interactive drag state machines for the crop box and the watermark anchor.
//!
//! Both controllers follow the same shape: `pointer_down` captures a snapshot
//! of the pointer position and the geometry at gesture start, `pointer_move`
//! recomputes the geometry from that snapshot plus the total delta, and
//! `pointer_up` returns to idle. Recomputing from the snapshot (instead of
//! accumulating per-event deltas) keeps long gestures free of rounding drift.
//!
//! Controllers only produce geometry descriptors; they never touch a surface.
//! The descriptors are applied to pixels at commit time, by the compositor.

use serde::{Deserialize, Serialize};

use super::rect::{
    apply_drag_delta, apply_watermark_drag, AnchorPoint, AspectConstraint, DragMode,
    NormalizedRect,
};

/// A pointer position in device pixels, relative to the reference container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Rendered size of the reference container, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    /// A zero-sized container makes the device-to-percent conversion divide
    /// by zero, so such events are ignored entirely.
    fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[derive(Debug, Clone, Copy)]
enum CropDragState {
    Idle,
    Dragging {
        mode: DragMode,
        start_pointer: PointerPosition,
        start_rect: NormalizedRect,
    },
}

/// State machine turning pointer events into crop-box geometry.
#[derive(Debug)]
pub struct CropDragController {
    state: CropDragState,
    rect: NormalizedRect,
    aspect: Option<AspectConstraint>,
}

impl Default for CropDragController {
    fn default() -> Self {
        Self::new()
    }
}

impl CropDragController {
    /// Create a controller with the default centered crop box and no lock.
    pub fn new() -> Self {
        Self {
            state: CropDragState::Idle,
            rect: NormalizedRect::default(),
            aspect: None,
        }
    }

    /// Current crop box.
    pub fn rect(&self) -> NormalizedRect {
        self.rect
    }

    /// Replace the crop box outside of a gesture (e.g. after an aspect-ratio
    /// preset reset). Ignored mid-gesture.
    pub fn set_rect(&mut self, rect: NormalizedRect) {
        if !self.is_dragging() {
            self.rect = rect;
        }
    }

    /// Set or clear the aspect-ratio lock applied during corner drags.
    pub fn set_aspect(&mut self, aspect: Option<AspectConstraint>) {
        self.aspect = aspect;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, CropDragState::Dragging { .. })
    }

    /// Begin a gesture: snapshot the pointer and the current crop box.
    pub fn pointer_down(&mut self, pos: PointerPosition, mode: DragMode) {
        self.state = CropDragState::Dragging {
            mode,
            start_pointer: pos,
            start_rect: self.rect,
        };
    }

    /// Process a pointer move. Returns the recomputed crop box, or `None` if
    /// no gesture is active or the container has no usable size.
    pub fn pointer_move(
        &mut self,
        pos: PointerPosition,
        container: ContainerSize,
    ) -> Option<NormalizedRect> {
        let CropDragState::Dragging {
            mode,
            start_pointer,
            start_rect,
        } = self.state
        else {
            return None;
        };
        if !container.is_usable() {
            return None;
        }

        let dx = (pos.x - start_pointer.x) / container.width * 100.0;
        let dy = (pos.y - start_pointer.y) / container.height * 100.0;

        self.rect = apply_drag_delta(start_rect, dx, dy, mode, self.aspect);
        Some(self.rect)
    }

    /// End the gesture and discard the start snapshot.
    pub fn pointer_up(&mut self) {
        self.state = CropDragState::Idle;
    }
}

#[derive(Debug, Clone, Copy)]
enum WatermarkDragState {
    Idle,
    Dragging {
        start_pointer: PointerPosition,
        start_anchor: AnchorPoint,
    },
}

/// State machine turning pointer events into a watermark anchor position.
#[derive(Debug)]
pub struct WatermarkDragController {
    state: WatermarkDragState,
    anchor: AnchorPoint,
}

impl Default for WatermarkDragController {
    fn default() -> Self {
        Self::new()
    }
}

impl WatermarkDragController {
    /// Create a controller with the anchor at the surface center.
    pub fn new() -> Self {
        Self {
            state: WatermarkDragState::Idle,
            anchor: AnchorPoint::default(),
        }
    }

    /// Current anchor point.
    pub fn anchor(&self) -> AnchorPoint {
        self.anchor
    }

    /// Replace the anchor outside of a gesture. Ignored mid-gesture.
    pub fn set_anchor(&mut self, anchor: AnchorPoint) {
        if !self.is_dragging() {
            self.anchor = anchor;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, WatermarkDragState::Dragging { .. })
    }

    /// Begin a gesture: snapshot the pointer and the current anchor.
    pub fn pointer_down(&mut self, pos: PointerPosition) {
        self.state = WatermarkDragState::Dragging {
            start_pointer: pos,
            start_anchor: self.anchor,
        };
    }

    /// Process a pointer move. Returns the recomputed anchor, or `None` if no
    /// gesture is active or the container has no usable size.
    pub fn pointer_move(
        &mut self,
        pos: PointerPosition,
        container: ContainerSize,
    ) -> Option<AnchorPoint> {
        let WatermarkDragState::Dragging {
            start_pointer,
            start_anchor,
        } = self.state
        else {
            return None;
        };
        if !container.is_usable() {
            return None;
        }

        let dx = (pos.x - start_pointer.x) / container.width * 100.0;
        let dy = (pos.y - start_pointer.y) / container.height * 100.0;

        self.anchor = apply_watermark_drag(start_anchor, dx, dy);
        Some(self.anchor)
    }

    /// End the gesture and discard the start snapshot.
    pub fn pointer_up(&mut self) {
        self.state = WatermarkDragState::Idle;
    }
}
