//! Gesture router state machine

use crate::grid::ItemSize;
use crate::math::Vec2;
use super::GestureState;

/// Router holding at most one widget gesture
#[derive(Debug, Default)]
pub struct GestureRouter {
    gesture: Option<GestureState>,
}

impl GestureRouter {
    /// Create an idle router
    pub fn new() -> Self {
        Self { gesture: None }
    }

    /// Get current gesture
    #[inline]
    pub fn gesture(&self) -> Option<&GestureState> {
        self.gesture.as_ref()
    }

    /// Check if a gesture is active
    #[inline]
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start moving a widget
    pub fn start_move(&mut self, item_id: impl Into<String>, grab_offset: Vec2) {
        self.gesture = Some(GestureState::MoveWidget {
            item_id: item_id.into(),
            grab_offset,
        });
    }

    /// Start resizing a widget
    pub fn start_resize(&mut self, item_id: impl Into<String>, start_size: ItemSize, start_pointer: Vec2) {
        self.gesture = Some(GestureState::ResizeWidget {
            item_id: item_id.into(),
            start_size,
            start_pointer,
        });
    }

    /// End the current gesture, returning it
    pub fn end(&mut self) -> Option<GestureState> {
        self.gesture.take()
    }
}
