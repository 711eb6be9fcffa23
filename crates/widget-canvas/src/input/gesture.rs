//! Gesture state for widget move/resize

use crate::grid::ItemSize;
use crate::math::Vec2;

/// Current widget gesture
#[derive(Clone, Debug, PartialEq)]
pub enum GestureState {
    /// Moving a widget
    MoveWidget {
        /// Widget being moved
        item_id: String,
        /// Offset from the widget's top-left pixel to the cursor
        grab_offset: Vec2,
    },
    /// Resizing a widget from its bottom-right corner
    ResizeWidget {
        /// Widget being resized
        item_id: String,
        /// Widget size at start
        start_size: ItemSize,
        /// Pointer position at start (client pixels)
        start_pointer: Vec2,
    },
}

impl GestureState {
    /// Check if this is a move
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, GestureState::MoveWidget { .. })
    }

    /// Check if this is a resize
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, GestureState::ResizeWidget { .. })
    }

    /// Id of the widget under the gesture
    pub fn item_id(&self) -> &str {
        match self {
            GestureState::MoveWidget { item_id, .. } => item_id,
            GestureState::ResizeWidget { item_id, .. } => item_id,
        }
    }
}
