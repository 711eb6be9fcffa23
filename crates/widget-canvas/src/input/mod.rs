//! Widget gesture handling
//!
//! Provides the move/resize gesture state machine and the pointer-to-size
//! math used while resizing.

mod router;
mod gesture;

pub use router::GestureRouter;
pub use gesture::GestureState;

use crate::grid::ItemSize;
use crate::math::Vec2;

/// Calculate the size after dragging the bottom-right corner by `delta` pixels
///
/// Rounds to whole cells, never below one cell, then applies the optional
/// widget size constraints.
pub fn calculate_resize(
    start_size: ItemSize,
    delta: Vec2,
    cell_size: f32,
    min_size: Option<ItemSize>,
    max_size: Option<ItemSize>,
) -> ItemSize {
    if cell_size.is_nan() || cell_size <= 0.0 {
        return start_size;
    }

    let span = |cells: u32, delta: f32| -> u32 {
        let pixels = cells as f32 * cell_size + delta;
        let rounded = (pixels / cell_size).round();
        if rounded.is_finite() && rounded >= 1.0 {
            rounded as u32
        } else {
            1
        }
    };

    let mut width = span(start_size.width, delta.x);
    let mut height = span(start_size.height, delta.y);

    if let Some(min) = min_size {
        width = width.max(min.width);
        height = height.max(min.height);
    }
    if let Some(max) = max_size {
        width = width.min(max.width);
        height = height.min(max.height);
    }

    ItemSize::new(width, height)
}
