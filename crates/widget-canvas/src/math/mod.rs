//! Pixel geometry for the canvas
//!
//! Grid coordinates live in [`crate::grid`]; these types describe the pixel
//! space the grid is laid over.

mod vec2;
mod size;

pub use vec2::Vec2;
pub use size::{ContainerBox, PixelSize};

/// Calculate the cell size for a container width
///
/// Picks the column count closest to `width / desired` and splits the width
/// evenly across it, clamped to `[min, desired]`. A width that yields no
/// columns (zero, negative or NaN) falls back to `desired` verbatim.
pub fn calculate_column_width(container_width: f32, desired: f32, min: f32) -> f32 {
    let columns_guess = (container_width / desired).round();
    if columns_guess.is_nan() || columns_guess <= 0.0 {
        return desired;
    }

    // min wins when the bounds are inverted
    (container_width / columns_guess).floor().min(desired).max(min)
}
