//! Pixel sizes and container boxes

use serde::{Deserialize, Serialize};
use super::Vec2;

/// 2D size in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Observed bounding box of the canvas container
///
/// `x`/`y` is the top-left corner in client pixels, so pointer coordinates can
/// be translated into canvas-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerBox {
    /// Create a new container box
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Container box at the client origin
    #[inline]
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Size of the box
    #[inline]
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}
