//! Grid coordinate and layout types

use serde::{Deserialize, Deserializer, Serialize};

/// Cell coordinates, origin top-left, zero based
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    /// Grid origin
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Create a new position
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Item size in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSize {
    #[serde(deserialize_with = "cell_span")]
    pub width: u32,
    #[serde(deserialize_with = "cell_span")]
    pub height: u32,
}

impl Default for ItemSize {
    fn default() -> Self {
        Self::UNIT
    }
}

impl ItemSize {
    /// Single cell
    pub const UNIT: ItemSize = ItemSize { width: 1, height: 1 };

    /// Create a new size; both dimensions are raised to at least one cell
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Number of cells covered
    #[inline]
    pub fn area(self) -> u32 {
        self.width * self.height
    }
}

/// Stored spans below one cell would hide an item from overlap checks
fn cell_span<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(u32::deserialize(deserializer)?.max(1))
}

/// Grid extent and cell size
///
/// `columns`/`rows` is the effective extent: never smaller than what the
/// viewport provides (`min_columns`/`min_rows`) and grown to cover every
/// placed item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDimensions {
    /// Pixels per cell side
    pub cell_size: f32,
    /// Effective column count
    pub columns: u32,
    /// Effective row count
    pub rows: u32,
    /// Columns that fit the viewport
    pub min_columns: u32,
    /// Rows that fit the viewport
    pub min_rows: u32,
}

impl GridDimensions {
    /// Create dimensions where the effective extent equals the viewport extent
    pub const fn new(cell_size: f32, columns: u32, rows: u32) -> Self {
        Self {
            cell_size,
            columns,
            rows,
            min_columns: columns,
            min_rows: rows,
        }
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Check if a rectangle at `position` stays inside the grid
    #[inline]
    pub fn contains(&self, position: Position, size: ItemSize) -> bool {
        position.x as u64 + size.width as u64 <= self.columns as u64
            && position.y as u64 + size.height as u64 <= self.rows as u64
    }
}

/// A placed rectangle with caller-defined metadata
///
/// The grid engine reads only the rectangle. Identity lives in `payload`,
/// which serializes flattened next to the rectangle fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem<T> {
    pub x: u32,
    pub y: u32,
    #[serde(deserialize_with = "cell_span")]
    pub width: u32,
    #[serde(deserialize_with = "cell_span")]
    pub height: u32,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> LayoutItem<T> {
    /// Create a new layout item
    pub fn new(position: Position, size: ItemSize, payload: T) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            payload,
        }
    }

    /// Top-left cell
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Size in cells
    #[inline]
    pub fn size(&self) -> ItemSize {
        ItemSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Column just past the right edge
    #[inline]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Row just past the bottom edge
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Copy of this item moved to another position
    pub fn moved_to(&self, position: Position) -> Self
    where
        T: Clone,
    {
        Self::new(position, self.size(), self.payload.clone())
    }
}
