//! Occupancy maps derived from a layout
//!
//! An occupancy map is a throwaway value: it is rebuilt from a layout snapshot
//! on every query and never updated in place.

use crate::error::OverlapError;
use super::{GridDimensions, ItemSize, LayoutItem, Position};

/// `rows × columns` boolean matrix, `true` where some item covers the cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMap {
    columns: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl OccupancyMap {
    /// Create an empty map
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cells: vec![false; columns as usize * rows as usize],
        }
    }

    /// Column count
    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Row count
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Check a cell; cells outside the matrix read as free
    #[inline]
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.index(x, y).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.columns && y < self.rows {
            Some(y as usize * self.columns as usize + x as usize)
        } else {
            None
        }
    }

    /// Mark a cell, returning whether it was already marked.
    /// Out-of-bounds cells are ignored.
    fn mark(&mut self, x: u32, y: u32) -> bool {
        match self.index(x, y) {
            Some(i) => std::mem::replace(&mut self.cells[i], true),
            None => false,
        }
    }
}

/// Cells covered by a rectangle inside a `columns × rows` matrix, row-major
///
/// The rectangle is clipped first, so cost is bounded by the matrix.
fn covered_cells(
    position: Position,
    size: ItemSize,
    columns: u32,
    rows: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let right = position.x.saturating_add(size.width).min(columns);
    let bottom = position.y.saturating_add(size.height).min(rows);
    (position.y..bottom).flat_map(move |y| (position.x..right).map(move |x| (x, y)))
}

/// Top-left cell shared by two rectangles, if any
fn shared_origin<T>(a: &LayoutItem<T>, b: &LayoutItem<T>) -> Option<Position> {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    if x < a.right().min(b.right()) && y < a.bottom().min(b.bottom()) {
        Some(Position::new(x, y))
    } else {
        None
    }
}

/// Build the occupancy map of a layout
///
/// Cells beyond the grid extent are silently ignored. Unless `allow_overlay`
/// is set, the first cell claimed twice fails with [`OverlapError`].
pub fn build_occupancy<T>(
    grid: &GridDimensions,
    layout: &[LayoutItem<T>],
    allow_overlay: bool,
) -> Result<OccupancyMap, OverlapError> {
    let mut map = OccupancyMap::new(grid.columns, grid.rows);

    for item in layout {
        for (x, y) in covered_cells(item.position(), item.size(), grid.columns, grid.rows) {
            if map.mark(x, y) && !allow_overlay {
                return Err(OverlapError { cell: Position::new(x, y) });
            }
        }
    }

    Ok(map)
}

/// Collect every item that claims an already claimed cell
///
/// The first claimant of a cell is never reported; each later claimant is
/// reported once, in layout order. Works on rectangles rather than a cell
/// matrix, so corrupt items of any size are cheap to check.
pub fn find_overlapping_items<T>(layout: &[LayoutItem<T>]) -> Vec<&LayoutItem<T>> {
    layout
        .iter()
        .enumerate()
        .filter(|(i, item)| layout[..*i].iter().any(|earlier| shared_origin(earlier, item).is_some()))
        .map(|(_, item)| item)
        .collect()
}

/// Check that no two items of a layout share a cell
///
/// Reports the same cell strict [`build_occupancy`] would over a grid that
/// covers the whole layout: the first claimed-twice cell in layout order,
/// then row-major order.
pub fn check_disjoint<T>(layout: &[LayoutItem<T>]) -> Result<(), OverlapError> {
    for (i, item) in layout.iter().enumerate() {
        let first_shared = layout[..i]
            .iter()
            .filter_map(|earlier| shared_origin(earlier, item))
            .min_by_key(|cell| (cell.y, cell.x));
        if let Some(cell) = first_shared {
            return Err(OverlapError { cell });
        }
    }
    Ok(())
}

/// Check whether a rectangle would cover an occupied cell
///
/// Coordinates outside the map never count as overlapping.
pub fn will_overlap(occupancy: &OccupancyMap, position: Position, size: ItemSize) -> bool {
    covered_cells(position, size, occupancy.columns, occupancy.rows)
        .any(|(x, y)| occupancy.is_occupied(x, y))
}
