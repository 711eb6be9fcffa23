//! Placement validation and first-fit search

use super::{build_occupancy, will_overlap, GridDimensions, ItemSize, LayoutItem, Position};

/// Check whether a rectangle can be placed at `position`
///
/// `layout` is the *rest* of the layout: callers moving or resizing an item
/// leave that item out. Rectangles past the grid extent are rejected unless
/// `allow_out_of_bounds` is set. Existing overlaps in `layout` are tolerated.
pub fn can_place<T>(
    grid: &GridDimensions,
    layout: &[LayoutItem<T>],
    size: ItemSize,
    position: Position,
    allow_out_of_bounds: bool,
) -> bool {
    if !allow_out_of_bounds && !grid.contains(position, size) {
        return false;
    }

    match build_occupancy(grid, layout, true) {
        Ok(occupancy) => !will_overlap(&occupancy, position, size),
        Err(_) => false,
    }
}

/// Find the first free position for a rectangle
///
/// Scans row-major from the top-left corner and returns the first cell where
/// the rectangle fits without overlap or overflow, so the top-most, then
/// left-most candidate always wins. Returns `None` when nothing fits inside
/// the current extent.
pub fn find_free_position<T>(
    grid: &GridDimensions,
    layout: &[LayoutItem<T>],
    size: ItemSize,
) -> Option<Position> {
    let occupancy = build_occupancy(grid, layout, true).ok()?;

    for row in 0..grid.rows {
        for column in 0..grid.columns {
            if occupancy.is_occupied(column, row) {
                continue;
            }
            let candidate = Position::new(column, row);
            if will_overlap(&occupancy, candidate, size) {
                continue;
            }
            if !grid.contains(candidate, size) {
                continue;
            }
            return Some(candidate);
        }
    }

    None
}
