//! Nearest-cell ranking for free-form dragging
//!
//! Ranking knows nothing about occupancy. Callers walk the ranked list and
//! re-check [`can_place`](super::can_place) until a candidate is legal.

use serde::Serialize;
use crate::math::Vec2;
use super::{GridDimensions, Position};

/// A cell and the pixel anchor (top-left corner) it snaps to
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapCandidate {
    /// Cell coordinates
    pub cell: Position,
    /// Top-left pixel of the cell, relative to the grid origin
    pub anchor: Vec2,
}

/// Pixel anchor of a cell
#[inline]
pub fn cell_anchor(grid: &GridDimensions, cell: Position) -> Vec2 {
    Vec2::new(cell.x as f32 * grid.cell_size, cell.y as f32 * grid.cell_size)
}

/// Rank every cell anchor by distance to `pixel`, nearest first
///
/// Equal distances keep row-major order.
pub fn rank_snap_points(grid: &GridDimensions, pixel: Vec2) -> Vec<SnapCandidate> {
    let mut ranked: Vec<(f32, SnapCandidate)> = Vec::with_capacity(grid.cell_count());

    for row in 0..grid.rows {
        for column in 0..grid.columns {
            let cell = Position::new(column, row);
            let anchor = cell_anchor(grid, cell);
            ranked.push((anchor.distance_squared(pixel), SnapCandidate { cell, anchor }));
        }
    }

    // stable sort keeps row-major order on ties
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}
