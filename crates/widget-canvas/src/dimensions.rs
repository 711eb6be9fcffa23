//! Responsive grid dimensions
//!
//! The grid follows the container: cells shrink (down to a minimum) so whole
//! columns fill the width, and the extent grows past the viewport whenever
//! placed items reach further.

use serde::Serialize;
use tracing::trace;
use crate::grid::{GridDimensions, LayoutItem};
use crate::math::{calculate_column_width, ContainerBox, PixelSize, Vec2};

/// Grid dimensions plus the pixel frame they were computed for
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedDimensions {
    /// Cell size and extent
    #[serde(flatten)]
    pub grid: GridDimensions,
    /// Top-left pixel of the grid in client coordinates
    pub origin: Vec2,
    /// Pixel size of the effective extent
    pub pixel_extent: PixelSize,
}

/// Compute grid dimensions for a container and layout
///
/// Cells never exceed `desired_cell_size` and never go below `min_cell_size`.
/// The effective extent is the larger of what the container shows and what
/// the layout occupies, so items are never clipped by a shrinking viewport.
pub fn compute_dimensions<T>(
    container: ContainerBox,
    desired_cell_size: f32,
    min_cell_size: f32,
    layout: &[LayoutItem<T>],
) -> ComputedDimensions {
    let cell_size = calculate_column_width(container.width, desired_cell_size, min_cell_size);

    let min_columns = cells_in(container.width, cell_size);
    let min_rows = cells_in(container.height, cell_size);

    let occupied_columns = layout.iter().map(LayoutItem::right).max().unwrap_or(0);
    let occupied_rows = layout.iter().map(LayoutItem::bottom).max().unwrap_or(0);

    let columns = min_columns.max(occupied_columns);
    let rows = min_rows.max(occupied_rows);

    ComputedDimensions {
        grid: GridDimensions {
            cell_size,
            columns,
            rows,
            min_columns,
            min_rows,
        },
        origin: container.origin(),
        pixel_extent: PixelSize::new(columns as f32 * cell_size, rows as f32 * cell_size),
    }
}

/// Whole cells that fit in a pixel length
fn cells_in(length: f32, cell_size: f32) -> u32 {
    let count = (length / cell_size).floor();
    if count.is_finite() && count > 0.0 {
        count as u32
    } else {
        0
    }
}

/// Stateful dimensions observer with change detection
///
/// Holds the latest inputs and republishes dimensions only when a recompute
/// yields different values, since every publish makes consumers rebuild
/// occupancy maps.
#[derive(Clone, Debug)]
pub struct GridTracker {
    container: ContainerBox,
    desired_cell_size: f32,
    min_cell_size: f32,
    current: ComputedDimensions,
}

impl GridTracker {
    /// Create a tracker with the given cell sizes and no container yet
    pub fn new(desired_cell_size: f32, min_cell_size: f32) -> Self {
        let container = ContainerBox::default();
        Self {
            container,
            desired_cell_size,
            min_cell_size,
            current: compute_dimensions::<()>(container, desired_cell_size, min_cell_size, &[]),
        }
    }

    /// Latest published dimensions
    #[inline]
    pub fn current(&self) -> &ComputedDimensions {
        &self.current
    }

    /// Latest published grid
    #[inline]
    pub fn grid(&self) -> &GridDimensions {
        &self.current.grid
    }

    /// Latest observed container
    #[inline]
    pub fn container(&self) -> ContainerBox {
        self.container
    }

    /// Container was resized
    ///
    /// Returns true if new dimensions were published.
    pub fn observe_container<T>(&mut self, container: ContainerBox, layout: &[LayoutItem<T>]) -> bool {
        self.container = container;
        self.recompute(layout)
    }

    /// Cell size preferences changed
    ///
    /// Returns true if new dimensions were published.
    pub fn set_cell_sizes<T>(
        &mut self,
        desired_cell_size: f32,
        min_cell_size: f32,
        layout: &[LayoutItem<T>],
    ) -> bool {
        self.desired_cell_size = desired_cell_size;
        self.min_cell_size = min_cell_size;
        self.recompute(layout)
    }

    /// Recompute against the current inputs and a (possibly new) layout
    ///
    /// Returns true if new dimensions were published.
    pub fn recompute<T>(&mut self, layout: &[LayoutItem<T>]) -> bool {
        let next = compute_dimensions(self.container, self.desired_cell_size, self.min_cell_size, layout);
        if next == self.current {
            return false;
        }

        trace!(
            cell_size = next.grid.cell_size,
            columns = next.grid.columns,
            rows = next.grid.rows,
            "grid dimensions changed"
        );
        self.current = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ItemSize, Position};

    fn item(x: u32, y: u32, w: u32, h: u32) -> LayoutItem<()> {
        LayoutItem::new(Position::new(x, y), ItemSize::new(w, h), ())
    }

    #[test]
    fn test_compute_dimensions_fills_viewport() {
        let dims = compute_dimensions::<()>(ContainerBox::sized(1000.0, 700.0), 180.0, 150.0, &[]);

        assert!((dims.grid.cell_size - 166.0).abs() < 0.001);
        assert_eq!(dims.grid.min_columns, 6);
        assert_eq!(dims.grid.min_rows, 4);
        assert_eq!(dims.grid.columns, 6);
        assert_eq!(dims.grid.rows, 4);
        assert!((dims.pixel_extent.width - 996.0).abs() < 0.001);
    }

    #[test]
    fn test_compute_dimensions_grows_with_layout() {
        let layout = vec![item(7, 0, 2, 1), item(0, 5, 1, 2)];
        let dims = compute_dimensions(ContainerBox::sized(900.0, 540.0), 180.0, 150.0, &layout);

        assert_eq!(dims.grid.min_columns, 5);
        assert_eq!(dims.grid.min_rows, 3);
        assert_eq!(dims.grid.columns, 9);
        assert_eq!(dims.grid.rows, 7);
    }

    #[test]
    fn test_compute_dimensions_degenerate_container() {
        let dims = compute_dimensions::<()>(ContainerBox::sized(0.0, 0.0), 180.0, 150.0, &[]);

        assert!((dims.grid.cell_size - 180.0).abs() < 0.001);
        assert_eq!(dims.grid.columns, 0);
        assert_eq!(dims.grid.rows, 0);
    }

    #[test]
    fn test_compute_dimensions_keeps_origin() {
        let dims = compute_dimensions::<()>(ContainerBox::new(24.0, 80.0, 900.0, 540.0), 180.0, 150.0, &[]);
        assert_eq!(dims.origin, Vec2::new(24.0, 80.0));
    }

    #[test]
    fn test_tracker_publishes_only_on_change() {
        let mut tracker = GridTracker::new(180.0, 150.0);
        let layout: Vec<LayoutItem<()>> = Vec::new();

        assert!(tracker.observe_container(ContainerBox::sized(900.0, 540.0), &layout));
        assert!(!tracker.observe_container(ContainerBox::sized(900.0, 540.0), &layout));
        // 910 / 180 still rounds to 5 columns of 180px
        assert!(!tracker.observe_container(ContainerBox::sized(910.0, 540.0), &layout));
        assert_eq!(tracker.grid().columns, 5);
    }

    #[test]
    fn test_tracker_republishes_on_layout_growth() {
        let mut tracker = GridTracker::new(180.0, 150.0);
        let mut layout = vec![item(0, 0, 1, 1)];
        tracker.observe_container(ContainerBox::sized(900.0, 540.0), &layout);

        assert!(!tracker.recompute(&layout));
        layout.push(item(5, 0, 1, 1));
        assert!(tracker.recompute(&layout));
        assert_eq!(tracker.grid().columns, 6);
    }

    #[test]
    fn test_tracker_republishes_on_cell_size_change() {
        let mut tracker = GridTracker::new(180.0, 150.0);
        let layout: Vec<LayoutItem<()>> = Vec::new();
        tracker.observe_container(ContainerBox::sized(900.0, 540.0), &layout);

        assert!(tracker.set_cell_sizes(90.0, 60.0, &layout));
        assert_eq!(tracker.grid().columns, 10);
    }

    #[test]
    fn test_tracker_republishes_on_origin_move() {
        let mut tracker = GridTracker::new(180.0, 150.0);
        let layout: Vec<LayoutItem<()>> = Vec::new();
        tracker.observe_container(ContainerBox::sized(900.0, 540.0), &layout);

        assert!(tracker.observe_container(ContainerBox::new(10.0, 0.0, 900.0, 540.0), &layout));
    }
}
