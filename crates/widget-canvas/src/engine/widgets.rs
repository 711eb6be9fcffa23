//! Widget placement and corrective re-layout

use tracing::{debug, warn};
use crate::grid::{
    can_place, check_disjoint, find_free_position, find_overlapping_items, GridDimensions,
    ItemSize, LayoutItem, Position,
};
use crate::persistence::LayoutChange;
use super::{find_item, without_item, CanvasEngine, WidgetRef};

impl CanvasEngine {
    /// Propose a position for a new widget
    ///
    /// First-fit inside the current extent; when nothing fits the widget goes
    /// into a new column to the right of everything else.
    pub fn place_new_item(
        &self,
        layout: &[LayoutItem<WidgetRef>],
        id: impl Into<String>,
        size: ItemSize,
    ) -> LayoutChange {
        let grid = self.layout_grid(layout);
        let position = find_free_position(&grid, layout, size)
            .unwrap_or_else(|| Position::new(append_column(&grid, layout), 0));

        LayoutChange::Insert {
            id: id.into(),
            position,
            size,
        }
    }

    /// Propose resizing a widget in place
    ///
    /// Returns `None` if the widget is unknown or the new size would overflow
    /// the grid or cover another widget.
    pub fn resize_to(
        &self,
        layout: &[LayoutItem<WidgetRef>],
        id: &str,
        size: ItemSize,
    ) -> Option<LayoutChange> {
        let item = find_item(layout, id)?;
        let rest = without_item(layout, id);
        let grid = self.layout_grid(layout);

        if !can_place(&grid, &rest, size, item.position(), false) {
            return None;
        }
        Some(LayoutChange::Resize {
            id: id.to_string(),
            size,
        })
    }

    /// Propose moves that make an overlapping layout valid again
    ///
    /// The first claimant of every cell stays put. Each item found overlapping
    /// is re-placed first-fit around the kept items, or appended in a new
    /// column when nothing fits. A valid layout yields no changes.
    pub fn repair_layout(&self, layout: &[LayoutItem<WidgetRef>]) -> Vec<LayoutChange> {
        let err = match check_disjoint(layout) {
            Ok(()) => return Vec::new(),
            Err(err) => err,
        };
        let grid = self.layout_grid(layout);

        let overlapping = find_overlapping_items(layout);
        warn!(%err, count = overlapping.len(), "repairing overlapping layout");

        let mut kept: Vec<LayoutItem<WidgetRef>> = layout
            .iter()
            .filter(|item| !overlapping.iter().any(|o| std::ptr::eq(*o, *item)))
            .cloned()
            .collect();

        let mut changes = Vec::with_capacity(overlapping.len());
        for item in overlapping {
            let position = find_free_position(&grid, &kept, item.size())
                .unwrap_or_else(|| Position::new(append_column(&grid, &kept), 0));

            debug!(id = %item.payload.id, x = position.x, y = position.y, "re-placed overlapping widget");
            kept.push(item.moved_to(position));
            changes.push(LayoutChange::Move {
                id: item.payload.id.clone(),
                position,
            });
        }

        changes
    }

    /// Current grid, grown to cover `layout` if the store is ahead of us
    pub(crate) fn layout_grid(&self, layout: &[LayoutItem<WidgetRef>]) -> GridDimensions {
        let mut grid = *self.grid();
        grid.columns = grid.columns.max(layout.iter().map(LayoutItem::right).max().unwrap_or(0));
        grid.rows = grid.rows.max(layout.iter().map(LayoutItem::bottom).max().unwrap_or(0));
        grid
    }
}

/// First column right of the grid and of every item
fn append_column<T>(grid: &GridDimensions, layout: &[LayoutItem<T>]) -> u32 {
    layout
        .iter()
        .map(LayoutItem::right)
        .max()
        .unwrap_or(0)
        .max(grid.columns)
}
