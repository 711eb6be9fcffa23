//! Grid occupancy, placement and snapping
//!
//! Every function here is pure: it reads a layout snapshot and grid
//! dimensions supplied by the caller and never keeps state between calls.

mod types;
mod occupancy;
mod placement;
mod snap;

pub use types::{GridDimensions, ItemSize, LayoutItem, Position};
pub use occupancy::{build_occupancy, check_disjoint, find_overlapping_items, will_overlap, OccupancyMap};
pub use placement::{can_place, find_free_position};
pub use snap::{cell_anchor, rank_snap_points, SnapCandidate};
