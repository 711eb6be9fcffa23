//! Widget Canvas for the new-tab dashboard
//!
//! This crate provides the placement core behind the widgets canvas:
//! - Occupancy maps over a fixed-cell grid (overlap detection)
//! - First-fit placement and move/resize validation
//! - Nearest-cell snapping for free-form dragging
//! - Responsive grid dimensions driven by the container size
//! - A single-slot drag-and-drop registry for unrelated UI elements
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Pixel geometry (`Vec2`, `ContainerBox`) and column width math
//! - [`grid`]: Layout types, occupancy, placement and snapping
//! - [`dimensions`]: Responsive grid dimensions with change detection
//! - [`dnd`]: Drag registry and drop filters
//! - [`input`]: Widget move/resize gesture state machine
//! - [`persistence`]: Layout snapshots and proposed layout changes
//!
//! ## Example
//!
//! ```rust
//! use widget_canvas::{find_free_position, GridDimensions, ItemSize, LayoutItem, Position};
//!
//! let grid = GridDimensions::new(180.0, 3, 2);
//! let layout = vec![LayoutItem::new(Position::new(0, 0), ItemSize::new(1, 1), "clock")];
//!
//! let free = find_free_position(&grid, &layout, ItemSize::new(1, 1));
//! assert_eq!(free, Some(Position::new(1, 0)));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Grid Core**: Grid functions never own a layout, they read a snapshot
//! 2. **Recompute on Read**: Occupancy maps are throwaway values
//! 3. **Injected Registry**: The drag registry is a handle, never global state
//! 4. **Data Out**: Mutations are proposed as plain data for an external store

pub mod math;
pub mod grid;
pub mod dimensions;
pub mod dnd;
pub mod input;
pub mod persistence;

mod config;
mod engine;
mod error;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use math::{calculate_column_width, ContainerBox, PixelSize, Vec2};
pub use grid::{
    build_occupancy, can_place, check_disjoint, find_free_position, find_overlapping_items, rank_snap_points,
    will_overlap, GridDimensions, ItemSize, LayoutItem, OccupancyMap, Position, SnapCandidate,
};
pub use dimensions::{compute_dimensions, ComputedDimensions, GridTracker};
pub use dnd::{DragDescriptor, DragRegistry, DropFilter, DropTarget, DropTargetInfo};
pub use input::{GestureRouter, GestureState};
pub use persistence::{LayoutChange, LayoutSnapshot};

pub use config::CanvasConfig;
pub use engine::{CanvasEngine, WidgetRef};
pub use error::{CanvasError, CanvasResult, OverlapError};

/// Default preferred cell size in pixels
pub use config::DEFAULT_CELL_SIZE;

/// Default minimum cell size in pixels
pub use config::DEFAULT_MIN_CELL_SIZE;
