//! Canvas engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `widgets`: Auto-placement, resize-to and corrective re-layout
//! - `input`: Move/resize gestures and drag registry integration
//! - `widget_ref`: Payload type of canvas layout items

mod input;
mod widgets;
mod widget_ref;

use serde_json::Value;
use crate::config::CanvasConfig;
use crate::dimensions::{ComputedDimensions, GridTracker};
use crate::dnd::DragRegistry;
use crate::error::CanvasResult;
use crate::grid::{cell_anchor, GridDimensions, LayoutItem, Position};
use crate::input::GestureRouter;
use crate::math::{ContainerBox, Vec2};

pub use widget_ref::WidgetRef;
pub(crate) use widget_ref::{find_item, without_item};

/// Canvas engine for one widgets canvas
///
/// The engine never owns the authoritative layout. Every operation takes the
/// store's current layout snapshot and answers with proposed changes:
/// - Grid tracker (responsive dimensions with change detection)
/// - Gesture router (move/resize state machine)
/// - Drag registry handle (shared with folders and other drop targets)
pub struct CanvasEngine {
    /// Canvas configuration
    pub(crate) config: CanvasConfig,
    /// Responsive grid dimensions
    pub(crate) tracker: GridTracker,
    /// Move/resize gestures
    pub(crate) gestures: GestureRouter,
    /// Shared drag registry
    pub(crate) registry: DragRegistry<Value>,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl CanvasEngine {
    /// Create an engine with its own drag registry
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_registry(config, DragRegistry::new())
    }

    /// Create an engine sharing an existing drag registry
    pub fn with_registry(config: CanvasConfig, registry: DragRegistry<Value>) -> Self {
        let tracker = GridTracker::new(config.desired_cell_size, config.min_cell_size);
        Self {
            config,
            tracker,
            gestures: GestureRouter::new(),
            registry,
        }
    }

    /// Canvas configuration
    #[inline]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Drag registry handle
    #[inline]
    pub fn registry(&self) -> &DragRegistry<Value> {
        &self.registry
    }

    /// Gesture router
    #[inline]
    pub fn gestures(&self) -> &GestureRouter {
        &self.gestures
    }

    /// Latest published dimensions
    #[inline]
    pub fn dimensions(&self) -> &ComputedDimensions {
        self.tracker.current()
    }

    /// Latest published grid
    #[inline]
    pub fn grid(&self) -> &GridDimensions {
        self.tracker.grid()
    }

    /// Container was resized
    ///
    /// Returns true if new dimensions were published.
    pub fn resize(&mut self, container: ContainerBox, layout: &[LayoutItem<WidgetRef>]) -> bool {
        self.tracker.observe_container(container, layout)
    }

    /// Change cell size preferences
    ///
    /// Returns true if new dimensions were published.
    pub fn set_cell_sizes(
        &mut self,
        desired_cell_size: f32,
        min_cell_size: f32,
        layout: &[LayoutItem<WidgetRef>],
    ) -> CanvasResult<bool> {
        let config = CanvasConfig {
            desired_cell_size,
            min_cell_size,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(self.tracker.set_cell_sizes(desired_cell_size, min_cell_size, layout))
    }

    /// Store published a new layout
    ///
    /// Returns true if new dimensions were published.
    pub fn sync_layout(&mut self, layout: &[LayoutItem<WidgetRef>]) -> bool {
        self.tracker.recompute(layout)
    }

    /// Cell under a client pixel
    ///
    /// Pixels left of or above the grid map to column/row zero.
    pub fn pixel_to_cell(&self, pixel: Vec2) -> Position {
        let dims = self.dimensions();
        let local = pixel - dims.origin;
        let to_cell = |v: f32| {
            let cell = (v / dims.grid.cell_size).floor();
            if cell.is_finite() && cell > 0.0 {
                cell as u32
            } else {
                0
            }
        };
        Position::new(to_cell(local.x), to_cell(local.y))
    }

    /// Client pixel of a cell's top-left corner
    pub fn cell_to_pixel(&self, cell: Position) -> Vec2 {
        let dims = self.dimensions();
        dims.origin + cell_anchor(&dims.grid, cell)
    }
}
