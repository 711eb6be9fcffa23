//! Drag and drop coordination
//!
//! Provides the single-slot registry through which draggables and drop
//! targets negotiate drops without knowing about each other.

mod descriptor;
mod registry;

pub use descriptor::{DragDescriptor, DropCallback, DropFilter, DropTarget, DropTargetInfo};
pub use registry::DragRegistry;
