//! Persistence boundary
//!
//! Provides layout snapshots and the plain-data mutations the canvas proposes
//! to the external store.

mod change;
mod snapshot;

pub use change::LayoutChange;
pub use snapshot::LayoutSnapshot;
