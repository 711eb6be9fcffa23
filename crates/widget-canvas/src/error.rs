//! Error types for the widget canvas
//!
//! Invalid placements are not errors: they come back as `false`/`None`.
//! Errors here signal corrupted input data or bad configuration.

use core::fmt;
use crate::grid::Position;

/// Two layout items claim the same cell
///
/// Raised only by strict occupancy construction. The authoritative layout is
/// corrupted (e.g. after an import) and needs a corrective re-layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapError {
    /// First cell found to be claimed twice
    pub cell: Position,
}

impl fmt::Display for OverlapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout items overlap at cell ({}, {})", self.cell.x, self.cell.y)
    }
}

impl std::error::Error for OverlapError {}

/// Errors that can occur in canvas operations
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasError {
    /// Layout contains overlapping items
    Overlap(OverlapError),

    /// Configuration could not be parsed or is inconsistent
    InvalidConfig(String),

    /// Layout snapshot could not be encoded or decoded
    Snapshot(String),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::Overlap(e) => write!(f, "Invalid layout: {}", e),
            CanvasError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            CanvasError::Snapshot(msg) => write!(f, "Snapshot error: {}", msg),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CanvasError::Overlap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OverlapError> for CanvasError {
    fn from(e: OverlapError) -> Self {
        CanvasError::Overlap(e)
    }
}

/// Result alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_overlap_error_display() {
        let err = OverlapError { cell: Position::new(2, 3) };
        assert_eq!(err.to_string(), "Layout items overlap at cell (2, 3)");
    }

    #[test]
    fn test_canvas_error_from_overlap() {
        let err: CanvasError = OverlapError { cell: Position::new(0, 1) }.into();
        assert!(matches!(err, CanvasError::Overlap(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Invalid layout"));
    }

    #[test]
    fn test_config_error_has_no_source() {
        let err = CanvasError::InvalidConfig("bad".to_string());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Invalid config: bad");
    }
}
