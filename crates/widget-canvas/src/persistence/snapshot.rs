//! Layout snapshot serialization

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::error::{CanvasError, CanvasResult};
use crate::grid::{check_disjoint, LayoutItem};

/// Snapshot of a layout exchanged with the external store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct LayoutSnapshot<T> {
    /// Version for migration support
    #[serde(default)]
    pub version: u32,
    /// Placed items in insertion order
    #[serde(default = "Vec::new")]
    pub items: Vec<LayoutItem<T>>,
}

impl<T> Default for LayoutSnapshot<T> {
    fn default() -> Self {
        Self {
            version: 0,
            items: Vec::new(),
        }
    }
}

impl<T> LayoutSnapshot<T> {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new snapshot
    pub fn new(items: Vec<LayoutItem<T>>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            items,
        }
    }

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    pub fn migrate(&mut self) {
        // Add migration logic as versions increase
        self.version = Self::CURRENT_VERSION;
    }

    /// Check that no two items share a cell
    pub fn validate(&self) -> CanvasResult<()> {
        check_disjoint(&self.items)?;
        Ok(())
    }
}

impl<T: Serialize> LayoutSnapshot<T> {
    /// Encode as JSON
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string(self).map_err(|e| CanvasError::Snapshot(e.to_string()))
    }
}

impl<T: DeserializeOwned> LayoutSnapshot<T> {
    /// Decode from JSON, migrating older versions
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let mut snapshot: Self =
            serde_json::from_str(json).map_err(|e| CanvasError::Snapshot(e.to_string()))?;
        if snapshot.needs_migration() {
            snapshot.migrate();
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ItemSize, Position};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Meta {
        id: String,
    }

    fn item(x: u32, y: u32, id: &str) -> LayoutItem<Meta> {
        LayoutItem::new(Position::new(x, y), ItemSize::UNIT, Meta { id: id.to_string() })
    }

    #[test]
    fn test_snapshot_creation() {
        let snapshot = LayoutSnapshot::new(vec![item(0, 0, "a")]);
        assert_eq!(snapshot.version, LayoutSnapshot::<Meta>::CURRENT_VERSION);
        assert!(!snapshot.needs_migration());
        assert_eq!(snapshot.items.len(), 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = LayoutSnapshot::new(vec![item(0, 0, "a"), item(1, 0, "b")]);

        let json = snapshot.to_json().unwrap();
        let restored: LayoutSnapshot<Meta> = LayoutSnapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.items[1].payload.id, "b");
    }

    #[test]
    fn test_snapshot_migrates_unversioned() {
        let json = r#"{"items":[{"x":0,"y":0,"width":1,"height":1,"id":"a"}]}"#;
        let restored: LayoutSnapshot<Meta> = LayoutSnapshot::from_json(json).unwrap();

        assert_eq!(restored.version, LayoutSnapshot::<Meta>::CURRENT_VERSION);
        assert_eq!(restored.items[0].payload.id, "a");
    }

    #[test]
    fn test_snapshot_default() {
        let snapshot: LayoutSnapshot<Meta> = Default::default();
        assert_eq!(snapshot.version, 0);
        assert!(snapshot.needs_migration());
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_snapshot_validate() {
        let clean = LayoutSnapshot::new(vec![item(0, 0, "a"), item(1, 0, "b")]);
        assert!(clean.validate().is_ok());

        let corrupt = LayoutSnapshot::new(vec![item(0, 0, "a"), item(0, 0, "b")]);
        assert!(matches!(corrupt.validate(), Err(CanvasError::Overlap(_))));
    }

    #[test]
    fn test_snapshot_validate_huge_import() {
        let mut huge = item(0, 0, "huge");
        huge.width = 100_000;
        huge.height = 100_000;
        let mut far = item(99_999, 99_999, "far");
        far.width = 5;

        let snapshot = LayoutSnapshot::new(vec![huge, far]);
        match snapshot.validate() {
            Err(CanvasError::Overlap(e)) => assert_eq!(e.cell, Position::new(99_999, 99_999)),
            other => panic!("Expected overlap, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_bad_json() {
        let err = LayoutSnapshot::<Meta>::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, CanvasError::Snapshot(_)));
    }
}
