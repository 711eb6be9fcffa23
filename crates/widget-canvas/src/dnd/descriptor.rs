//! Drag and drop descriptors

use std::fmt;
use serde::{Deserialize, Serialize};

/// What is currently being dragged
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragDescriptor<P> {
    /// Kind matched against drop filters (e.g. "widget")
    #[serde(rename = "type")]
    pub kind: String,
    /// Identity of the dragged element
    pub id: String,
    /// Caller-defined data
    pub payload: Option<P>,
}

impl<P> DragDescriptor<P> {
    /// Create a descriptor without payload
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            payload: None,
        }
    }

    /// Attach a payload
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Identity of a drop target, returned when a drop lands on it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropTargetInfo<P> {
    /// Target kind (e.g. "folder")
    #[serde(rename = "type")]
    pub kind: String,
    /// Identity of the target element
    pub id: String,
    /// Caller-defined data
    pub payload: Option<P>,
}

/// Callback invoked with the dropped draggable
pub type DropCallback<P> = Box<dyn FnOnce(&DragDescriptor<P>)>;

/// A drop target that can be armed in the registry
pub struct DropTarget<P> {
    /// Target identity
    pub info: DropTargetInfo<P>,
    /// Fires at most once, when a drag ends while this target is armed
    pub on_drop: DropCallback<P>,
}

impl<P> DropTarget<P> {
    /// Create a drop target
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<String>,
        on_drop: impl FnOnce(&DragDescriptor<P>) + 'static,
    ) -> Self {
        Self {
            info: DropTargetInfo {
                kind: kind.into(),
                id: id.into(),
                payload: None,
            },
            on_drop: Box::new(on_drop),
        }
    }

    /// Attach a payload
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.info.payload = Some(payload);
        self
    }

    /// Target id
    #[inline]
    pub fn id(&self) -> &str {
        &self.info.id
    }
}

impl<P: fmt::Debug> fmt::Debug for DropTarget<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropTarget")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Which draggable kinds a drop target accepts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DropFilter {
    /// Any kind
    #[default]
    Any,
    /// Exactly this kind
    Exact(String),
    /// Any of these kinds
    OneOf(Vec<String>),
}

impl DropFilter {
    /// Build a filter from a list of kinds; an empty list accepts anything
    pub fn from_kinds(mut kinds: Vec<String>) -> Self {
        match kinds.len() {
            0 => DropFilter::Any,
            1 => DropFilter::Exact(kinds.remove(0)),
            _ => DropFilter::OneOf(kinds),
        }
    }

    /// Check a draggable kind against the filter
    pub fn matches(&self, kind: &str) -> bool {
        match self {
            DropFilter::Any => true,
            DropFilter::Exact(accepted) => accepted == kind,
            DropFilter::OneOf(accepted) => accepted.iter().any(|a| a == kind),
        }
    }
}

impl From<&str> for DropFilter {
    fn from(kind: &str) -> Self {
        DropFilter::Exact(kind.to_string())
    }
}
