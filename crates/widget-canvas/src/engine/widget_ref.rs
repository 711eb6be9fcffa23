//! Widget payload carried by canvas layout items

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::grid::LayoutItem;

/// Identity of a widget instance on the canvas
///
/// Only `id` is read by the canvas; everything else the store attaches (plugin
/// id, widget id, configuration) is kept verbatim in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetRef {
    /// Widget instance id
    pub id: String,
    /// Opaque store fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WidgetRef {
    /// Create a reference with no extra fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// Find an item by widget id
pub(crate) fn find_item<'a>(layout: &'a [LayoutItem<WidgetRef>], id: &str) -> Option<&'a LayoutItem<WidgetRef>> {
    layout.iter().find(|item| item.payload.id == id)
}

/// Layout without the given widget
pub(crate) fn without_item(layout: &[LayoutItem<WidgetRef>], id: &str) -> Vec<LayoutItem<WidgetRef>> {
    layout.iter().filter(|item| item.payload.id != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ItemSize, Position};

    #[test]
    fn test_widget_ref_keeps_extra_fields() {
        let json = r#"{"x":1,"y":0,"width":2,"height":1,"id":"w1","pluginId":"notes","configuration":{"title":"Todo"}}"#;
        let item: LayoutItem<WidgetRef> = serde_json::from_str(json).unwrap();

        assert_eq!(item.position(), Position::new(1, 0));
        assert_eq!(item.size(), ItemSize::new(2, 1));
        assert_eq!(item.payload.id, "w1");
        assert_eq!(item.payload.extra["pluginId"], "notes");

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["configuration"]["title"], "Todo");
        assert_eq!(back["width"], 2);
    }

    #[test]
    fn test_find_and_exclude() {
        let layout = vec![
            LayoutItem::new(Position::new(0, 0), ItemSize::UNIT, WidgetRef::new("a")),
            LayoutItem::new(Position::new(1, 0), ItemSize::UNIT, WidgetRef::new("b")),
        ];

        assert_eq!(find_item(&layout, "b").map(|i| i.x), Some(1));
        assert!(find_item(&layout, "c").is_none());

        let rest = without_item(&layout, "a");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].payload.id, "b");
    }
}
