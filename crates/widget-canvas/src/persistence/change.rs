//! Layout mutations proposed to the external store

use serde::{Deserialize, Serialize};
use crate::engine::WidgetRef;
use crate::grid::{ItemSize, LayoutItem, Position};

/// A proposed layout mutation
///
/// The canvas never commits changes itself; the store applies accepted
/// changes and republishes the layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutChange {
    /// Place a new item
    Insert {
        id: String,
        position: Position,
        size: ItemSize,
    },
    /// Move an item to another cell
    Move { id: String, position: Position },
    /// Change an item's size in place
    Resize { id: String, size: ItemSize },
    /// Move an item out of this canvas into a folder
    #[serde(rename_all = "camelCase")]
    MoveToFolder { id: String, folder_id: String },
}

impl LayoutChange {
    /// Id of the affected item
    pub fn id(&self) -> &str {
        match self {
            LayoutChange::Insert { id, .. }
            | LayoutChange::Move { id, .. }
            | LayoutChange::Resize { id, .. }
            | LayoutChange::MoveToFolder { id, .. } => id,
        }
    }

    /// Apply the change to a widget layout
    ///
    /// Returns false if the change targets an unknown item or inserts an id
    /// that already exists.
    pub fn apply(&self, layout: &mut Vec<LayoutItem<WidgetRef>>) -> bool {
        let index = layout.iter().position(|item| item.payload.id == self.id());

        match (self, index) {
            (LayoutChange::Insert { id, position, size }, None) => {
                layout.push(LayoutItem::new(*position, *size, WidgetRef::new(id.clone())));
                true
            }
            (LayoutChange::Move { position, .. }, Some(i)) => {
                layout[i].x = position.x;
                layout[i].y = position.y;
                true
            }
            (LayoutChange::Resize { size, .. }, Some(i)) => {
                layout[i].width = size.width;
                layout[i].height = size.height;
                true
            }
            (LayoutChange::MoveToFolder { .. }, Some(i)) => {
                layout.remove(i);
                true
            }
            _ => false,
        }
    }
}
