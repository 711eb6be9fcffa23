//! Widget move/resize gestures and drag registry integration

use serde_json::Value;
use tracing::{debug, trace};
use crate::dnd::DragDescriptor;
use crate::grid::{can_place, rank_snap_points, ItemSize, LayoutItem};
use crate::input::{calculate_resize, GestureState};
use crate::math::Vec2;
use crate::persistence::LayoutChange;
use super::{find_item, without_item, CanvasEngine, WidgetRef};

impl CanvasEngine {
    /// Start moving a widget grabbed at a client pixel
    ///
    /// Also begins a registry drag so folders can arm themselves. Returns
    /// false if the widget is not in `layout`.
    pub fn start_move(&mut self, layout: &[LayoutItem<WidgetRef>], id: &str, pointer: Vec2) -> bool {
        let item = match find_item(layout, id) {
            Some(item) => item,
            None => return false,
        };

        let origin = self.cell_to_pixel(item.position());
        self.gestures.start_move(id, pointer - origin);
        self.registry.begin_drag(self.widget_descriptor(item));
        true
    }

    /// Start resizing a widget from its bottom-right corner
    ///
    /// Returns false if the widget is not in `layout`.
    pub fn start_resize(&mut self, layout: &[LayoutItem<WidgetRef>], id: &str, pointer: Vec2) -> bool {
        let size = match find_item(layout, id) {
            Some(item) => item.size(),
            None => return false,
        };

        self.gestures.start_resize(id, size, pointer);
        true
    }

    /// Propose where the moving widget would land
    ///
    /// Ranks cells by distance to the widget's would-be top-left pixel and
    /// returns the nearest legal one. `None` means the drag should revert.
    pub fn propose_move(
        &self,
        layout: &[LayoutItem<WidgetRef>],
        id: &str,
        pointer: Vec2,
    ) -> Option<LayoutChange> {
        let item = find_item(layout, id)?;
        let grab_offset = match self.gestures.gesture() {
            Some(GestureState::MoveWidget { item_id, grab_offset }) if item_id == id => *grab_offset,
            _ => Vec2::ZERO,
        };

        let grid = self.layout_grid(layout);
        let local = pointer - self.dimensions().origin - grab_offset;
        let rest = without_item(layout, id);
        let size = item.size();

        let landing = rank_snap_points(&grid, local)
            .into_iter()
            .find(|candidate| can_place(&grid, &rest, size, candidate.cell, false));

        match landing {
            Some(candidate) => Some(LayoutChange::Move {
                id: id.to_string(),
                position: candidate.cell,
            }),
            None => {
                trace!(%id, "no legal cell for move");
                None
            }
        }
    }

    /// Propose the size of the widget being resized
    ///
    /// Uses the pointer delta since `start_resize`, clamped to the optional
    /// widget constraints. `None` if no resize is active for `id` or the size
    /// does not fit.
    pub fn propose_resize(
        &self,
        layout: &[LayoutItem<WidgetRef>],
        id: &str,
        pointer: Vec2,
        min_size: Option<ItemSize>,
        max_size: Option<ItemSize>,
    ) -> Option<LayoutChange> {
        let (start_size, start_pointer) = match self.gestures.gesture() {
            Some(GestureState::ResizeWidget { item_id, start_size, start_pointer }) if item_id == id => {
                (*start_size, *start_pointer)
            }
            _ => return None,
        };

        let size = calculate_resize(
            start_size,
            pointer - start_pointer,
            self.grid().cell_size,
            min_size,
            max_size,
        );
        self.resize_to(layout, id, size)
    }

    /// Finish moving a widget
    ///
    /// Ends the registry drag. A drop on an armed folder moves the widget into
    /// it; a drop on any other target is left to that target; otherwise the
    /// nearest legal cell is proposed. `None` means revert.
    pub fn finish_move(
        &mut self,
        layout: &[LayoutItem<WidgetRef>],
        id: &str,
        pointer: Vec2,
    ) -> Option<LayoutChange> {
        let descriptor = self.registry.descriptor_for(&self.config.widget_drag_kind, id);
        let dropped = self.registry.end_drag(&descriptor);

        let change = match dropped {
            Some(target) if target.kind == self.config.folder_drop_kind => {
                Some(LayoutChange::MoveToFolder {
                    id: id.to_string(),
                    folder_id: target.id,
                })
            }
            Some(target) => {
                debug!(%id, target = %target.id, "widget dropped on foreign target");
                None
            }
            None => self.propose_move(layout, id, pointer),
        };

        self.end_gesture();
        change
    }

    /// Finish resizing a widget
    pub fn finish_resize(
        &mut self,
        layout: &[LayoutItem<WidgetRef>],
        id: &str,
        pointer: Vec2,
        min_size: Option<ItemSize>,
        max_size: Option<ItemSize>,
    ) -> Option<LayoutChange> {
        let change = self.propose_resize(layout, id, pointer, min_size, max_size);
        self.end_gesture();
        change
    }

    /// Pointer cancel: drop the gesture, no drop fires
    pub fn cancel_gesture(&mut self) {
        if let Some(GestureState::MoveWidget { item_id, .. }) = self.gestures.end() {
            let descriptor = self.registry.descriptor_for(&self.config.widget_drag_kind, &item_id);
            self.registry.cancel_drag(&descriptor);
        }
    }

    /// Forget the current gesture without touching the registry
    pub fn end_gesture(&mut self) {
        self.gestures.end();
    }

    /// Drag descriptor carrying the widget's stored fields as payload
    fn widget_descriptor(&self, item: &LayoutItem<WidgetRef>) -> DragDescriptor<Value> {
        let descriptor = DragDescriptor::new(self.config.widget_drag_kind.clone(), item.payload.id.clone());
        match serde_json::to_value(&item.payload) {
            Ok(payload) => descriptor.with_payload(payload),
            Err(_) => descriptor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use crate::dnd::{DropFilter, DropTarget};
    use crate::grid::Position;
    use crate::math::ContainerBox;

    fn widget(x: u32, y: u32, w: u32, h: u32, id: &str) -> LayoutItem<WidgetRef> {
        LayoutItem::new(Position::new(x, y), ItemSize::new(w, h), WidgetRef::new(id))
    }

    fn engine() -> CanvasEngine {
        let mut engine = CanvasEngine::default();
        // 4 x 3 cells of 180px
        engine.resize(ContainerBox::sized(720.0, 540.0), &[]);
        engine
    }

    #[test]
    fn test_move_snaps_to_nearest_free_cell() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a"), widget(2, 0, 1, 1, "b")];

        // grab "a" at its center, drop over the center of (1, 1)
        assert!(engine.start_move(&layout, "a", Vec2::new(90.0, 90.0)));
        let change = engine.finish_move(&layout, "a", Vec2::new(280.0, 260.0));

        assert_eq!(
            change,
            Some(LayoutChange::Move { id: "a".to_string(), position: Position::new(1, 1) })
        );
        assert!(!engine.registry().is_dragging());
        assert!(!engine.gestures().is_active());
    }

    #[test]
    fn test_move_falls_through_occupied_cells() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a"), widget(2, 0, 1, 1, "b")];

        engine.start_move(&layout, "a", Vec2::new(10.0, 10.0));
        // exactly over "b"
        let change = engine.propose_move(&layout, "a", Vec2::new(370.0, 10.0));

        match change {
            Some(LayoutChange::Move { position, .. }) => assert_ne!(position, Position::new(2, 0)),
            other => panic!("Expected a move, got {:?}", other),
        }
    }

    #[test]
    fn test_move_without_room_reverts() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 4, 3, "full"), widget(0, 0, 4, 3, "twin")];

        engine.start_move(&layout, "twin", Vec2::ZERO);
        assert_eq!(engine.finish_move(&layout, "twin", Vec2::new(200.0, 200.0)), None);
    }

    #[test]
    fn test_move_into_folder() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a")];
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);

        engine.start_move(&layout, "a", Vec2::new(10.0, 10.0));
        engine.registry().pointer_entered_target(
            DropTarget::new("folder", "f1", move |_: &DragDescriptor<Value>| sink.set(sink.get() + 1)),
            &DropFilter::from("widget"),
        );

        let change = engine.finish_move(&layout, "a", Vec2::new(400.0, 400.0));
        assert_eq!(
            change,
            Some(LayoutChange::MoveToFolder { id: "a".to_string(), folder_id: "f1".to_string() })
        );
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_folder_drop_sees_widget_fields() {
        let mut engine = engine();
        let mut note = widget(0, 0, 1, 1, "a");
        note.payload.extra.insert("pluginId".to_string(), Value::from("notes"));
        let layout = vec![note];
        let seen: Rc<std::cell::RefCell<Option<Value>>> = Rc::default();
        let sink = Rc::clone(&seen);

        engine.start_move(&layout, "a", Vec2::ZERO);
        engine.registry().pointer_entered_target(
            DropTarget::new("folder", "f1", move |d: &DragDescriptor<Value>| {
                *sink.borrow_mut() = d.payload.clone();
            }),
            &DropFilter::from("widget"),
        );
        engine.finish_move(&layout, "a", Vec2::ZERO);

        let payload = seen.borrow().clone().unwrap();
        assert_eq!(payload["id"], "a");
        assert_eq!(payload["pluginId"], "notes");
    }

    #[test]
    fn test_drop_on_foreign_target_is_left_to_target() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a")];

        engine.start_move(&layout, "a", Vec2::ZERO);
        engine.registry().pointer_entered_target(
            DropTarget::new("trash", "bin", |_: &DragDescriptor<Value>| {}),
            &DropFilter::Any,
        );

        assert_eq!(engine.finish_move(&layout, "a", Vec2::ZERO), None);
    }

    #[test]
    fn test_cancel_move_fires_nothing() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a")];
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);

        engine.start_move(&layout, "a", Vec2::ZERO);
        engine.registry().pointer_entered_target(
            DropTarget::new("folder", "f1", move |_: &DragDescriptor<Value>| sink.set(sink.get() + 1)),
            &DropFilter::Any,
        );
        engine.cancel_gesture();

        assert_eq!(hits.get(), 0);
        assert!(!engine.registry().is_dragging());
        assert!(!engine.gestures().is_active());
    }

    #[test]
    fn test_resize_gesture() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a"), widget(2, 0, 1, 1, "b")];

        assert!(engine.start_resize(&layout, "a", Vec2::new(180.0, 180.0)));
        assert_eq!(
            engine.propose_resize(&layout, "a", Vec2::new(370.0, 350.0), None, None),
            Some(LayoutChange::Resize { id: "a".to_string(), size: ItemSize::new(2, 2) })
        );
        // three columns would cover "b"
        assert_eq!(engine.propose_resize(&layout, "a", Vec2::new(540.0, 180.0), None, None), None);

        let change = engine.finish_resize(
            &layout,
            "a",
            Vec2::new(900.0, 900.0),
            None,
            Some(ItemSize::new(2, 3)),
        );
        assert_eq!(change, Some(LayoutChange::Resize { id: "a".to_string(), size: ItemSize::new(2, 3) }));
        assert!(!engine.gestures().is_active());
    }

    #[test]
    fn test_resize_requires_matching_gesture() {
        let mut engine = engine();
        let layout = vec![widget(0, 0, 1, 1, "a")];

        assert_eq!(engine.propose_resize(&layout, "a", Vec2::new(400.0, 0.0), None, None), None);
        engine.start_move(&layout, "a", Vec2::ZERO);
        assert_eq!(engine.propose_resize(&layout, "a", Vec2::new(400.0, 0.0), None, None), None);
    }

    #[test]
    fn test_start_unknown_widget() {
        let mut engine = engine();
        assert!(!engine.start_move(&[], "ghost", Vec2::ZERO));
        assert!(!engine.start_resize(&[], "ghost", Vec2::ZERO));
        assert!(!engine.registry().is_dragging());
    }
}
