//! Single-slot drag registry
//!
//! Unrelated UI elements negotiate a drag through one registry handle: the
//! draggable side calls `begin_drag`/`end_drag`, drop targets call
//! `pointer_entered_target`/`pointer_left_target`. Neither side holds a
//! reference to the other.
//!
//! ## Invariants
//!
//! 1. At most one draggable and at most one armed target at any time.
//! 2. A drop callback fires at most once per `end_drag`, and only for a target
//!    armed after the latest `begin_drag` and not disarmed since.
//! 3. Out-of-order events degrade to no-ops; nothing here fails.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use super::{DragDescriptor, DropFilter, DropTarget, DropTargetInfo};

/// The two registry slots
struct Slots<P> {
    draggable: Option<DragDescriptor<P>>,
    armed: Option<DropTarget<P>>,
}

/// Shared handle to a drag registry
///
/// Cloning the handle shares the slots. Create one registry per canvas (or
/// per test) and pass it to every participant.
pub struct DragRegistry<P> {
    slots: Rc<RefCell<Slots<P>>>,
}

impl<P> Clone for DragRegistry<P> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<P> Default for DragRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DragRegistry<P> {
    /// Create an idle registry
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                draggable: None,
                armed: None,
            })),
        }
    }

    /// Check if a drag is active
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.slots.borrow().draggable.is_some()
    }

    /// Check if a drop target is armed
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.slots.borrow().armed.is_some()
    }

    /// Id of the armed drop target
    pub fn armed_id(&self) -> Option<String> {
        self.slots.borrow().armed.as_ref().map(|t| t.info.id.clone())
    }

    /// Id of the active draggable
    pub fn dragging_id(&self) -> Option<String> {
        self.slots.borrow().draggable.as_ref().map(|d| d.id.clone())
    }

    /// Check whether the active draggable passes `filter`
    ///
    /// False when nothing is being dragged.
    pub fn accepts(&self, filter: &DropFilter) -> bool {
        self.slots
            .borrow()
            .draggable
            .as_ref()
            .is_some_and(|d| filter.matches(&d.kind))
    }

    /// Start a drag
    ///
    /// Replaces any active drag and clears a stale armed target.
    pub fn begin_drag(&self, descriptor: DragDescriptor<P>) {
        let mut slots = self.slots.borrow_mut();
        if let Some(previous) = &slots.draggable {
            debug!(previous = %previous.id, next = %descriptor.id, "drag replaced");
        } else {
            debug!(id = %descriptor.id, kind = %descriptor.kind, "drag started");
        }
        slots.draggable = Some(descriptor);
        slots.armed = None;
    }

    /// Pointer entered a drop target
    ///
    /// Arms `target` if a drag is active and its kind passes `filter`,
    /// replacing any armed target. Returns true if the target was armed.
    pub fn pointer_entered_target(&self, target: DropTarget<P>, filter: &DropFilter) -> bool {
        let mut slots = self.slots.borrow_mut();
        let compatible = match &slots.draggable {
            Some(draggable) => filter.matches(&draggable.kind),
            None => return false,
        };
        if !compatible {
            return false;
        }

        debug!(target = %target.info.id, "drop target armed");
        slots.armed = Some(target);
        true
    }

    /// Pointer left a drop target
    ///
    /// Disarms only if `target_id` is the armed target, so a late leave from
    /// a previous target cannot disarm a newer one. Returns true if disarmed.
    pub fn pointer_left_target(&self, target_id: &str) -> bool {
        let mut slots = self.slots.borrow_mut();
        if slots.armed.as_ref().is_some_and(|t| t.info.id == target_id) {
            debug!(target = %target_id, "drop target disarmed");
            slots.armed = None;
            true
        } else {
            false
        }
    }

    /// End a drag
    ///
    /// Fires the armed target's callback with `descriptor` (once, before any
    /// state is cleared), then clears both slots if `descriptor` is still the
    /// active drag. Returns the target that received the drop.
    pub fn end_drag(&self, descriptor: &DragDescriptor<P>) -> Option<DropTargetInfo<P>> {
        // released before the callback so it may use the registry
        let armed = self.slots.borrow_mut().armed.take();

        let dropped = armed.map(|target| {
            debug!(id = %descriptor.id, target = %target.info.id, "dropped");
            (target.on_drop)(descriptor);
            target.info
        });

        self.release(descriptor);
        dropped
    }

    /// Pointer cancel: end a drag without dropping
    pub fn cancel_drag(&self, descriptor: &DragDescriptor<P>) {
        let mut slots = self.slots.borrow_mut();
        if slots.draggable.as_ref().is_some_and(|d| d.id == descriptor.id) {
            debug!(id = %descriptor.id, "drag cancelled");
            slots.draggable = None;
            slots.armed = None;
        }
    }

    /// Clear both slots without firing anything
    pub fn reset(&self) {
        let mut slots = self.slots.borrow_mut();
        slots.draggable = None;
        slots.armed = None;
    }

    fn release(&self, descriptor: &DragDescriptor<P>) {
        let mut slots = self.slots.borrow_mut();
        match &slots.draggable {
            Some(active) if active.id == descriptor.id => {
                slots.draggable = None;
                slots.armed = None;
            }
            Some(active) => {
                debug!(ended = %descriptor.id, active = %active.id, "stale drag end");
            }
            None => {}
        }
    }
}

impl<P: Clone> DragRegistry<P> {
    /// Snapshot of the active draggable
    pub fn current_draggable(&self) -> Option<DragDescriptor<P>> {
        self.slots.borrow().draggable.clone()
    }

    /// Snapshot of the armed target
    pub fn armed_target(&self) -> Option<DropTargetInfo<P>> {
        self.slots.borrow().armed.as_ref().map(|t| t.info.clone())
    }

    /// Descriptor to end or cancel a drag known only by kind and id
    ///
    /// The active draggable (payload included) when it matches, otherwise a
    /// bare descriptor.
    pub fn descriptor_for(&self, kind: &str, id: &str) -> DragDescriptor<P> {
        match self.current_draggable() {
            Some(active) if active.kind == kind && active.id == id => active,
            _ => DragDescriptor::new(kind, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_target(id: &str, hits: &Rc<Cell<u32>>) -> DropTarget<()> {
        let hits = Rc::clone(hits);
        DropTarget::new("folder", id, move |_: &DragDescriptor<()>| hits.set(hits.get() + 1))
    }

    #[test]
    fn test_registry_idle() {
        let registry: DragRegistry<()> = DragRegistry::new();
        assert!(!registry.is_dragging());
        assert!(!registry.is_armed());
        assert!(registry.end_drag(&DragDescriptor::new("widget", "a")).is_none());
    }

    #[test]
    fn test_enter_without_drag_is_noop() {
        let registry = DragRegistry::new();
        let hits = Rc::new(Cell::new(0));

        assert!(!registry.pointer_entered_target(counting_target("t", &hits), &DropFilter::Any));
        assert!(!registry.is_armed());
    }

    #[test]
    fn test_drop_fires_once() {
        let registry = DragRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let drag = DragDescriptor::new("widget", "d");

        registry.begin_drag(drag.clone());
        registry.pointer_entered_target(counting_target("t", &hits), &DropFilter::from("widget"));

        let dropped = registry.end_drag(&drag);
        assert_eq!(dropped.map(|t| t.id), Some("t".to_string()));
        assert_eq!(hits.get(), 1);

        assert!(registry.end_drag(&drag).is_none());
        assert_eq!(hits.get(), 1);
        assert!(!registry.is_dragging());
    }

    #[test]
    fn test_mismatched_filter_keeps_armed_target() {
        let registry = DragRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let drag = DragDescriptor::new("widget", "d");

        registry.begin_drag(drag.clone());
        assert!(registry.pointer_entered_target(counting_target("t1", &hits), &DropFilter::Any));
        assert!(!registry.pointer_entered_target(counting_target("t2", &hits), &DropFilter::from("bookmark")));

        assert_eq!(registry.armed_id().as_deref(), Some("t1"));
    }

    #[test]
    fn test_stale_leave_does_not_disarm() {
        let registry = DragRegistry::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let drag = DragDescriptor::new("widget", "d");

        registry.begin_drag(drag.clone());
        registry.pointer_entered_target(counting_target("t1", &first), &DropFilter::Any);
        registry.pointer_entered_target(counting_target("t2", &second), &DropFilter::Any);
        assert!(!registry.pointer_left_target("t1"));

        registry.end_drag(&drag);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_leave_disarms() {
        let registry = DragRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let drag = DragDescriptor::new("widget", "d");

        registry.begin_drag(drag.clone());
        registry.pointer_entered_target(counting_target("t", &hits), &DropFilter::Any);
        assert!(registry.pointer_left_target("t"));

        assert!(registry.end_drag(&drag).is_none());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_new_drag_replaces_and_disarms() {
        let registry = DragRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let a = DragDescriptor::new("widget", "a");
        let b = DragDescriptor::new("widget", "b");

        registry.begin_drag(a.clone());
        registry.pointer_entered_target(counting_target("t", &hits), &DropFilter::Any);
        registry.begin_drag(b.clone());

        assert_eq!(registry.dragging_id().as_deref(), Some("b"));
        assert!(!registry.is_armed());

        // stale end for `a` leaves `b` active
        assert!(registry.end_drag(&a).is_none());
        assert_eq!(hits.get(), 0);
        assert_eq!(registry.current_draggable(), Some(b));
    }

    #[test]
    fn test_cancel_does_not_drop() {
        let registry = DragRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let drag = DragDescriptor::new("widget", "d");

        registry.begin_drag(drag.clone());
        registry.pointer_entered_target(counting_target("t", &hits), &DropFilter::Any);
        registry.cancel_drag(&drag);

        assert!(!registry.is_dragging());
        assert!(!registry.is_armed());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_callback_may_start_new_drag() {
        let registry: DragRegistry<()> = DragRegistry::new();
        let inner = registry.clone();
        let drag = DragDescriptor::new("widget", "d");

        registry.begin_drag(drag.clone());
        registry.pointer_entered_target(
            DropTarget::new("folder", "t", move |_: &DragDescriptor<()>| {
                inner.begin_drag(DragDescriptor::new("widget", "next"));
            }),
            &DropFilter::Any,
        );

        registry.end_drag(&drag);
        assert_eq!(registry.dragging_id().as_deref(), Some("next"));
    }

    #[test]
    fn test_clones_share_slots() {
        let registry: DragRegistry<()> = DragRegistry::new();
        let other = registry.clone();

        registry.begin_drag(DragDescriptor::new("widget", "d"));
        assert!(other.is_dragging());
        assert!(other.accepts(&DropFilter::from("widget")));
        assert!(!other.accepts(&DropFilter::from("folder")));

        other.reset();
        assert!(!registry.is_dragging());
    }

    #[test]
    fn test_drop_receives_payload() {
        let registry = DragRegistry::new();
        let seen = Rc::new(Cell::new(0u32));
        let sink = Rc::clone(&seen);
        let drag = DragDescriptor::new("widget", "d").with_payload(7u32);

        registry.begin_drag(drag.clone());
        registry.pointer_entered_target(
            DropTarget::new("folder", "t", move |d: &DragDescriptor<u32>| {
                sink.set(d.payload.unwrap_or(0));
            })
            .with_payload(1),
            &DropFilter::Any,
        );

        let dropped = registry.end_drag(&drag);
        assert_eq!(seen.get(), 7);
        assert_eq!(dropped.and_then(|t| t.payload), Some(1));
    }

    #[test]
    fn test_drop_by_id_keeps_begin_payload() {
        let registry = DragRegistry::new();
        let seen = Rc::new(Cell::new(0u32));
        let sink = Rc::clone(&seen);

        registry.begin_drag(DragDescriptor::new("widget", "d").with_payload(7u32));
        registry.pointer_entered_target(
            DropTarget::new("folder", "t", move |d: &DragDescriptor<u32>| {
                sink.set(d.payload.unwrap_or(0));
            }),
            &DropFilter::Any,
        );

        assert_eq!(registry.descriptor_for("widget", "other").payload, None);
        assert_eq!(registry.descriptor_for("site", "d").payload, None);

        let descriptor = registry.descriptor_for("widget", "d");
        assert!(registry.end_drag(&descriptor).is_some());
        assert_eq!(seen.get(), 7);
        assert_eq!(registry.descriptor_for("widget", "d").payload, None);
    }
}
