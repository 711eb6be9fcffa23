//! WASM exports for the widgets canvas
//!
//! This module provides wasm-bindgen exports for the CanvasEngine. Layouts
//! cross the boundary as JSON arrays of flat items (`{x, y, width, height,
//! id, ...}`) and proposals come back as JSON `LayoutChange` values, or
//! `"null"` when the caller should revert.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::CanvasConfig;
use crate::dnd::{DragDescriptor, DropFilter, DropTarget};
use crate::engine::{without_item, CanvasEngine, WidgetRef};
use crate::grid::{self, ItemSize, LayoutItem, Position};
use crate::input::GestureState;
use crate::math::{ContainerBox, Vec2};

/// Canvas controller for WASM - wraps CanvasEngine with JS-friendly API
#[wasm_bindgen]
pub struct CanvasController {
    engine: CanvasEngine,
}

#[wasm_bindgen]
impl CanvasController {
    /// Create a canvas controller from an optional JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<CanvasController, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => CanvasConfig::from_json(&json).map_err(js_error)?,
            None => CanvasConfig::default(),
        };
        Ok(Self {
            engine: CanvasEngine::new(config),
        })
    }

    // =========================================================================
    // Dimensions
    // =========================================================================

    /// Container was resized; returns true if dimensions changed
    #[wasm_bindgen]
    pub fn resize(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        layout_json: &str,
    ) -> Result<bool, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(self.engine.resize(ContainerBox::new(x, y, width, height), &layout))
    }

    /// Change cell size preferences; returns true if dimensions changed
    #[wasm_bindgen]
    pub fn set_cell_sizes(
        &mut self,
        desired_cell_size: f32,
        min_cell_size: f32,
        layout_json: &str,
    ) -> Result<bool, JsValue> {
        let layout = parse_layout(layout_json)?;
        self.engine
            .set_cell_sizes(desired_cell_size, min_cell_size, &layout)
            .map_err(js_error)
    }

    /// Store published a new layout; returns true if dimensions changed
    #[wasm_bindgen]
    pub fn sync_layout(&mut self, layout_json: &str) -> Result<bool, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(self.engine.sync_layout(&layout))
    }

    /// Get current dimensions as JSON
    #[wasm_bindgen]
    pub fn dimensions_json(&self) -> String {
        to_json(self.engine.dimensions())
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// First free position for a new item as JSON (`null` if none)
    #[wasm_bindgen]
    pub fn find_free_position(
        &self,
        layout_json: &str,
        width: u32,
        height: u32,
    ) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        let dims = self.engine.layout_grid(&layout);
        Ok(to_json(&grid::find_free_position(&dims, &layout, ItemSize::new(width, height))))
    }

    /// Check whether item `id` may occupy the given rectangle
    ///
    /// The item itself is ignored, so pass its id when validating a move.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn can_place(
        &self,
        layout_json: &str,
        id: &str,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        allow_out_of_bounds: bool,
    ) -> Result<bool, JsValue> {
        let layout = parse_layout(layout_json)?;
        let dims = self.engine.layout_grid(&layout);
        let rest = without_item(&layout, id);
        Ok(grid::can_place(
            &dims,
            &rest,
            ItemSize::new(width, height),
            Position::new(x, y),
            allow_out_of_bounds,
        ))
    }

    /// Propose an insert for a new widget
    #[wasm_bindgen]
    pub fn place_new_item(
        &self,
        layout_json: &str,
        id: &str,
        width: u32,
        height: u32,
    ) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(to_json(&self.engine.place_new_item(&layout, id, ItemSize::new(width, height))))
    }

    /// Propose moves that fix an overlapping layout (JSON array)
    #[wasm_bindgen]
    pub fn repair_layout(&self, layout_json: &str) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(to_json(&self.engine.repair_layout(&layout)))
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Start moving a widget
    #[wasm_bindgen]
    pub fn start_move(&mut self, layout_json: &str, id: &str, x: f32, y: f32) -> Result<bool, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(self.engine.start_move(&layout, id, Vec2::new(x, y)))
    }

    /// Proposed move for the current pointer
    #[wasm_bindgen]
    pub fn propose_move(&self, layout_json: &str, id: &str, x: f32, y: f32) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(to_json(&self.engine.propose_move(&layout, id, Vec2::new(x, y))))
    }

    /// Finish moving a widget
    #[wasm_bindgen]
    pub fn finish_move(&mut self, layout_json: &str, id: &str, x: f32, y: f32) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(to_json(&self.engine.finish_move(&layout, id, Vec2::new(x, y))))
    }

    /// Start resizing a widget
    #[wasm_bindgen]
    pub fn start_resize(&mut self, layout_json: &str, id: &str, x: f32, y: f32) -> Result<bool, JsValue> {
        let layout = parse_layout(layout_json)?;
        Ok(self.engine.start_resize(&layout, id, Vec2::new(x, y)))
    }

    /// Proposed resize for the current pointer
    ///
    /// `constraints_json` is an optional `{minSize, maxSize}` object.
    #[wasm_bindgen]
    pub fn propose_resize(
        &self,
        layout_json: &str,
        id: &str,
        x: f32,
        y: f32,
        constraints_json: Option<String>,
    ) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        let limits = parse_constraints(constraints_json)?;
        Ok(to_json(&self.engine.propose_resize(
            &layout,
            id,
            Vec2::new(x, y),
            limits.min_size,
            limits.max_size,
        )))
    }

    /// Finish resizing a widget
    #[wasm_bindgen]
    pub fn finish_resize(
        &mut self,
        layout_json: &str,
        id: &str,
        x: f32,
        y: f32,
        constraints_json: Option<String>,
    ) -> Result<String, JsValue> {
        let layout = parse_layout(layout_json)?;
        let limits = parse_constraints(constraints_json)?;
        Ok(to_json(&self.engine.finish_resize(
            &layout,
            id,
            Vec2::new(x, y),
            limits.min_size,
            limits.max_size,
        )))
    }

    /// Pointer cancel during a gesture
    #[wasm_bindgen]
    pub fn cancel_gesture(&mut self) {
        self.engine.cancel_gesture();
    }

    // =========================================================================
    // Drag registry
    // =========================================================================

    /// Start a drag of any kind (folders, pinned sites, ...)
    #[wasm_bindgen]
    pub fn begin_drag(&self, kind: &str, id: &str, payload_json: Option<String>) -> Result<(), JsValue> {
        let descriptor = descriptor(kind, id, payload_json)?;
        self.engine.registry().begin_drag(descriptor);
        Ok(())
    }

    /// Pointer entered a drop target
    ///
    /// `accepts` lists the draggable kinds the target takes (empty = any).
    /// `on_drop` is called with the dropped descriptor as JSON. Returns true
    /// if the target was armed.
    #[wasm_bindgen]
    pub fn pointer_entered(
        &self,
        kind: &str,
        id: &str,
        accepts: Vec<String>,
        on_drop: js_sys::Function,
    ) -> bool {
        let target = DropTarget::new(kind, id, move |dropped: &DragDescriptor<Value>| {
            let this = JsValue::null();
            let arg = JsValue::from_str(&to_json(dropped));
            let _ = on_drop.call1(&this, &arg);
        });
        self.engine
            .registry()
            .pointer_entered_target(target, &DropFilter::from_kinds(accepts))
    }

    /// Pointer left a drop target; returns true if it was disarmed
    #[wasm_bindgen]
    pub fn pointer_left(&self, id: &str) -> bool {
        self.engine.registry().pointer_left_target(id)
    }

    /// End a drag; returns the receiving target as JSON (`null` if none)
    ///
    /// `on_drop` receives the descriptor passed to `begin_drag`, payload
    /// included.
    #[wasm_bindgen]
    pub fn end_drag(&self, kind: &str, id: &str) -> String {
        let registry = self.engine.registry();
        let dropped = registry.end_drag(&registry.descriptor_for(kind, id));
        to_json(&dropped)
    }

    /// End a drag without dropping
    #[wasm_bindgen]
    pub fn cancel_drag(&self, kind: &str, id: &str) {
        self.engine.registry().cancel_drag(&DragDescriptor::new(kind, id));
    }

    /// Check if a drag is active
    #[wasm_bindgen]
    pub fn is_dragging(&self) -> bool {
        self.engine.registry().is_dragging()
    }

    /// Check whether the active drag would arm a target taking `accepts`
    ///
    /// Lets drop targets highlight on hover before arming.
    #[wasm_bindgen]
    pub fn accepts(&self, accepts: Vec<String>) -> bool {
        self.engine.registry().accepts(&DropFilter::from_kinds(accepts))
    }

    /// Check if a widget is being moved
    #[wasm_bindgen]
    pub fn is_moving(&self) -> bool {
        self.engine.gestures().gesture().is_some_and(GestureState::is_move)
    }

    /// Check if a widget is being resized
    #[wasm_bindgen]
    pub fn is_resizing(&self) -> bool {
        self.engine.gestures().gesture().is_some_and(GestureState::is_resize)
    }
}

#[derive(Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResizeConstraints {
    min_size: Option<ItemSize>,
    max_size: Option<ItemSize>,
}

fn parse_layout(json: &str) -> Result<Vec<LayoutItem<WidgetRef>>, JsValue> {
    serde_json::from_str(json).map_err(js_error)
}

fn parse_constraints(json: Option<String>) -> Result<ResizeConstraints, JsValue> {
    match json {
        Some(json) => serde_json::from_str(&json).map_err(js_error),
        None => Ok(ResizeConstraints::default()),
    }
}

fn descriptor(kind: &str, id: &str, payload_json: Option<String>) -> Result<DragDescriptor<Value>, JsValue> {
    let descriptor = DragDescriptor::new(kind, id);
    match payload_json {
        Some(json) => {
            let payload: Value = serde_json::from_str(&json).map_err(js_error)?;
            Ok(descriptor.with_payload(payload))
        }
        None => Ok(descriptor),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
