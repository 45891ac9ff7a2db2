//! SortableJS binding
//!
//! Expects the `Sortable` class on the global object (script tag or bundle).

use serde::Serialize;
use wasm_bindgen::prelude::*;

use nestsort::SortConfig;

use crate::error::{js_message, BindError};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type Sortable;

    #[wasm_bindgen(constructor, catch)]
    fn new(el: &web_sys::HtmlElement, options: &JsValue) -> Result<Sortable, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Sortable);

    /// Reorder items by id, optionally animated
    #[wasm_bindgen(method)]
    pub fn sort(this: &Sortable, order: &js_sys::Array, use_animation: bool);
}

/// Lifecycle callbacks handed to SortableJS
pub struct SortableCallbacks {
    pub on_choose: Closure<dyn FnMut(JsValue)>,
    pub on_unchoose: Closure<dyn FnMut(JsValue)>,
    pub on_start: Closure<dyn FnMut(JsValue)>,
    pub on_end: Closure<dyn FnMut(JsValue)>,
}

/// A live SortableJS instance; destroyed on drop
pub struct SortableInstance {
    js: Sortable,
    _callbacks: SortableCallbacks,
}

impl SortableInstance {
    pub fn create(
        el: &web_sys::HtmlElement,
        config: &SortConfig,
        callbacks: SortableCallbacks,
    ) -> Result<Self, BindError> {
        let options = config
            .sortable_options()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| BindError::Options(e.to_string()))?;

        let hooks: [(&str, &Closure<dyn FnMut(JsValue)>); 4] = [
            ("onChoose", &callbacks.on_choose),
            ("onUnchoose", &callbacks.on_unchoose),
            ("onStart", &callbacks.on_start),
            ("onEnd", &callbacks.on_end),
        ];
        for (name, hook) in hooks {
            js_sys::Reflect::set(&options, &JsValue::from_str(name), hook.as_ref())
                .map_err(|e| BindError::Options(js_message(&e)))?;
        }

        let js = Sortable::new(el, &options)
            .map_err(|e| BindError::SortableUnavailable(js_message(&e)))?;
        Ok(Self {
            js,
            _callbacks: callbacks,
        })
    }

    pub fn js(&self) -> &Sortable {
        &self.js
    }
}

impl Drop for SortableInstance {
    fn drop(&mut self) {
        self.js.destroy();
    }
}

/// The dragged element's DOM id from a SortableJS event
pub(crate) fn event_item_id(evt: &JsValue) -> Option<String> {
    let item = js_sys::Reflect::get(evt, &JsValue::from_str("item")).ok()?;
    item.dyn_into::<web_sys::Element>().ok().map(|el| el.id())
}

pub(crate) fn stop_propagation(evt: &JsValue) {
    if let Some(ev) = evt.dyn_ref::<web_sys::Event>() {
        ev.stop_propagation();
    }
}
