//! Backend Events
//!
//! Subscriptions to events pushed by the backend.

use wasm_bindgen::prelude::*;
use serde::Deserialize;
use nestsort::{ReorderItemsCommand, REORDER_ITEMS_EVENT};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen, catch)]
    async fn tauri_listen(event: &str, handler: &js_sys::Function) -> Result<JsValue, JsValue>;
}

/// Envelope Tauri wraps around every event payload
#[derive(Deserialize)]
struct TauriEvent<T> {
    payload: T,
}

/// Active event subscription; dropping it unlistens
pub struct EventSubscription {
    _handler: Closure<dyn FnMut(JsValue)>,
    unlisten: Option<js_sys::Function>,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(unlisten) = &self.unlisten {
            let _ = unlisten.call0(&JsValue::NULL);
        }
    }
}

/// Subscribe to authoritative orders pushed by the backend
pub async fn listen_reorder_items<F>(mut on_command: F) -> Result<EventSubscription, String>
where
    F: FnMut(ReorderItemsCommand) + 'static,
{
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match serde_wasm_bindgen::from_value::<TauriEvent<ReorderItemsCommand>>(event) {
            Ok(event) => on_command(event.payload),
            Err(e) => tracing::warn!(error = %e, "malformed {} event", REORDER_ITEMS_EVENT),
        }
    });
    let unlisten = tauri_listen(REORDER_ITEMS_EVENT, handler.as_ref().unchecked_ref())
        .await
        .map_err(|e| format!("listen {} failed: {:?}", REORDER_ITEMS_EVENT, e))?;
    Ok(EventSubscription {
        _handler: handler,
        unlisten: unlisten.dyn_into::<js_sys::Function>().ok(),
    })
}
