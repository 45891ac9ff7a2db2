//! Scoped DOM listeners
//!
//! A listener lives exactly as long as its guard.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::{js_message, BindError};

/// Registered event listener; dropping it removes the listener
pub struct EventListenerGuard {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListenerGuard {
    pub fn new<F>(target: &web_sys::EventTarget, event: &'static str, f: F) -> Result<Self, BindError>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(f);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| BindError::Listener {
                event,
                message: js_message(&e),
            })?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Listen on the document
    pub fn on_document<F>(event: &'static str, f: F) -> Result<Self, BindError>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(BindError::NoDocument)?;
        Self::new(&document, event, f)
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        if let Err(e) = removed {
            tracing::warn!(event = self.event, error = %js_message(&e), "failed to remove listener");
        }
    }
}
