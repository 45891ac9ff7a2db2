use wasm_bindgen::{JsCast, JsValue};

/// Failures while wiring a list to the DOM
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("SortableJS is not available: {0}")]
    SortableUnavailable(String),
    #[error("invalid sortable options: {0}")]
    Options(String),
    #[error("failed to register {event} listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("no document")]
    NoDocument,
}

/// Best-effort message for a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
