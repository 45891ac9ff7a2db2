//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands and events, organized by domain.

mod events;
mod item;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Readable text for a rejected command
fn rejection(cmd: &str, err: &JsValue) -> String {
    rejection_text(cmd, err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn rejection_text(cmd: &str, message: String) -> String {
    format!("{} failed: {}", cmd, message)
}

// Re-export all public items
pub use events::*;
pub use item::*;
