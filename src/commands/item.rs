//! Item Commands
//!
//! Frontend bindings for item-related backend commands.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use nestsort::{ReorderEntry, ReorderResult, REORDER_EVENT};
use crate::models::Item;
use super::{invoke, rejection};

#[derive(Serialize)]
struct ReorderArgs<'a> {
    items: &'a [ReorderEntry],
}

pub async fn list_items() -> Result<Vec<Item>, String> {
    let result = invoke("list_items", JsValue::NULL)
        .await
        .map_err(|e| rejection("list_items", &e))?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Send a completed drag to the backend
pub async fn reorder(result: &ReorderResult) -> Result<(), String> {
    // parent_id must arrive as null, not undefined
    let js_args = ReorderArgs { items: &result.items }
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())?;
    invoke(REORDER_EVENT, js_args)
        .await
        .map(|_| ())
        .map_err(|e| rejection(REORDER_EVENT, &e))
}
