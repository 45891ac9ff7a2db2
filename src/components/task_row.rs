//! Task Row Component
//!
//! One list element. Its DOM id and parent attribute are what the sortable
//! engine reads, so they must follow the configured conventions.

use leptos::prelude::*;

use crate::models::Item;

#[component]
pub fn TaskRow(
    item: Item,
    dom_id: String,
    /// Current parent, updated in place after a drag
    parent: RwSignal<Option<String>>,
) -> impl IntoView {
    let completed = item.completed;
    let row_class = move || {
        let mut c = String::from("task-row");
        if parent.get().is_some() { c.push_str(" subtask"); }
        if completed { c.push_str(" completed"); }
        c
    };

    view! {
        <div
            id=dom_id
            class=row_class
            data-parent-id=move || parent.get().unwrap_or_default()
        >
            <span class="drag-handle">"⠿"</span>
            <span class="item-text">{item.text}</span>
        </div>
    }
}
