//! Nestsort Frontend App
//!
//! Loads tasks from the backend and renders the sortable list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::TaskList;
use crate::config::load_sort_config;
use crate::context::AppContext;
use crate::models::Item;
use crate::tree::display_order;

#[component]
pub fn App() -> impl IntoView {
    // State
    let (items, set_items) = signal(Vec::<Item>::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let config = StoredValue::new(load_sort_config());

    // Provide context to all children
    provide_context(AppContext::new((reload_trigger, set_reload_trigger)));

    // Load items when trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        spawn_local(async move {
            match commands::list_items().await {
                Ok(loaded) => {
                    tracing::debug!(count = loaded.len(), trigger, "[APP] loaded items");
                    set_items.set(display_order(&loaded));
                }
                Err(e) => tracing::warn!(error = %e, "[APP] failed to load items"),
            }
        });
    });

    view! {
        <main class="main-content">
            <h1>"Tasks"</h1>
            // Each load rebuilds the list; DOM order is the sortable's afterwards
            {move || view! { <TaskList items=items.get() config=config.get_value() /> }}
            <p class="item-count">{move || format!("{} items", items.with(Vec::len))}</p>
        </main>
    }
}
