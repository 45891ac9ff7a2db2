//! Task List Component
//!
//! Renders the two-tier list once and hands its DOM order to SortableJS.
//! After mounting, position is owned by the sortable; this component only
//! updates each row's parent attribute.

use std::collections::HashMap;

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::use_nested_sortable;
use nestsort::{Authority, ReorderResult, SortConfig, SyncError};

use crate::commands;
use crate::components::TaskRow;
use crate::context::AppContext;
use crate::models::Item;

type ParentSignals = StoredValue<HashMap<String, RwSignal<Option<String>>>>;

/// Backend as the authority, with an optimistic local update of parents
#[derive(Clone, Copy)]
struct BackendAuthority {
    parents: ParentSignals,
    ctx: AppContext,
}

impl Authority for BackendAuthority {
    fn push_reorder(&self, result: &ReorderResult) -> Result<(), SyncError> {
        let updated = self.parents.try_with_value(|parents| {
            for entry in &result.items {
                if let Some(parent) = parents.get(entry.id.as_str()) {
                    parent.set(entry.parent_id.as_ref().map(ToString::to_string));
                }
            }
        });
        if updated.is_none() {
            return Err(SyncError::Transport("list already disposed".to_string()));
        }

        let result = result.clone();
        let ctx = self.ctx;
        spawn_local(async move {
            let sent = commands::reorder(&result).await;
            settle_reorder(sent, || ctx.reload());
        });
        Ok(())
    }
}

/// A rejected reorder leaves local parents ahead of the backend; reload to resync
fn settle_reorder(sent: Result<(), String>, reload: impl FnOnce()) {
    if let Err(e) = sent {
        tracing::warn!(error = %e, "[DND] reorder failed, reloading");
        reload();
    }
}

#[component]
pub fn TaskList(items: Vec<Item>, config: SortConfig) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let dom = config.dom_identity();
    let list_ref = NodeRef::<Div>::new();

    let parents: ParentSignals = StoredValue::new(
        items
            .iter()
            .map(|item| (item.id.clone(), RwSignal::new(item.parent_id.clone())))
            .collect(),
    );

    let slot = use_nested_sortable(list_ref, config, move || BackendAuthority { parents, ctx });

    // Authoritative orders pushed by the backend
    let subscription = StoredValue::new_local(None::<commands::EventSubscription>);
    spawn_local(async move {
        let listening = commands::listen_reorder_items(move |command| {
            let outcome = slot.try_with_value(|s| s.as_ref().and_then(|s| s.reconcile(&command)));
            tracing::debug!(?outcome, "[DND] reorder_items received");
        })
        .await;
        match listening {
            Ok(sub) => {
                let _ = subscription.try_set_value(Some(sub));
            }
            Err(e) => tracing::warn!(error = %e, "[DND] not listening for reorder_items"),
        }
    });
    on_cleanup(move || {
        let _ = subscription.try_update_value(|s| *s = None);
    });

    let placeholder = items.is_empty().then(|| {
        view! { <div id=dom.placeholder_dom_id() class="empty-placeholder">"No tasks yet"</div> }
    });
    let rows = items
        .into_iter()
        .map(|item| {
            let dom_id = dom.dom_id(&item.id.as_str().into());
            let parent = parents
                .with_value(|p| p.get(&item.id).copied())
                .unwrap_or_else(|| RwSignal::new(None));
            view! { <TaskRow item=item dom_id=dom_id parent=parent /> }
        })
        .collect_view();

    view! {
        <div class="task-list" node_ref=list_ref>
            {placeholder}
            {rows}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_rejected_reorder_reloads() {
        let reloads = Cell::new(0);
        settle_reorder(Err("reorder failed: gone".to_string()), || reloads.set(reloads.get() + 1));
        assert_eq!(reloads.get(), 1);
    }

    #[test]
    fn test_accepted_reorder_keeps_list() {
        let reloads = Cell::new(0);
        settle_reorder(Ok(()), || reloads.set(reloads.get() + 1));
        assert_eq!(reloads.get(), 0);
    }
}
