use leptos::html::Div;
use leptos::prelude::*;

use nestsort::{Authority, SortConfig};

use crate::handle::NestedSortable;

/// Local slot holding a mounted list, empty until the element exists
pub type SortableSlot<A> = StoredValue<Option<NestedSortable<A>>, LocalStorage>;

/// Mount a nested sortable on `node_ref` once it is rendered.
///
/// The list is torn down when the owning component is cleaned up.
pub fn use_nested_sortable<A, F>(node_ref: NodeRef<Div>, config: SortConfig, make_authority: F) -> SortableSlot<A>
where
    A: Authority + 'static,
    F: Fn() -> A + 'static,
{
    let slot: SortableSlot<A> = StoredValue::new_local(None);

    Effect::new(move |_| {
        let Some(div) = node_ref.get() else {
            return;
        };
        if slot.with_value(Option::is_some) {
            return;
        }
        let el: web_sys::HtmlElement = div.into();
        match NestedSortable::mount(el, &config, make_authority()) {
            Ok(sortable) => slot.set_value(Some(sortable)),
            Err(e) => tracing::error!(error = %e, "failed to mount nested sortable"),
        }
    });

    on_cleanup(move || {
        let _ = slot.try_update_value(|s| *s = None);
    });

    slot
}
