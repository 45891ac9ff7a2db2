//! DOM-backed sortable list
//!
//! Reads item order and nesting straight from the container's children and
//! writes orders back through SortableJS.

use std::rc::Rc;

use wasm_bindgen::JsCast;

use nestsort::{index_items, DomIdentity, Item, ItemId, SortConfig, SortableList};

use crate::listener::EventListenerGuard;
use crate::sortable::Sortable;

pub struct DomList {
    container: web_sys::HtmlElement,
    sortable: Option<Sortable>,
    dom: DomIdentity,
    parent_attr: String,
    sampler: Rc<dyn Fn(f64)>,
}

impl DomList {
    /// `sampler` receives pointer x coordinates while a drag is in progress
    pub fn new(container: web_sys::HtmlElement, config: &SortConfig, sampler: Rc<dyn Fn(f64)>) -> Self {
        Self {
            container,
            sortable: None,
            dom: config.dom_identity(),
            parent_attr: config.parent_attr.clone(),
            sampler,
        }
    }

    pub(crate) fn attach(&mut self, sortable: Sortable) {
        self.sortable = Some(sortable);
    }

    pub(crate) fn detach(&mut self) {
        self.sortable = None;
    }

    pub fn container(&self) -> &web_sys::HtmlElement {
        &self.container
    }

    /// Element for an item, if rendered
    pub fn element(&self, id: &ItemId) -> Option<web_sys::Element> {
        let document = self.container.owner_document()?;
        document.get_element_by_id(&self.dom.dom_id(id))
    }

    /// Reorder children directly when no SortableJS instance is attached
    fn append_in_order(&self, ids: &[ItemId]) {
        for id in ids {
            if let Some(el) = self.element(id) {
                if let Err(e) = self.container.append_child(&el) {
                    tracing::warn!(item = %id, error = ?e, "failed to move item");
                }
            }
        }
    }
}

impl SortableList for DomList {
    type Listeners = Vec<EventListenerGuard>;

    fn items(&self) -> Vec<Item> {
        let children = self.container.children();
        let pairs = (0..children.length())
            .filter_map(|i| children.item(i))
            .filter_map(|el| {
                let id = self.dom.parse(&el.id())?;
                let parent = self
                    .dom
                    .parse_parent(el.get_attribute(&self.parent_attr).as_deref());
                Some((id, parent))
            });
        index_items(pairs)
    }

    fn apply_order(&mut self, ids: &[ItemId], animate: bool) {
        let Some(sortable) = &self.sortable else {
            self.append_in_order(ids);
            return;
        };
        let order: js_sys::Array = ids
            .iter()
            .map(|id| wasm_bindgen::JsValue::from_str(&self.dom.dom_id(id)))
            .collect();
        sortable.sort(&order, animate);
    }

    fn listen(&mut self) -> Vec<EventListenerGuard> {
        let mut guards = Vec::with_capacity(2);

        let sampler = self.sampler.clone();
        match EventListenerGuard::on_document("pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web_sys::MouseEvent>() {
                sampler(f64::from(ev.client_x()));
            }
        }) {
            Ok(guard) => guards.push(guard),
            Err(e) => tracing::warn!(error = %e, "pointer sampling unavailable"),
        }

        let sampler = self.sampler.clone();
        match EventListenerGuard::on_document("touchmove", move |ev| {
            // A touchmove with no active touch carries nothing to sample
            let touch = ev
                .dyn_ref::<web_sys::TouchEvent>()
                .and_then(|t| t.touches().get(0));
            if let Some(touch) = touch {
                sampler(f64::from(touch.client_x()));
            }
        }) {
            Ok(guard) => guards.push(guard),
            Err(e) => tracing::warn!(error = %e, "touch sampling unavailable"),
        }

        guards
    }
}
