//! Shared test fixtures: an in-memory sortable list and a recording authority.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nestsort::{
    index_items, Authority, Item, ItemId, ReorderEngine, ReorderResult, SortConfig, SortableList,
    SyncError,
};

/// Sortable list backed by a shared vector; clones observe the same list
#[derive(Clone, Default)]
pub struct FakeList {
    order: Rc<RefCell<Vec<(ItemId, Option<ItemId>)>>>,
    live_listeners: Rc<Cell<usize>>,
    reflows: Rc<Cell<usize>>,
}

pub struct ListenerToken(Rc<Cell<usize>>);

impl Drop for ListenerToken {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl FakeList {
    pub fn new(spec: &[(&str, Option<&str>)]) -> Self {
        let list = Self::default();
        *list.order.borrow_mut() = spec
            .iter()
            .map(|(id, parent)| (ItemId::from(*id), parent.map(ItemId::from)))
            .collect();
        list
    }

    /// What the sortable mechanism does during a drag
    pub fn move_to(&self, id: &str, index: usize) {
        let mut order = self.order.borrow_mut();
        let Some(from) = order.iter().position(|(i, _)| i.as_str() == id) else {
            return;
        };
        let entry = order.remove(from);
        let len = order.len();
        order.insert(index.min(len), entry);
    }

    pub fn ids(&self) -> Vec<String> {
        self.order.borrow().iter().map(|(i, _)| i.to_string()).collect()
    }

    pub fn parent(&self, id: &str) -> Option<String> {
        self.order
            .borrow()
            .iter()
            .find(|(i, _)| i.as_str() == id)
            .and_then(|(_, p)| p.as_ref().map(ToString::to_string))
    }

    /// Write a result's parents back, as the renderer would after a sync
    pub fn adopt(&self, result: &ReorderResult) {
        let mut order = self.order.borrow_mut();
        for (id, parent) in order.iter_mut() {
            if let Some(entry) = result.items.iter().find(|e| &e.id == id) {
                *parent = entry.parent_id.clone();
            }
        }
    }

    pub fn live_listeners(&self) -> usize {
        self.live_listeners.get()
    }

    pub fn reflows(&self) -> usize {
        self.reflows.get()
    }
}

impl SortableList for FakeList {
    type Listeners = ListenerToken;

    fn items(&self) -> Vec<Item> {
        index_items(self.order.borrow().clone())
    }

    fn apply_order(&mut self, ids: &[ItemId], _animate: bool) {
        let mut order = self.order.borrow_mut();
        let mut next = Vec::with_capacity(order.len());
        for id in ids {
            if let Some(pos) = order.iter().position(|(i, _)| i == id) {
                next.push(order.remove(pos));
            }
        }
        next.append(&mut order);
        *order = next;
        self.reflows.set(self.reflows.get() + 1);
    }

    fn listen(&mut self) -> ListenerToken {
        self.live_listeners.set(self.live_listeners.get() + 1);
        ListenerToken(self.live_listeners.clone())
    }
}

#[derive(Clone, Default)]
pub struct RecordingAuthority {
    pub sent: Rc<RefCell<Vec<ReorderResult>>>,
}

impl Authority for RecordingAuthority {
    fn push_reorder(&self, result: &ReorderResult) -> Result<(), SyncError> {
        self.sent.borrow_mut().push(result.clone());
        Ok(())
    }
}

pub fn engine(list: &FakeList) -> ReorderEngine<FakeList> {
    ReorderEngine::new(list.clone(), &SortConfig::default())
}

/// Run a full gesture: choose, start, move in the list, sample offset, end
pub fn drag(
    engine: &mut ReorderEngine<FakeList>,
    list: &FakeList,
    id: &str,
    to_index: usize,
    offset_x: f64,
) -> Option<ReorderResult> {
    engine.choose(id.into());
    engine.start();
    engine.sample(200.0);
    list.move_to(id, to_index);
    engine.sample(200.0 + offset_x);
    engine.end()
}

pub fn pairs(result: &ReorderResult) -> Vec<(String, Option<String>)> {
    result
        .items
        .iter()
        .map(|e| (e.id.to_string(), e.parent_id.as_ref().map(ToString::to_string)))
        .collect()
}
