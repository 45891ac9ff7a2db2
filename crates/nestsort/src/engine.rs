//! Reordering Engine
//!
//! Drives the drag lifecycle (`Idle -> Chosen -> Dragging -> Idle`) on top of
//! a sortable list and derives the ordered, parented item list when a drag
//! completes. Authoritative orders arriving mid-gesture are deferred until
//! the gesture is over.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::config::SortConfig;
use crate::item::{DomIdentity, Item, ItemId, ReorderEntry, ReorderResult};
use crate::tracker::{Classification, DragTracker, GestureOutcome};

/// The underlying sortable mechanism.
///
/// Owns item *position*; the engine only reads it, and writes it back through
/// [`SortableList::apply_order`] when reconciling.
pub trait SortableList {
    /// Guard for gesture-scoped global listeners; dropping it releases them
    type Listeners;

    /// Items in current display order, placeholder excluded
    fn items(&self) -> Vec<Item>;

    /// Move items into exactly this order, preserving identity
    fn apply_order(&mut self, ids: &[ItemId], animate: bool);

    /// Register pointer listeners for the duration of a drag
    fn listen(&mut self) -> Self::Listeners;
}

/// Lifecycle state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down on an item but it has not moved yet
    Chosen,
    Dragging,
}

/// What happened to an authoritative order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// List was reordered
    Applied,
    /// List already had this order
    Unchanged,
    /// A gesture is active; applied once it ends
    Deferred,
}

type ClassificationCallback = Box<dyn FnMut(&ItemId, Classification)>;

pub struct ReorderEngine<L: SortableList> {
    list: L,
    state: DragState,
    tracker: DragTracker,
    dom: DomIdentity,
    listeners: Option<L::Listeners>,
    deferred: Option<Vec<ItemId>>,
    on_classification: Option<ClassificationCallback>,
}

impl<L: SortableList> ReorderEngine<L> {
    pub fn new(list: L, config: &SortConfig) -> Self {
        Self {
            list,
            state: DragState::Idle,
            tracker: DragTracker::new(config.nest_threshold),
            dom: config.dom_identity(),
            listeners: None,
            deferred: None,
            on_classification: None,
        }
    }

    /// Called whenever the live classification changes, and with
    /// [`Classification::Keep`] when a drag ends so styling can be reset
    pub fn on_classification_changed<F>(&mut self, f: F)
    where
        F: FnMut(&ItemId, Classification) + 'static,
    {
        self.on_classification = Some(Box::new(f));
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    pub fn dragged(&self) -> Option<&ItemId> {
        self.tracker.dragged()
    }

    pub fn classification(&self) -> Classification {
        self.tracker.classification()
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn holds_listeners(&self) -> bool {
        self.listeners.is_some()
    }

    // ========================
    // Gesture lifecycle
    // ========================

    /// Pointer went down on an item
    pub fn choose(&mut self, item_id: ItemId) {
        if self.state == DragState::Dragging {
            debug!(item = %item_id, "pointer-down during active drag ignored");
            return;
        }
        let item = if self.dom.is_placeholder(item_id.as_str()) {
            None
        } else {
            let found = self.list.items().into_iter().find(|i| i.id == item_id);
            if found.is_none() {
                warn!(item = %item_id, "chosen item not in list");
            }
            found
        };
        let Some(item) = item else {
            // A previous choice must not outlive the new pointer-down
            if self.state == DragState::Chosen {
                self.exit_gesture();
                self.apply_deferred();
            }
            return;
        };

        debug!(item = %item_id, parent = ?item.parent_id, "chosen");
        self.tracker.on_gesture_start(item_id, item.parent_id.is_some());
        self.state = DragState::Chosen;
    }

    /// Pointer-down ended without a drag (a click)
    pub fn unchoose(&mut self) {
        if self.state != DragState::Chosen {
            return;
        }
        self.exit_gesture();
        self.apply_deferred();
    }

    /// The chosen item actually started moving
    pub fn start(&mut self) {
        if self.state != DragState::Chosen {
            debug!(state = ?self.state, "start ignored");
            return;
        }
        self.listeners = Some(self.list.listen());
        self.state = DragState::Dragging;
        debug!(item = ?self.tracker.dragged(), "dragging");
    }

    /// Hot path: a pointer x coordinate while dragging
    pub fn sample(&mut self, client_x: f64) {
        if self.state != DragState::Dragging {
            return;
        }
        if let Some(next) = self.tracker.on_pointer_sample(client_x) {
            trace!(?next, offset = self.tracker.offset_x(), "classification changed");
            self.notify(next);
        }
    }

    /// Finish the drag against the list's current order
    pub fn end(&mut self) -> Option<ReorderResult> {
        if self.state != DragState::Dragging {
            return None;
        }
        let order = self.list.items();
        self.end_with(&order)
    }

    /// Finish the drag against an explicit display order.
    ///
    /// No-op (returns `None`) unless dragging.
    pub fn end_with(&mut self, dom_order: &[Item]) -> Option<ReorderResult> {
        if self.state != DragState::Dragging {
            return None;
        }
        let Some(outcome) = self.exit_gesture() else {
            self.apply_deferred();
            return None;
        };
        let result = compute_reorder(dom_order, &outcome, &self.dom);
        debug!(
            item = %outcome.dragged,
            classification = ?outcome.classification,
            offset = outcome.offset_x,
            parent = ?result.parent_of(&outcome.dragged),
            "drag ended"
        );
        self.apply_deferred();
        Some(result)
    }

    /// Abort the current gesture without a result
    pub fn cancel(&mut self) -> bool {
        if self.state == DragState::Idle {
            return false;
        }
        debug!(item = ?self.tracker.dragged(), "gesture cancelled");
        self.exit_gesture();
        self.apply_deferred();
        true
    }

    /// The list is going away: drop everything, emit nothing
    pub fn teardown(&mut self) {
        if self.state != DragState::Idle {
            debug!(item = ?self.tracker.dragged(), state = ?self.state, "teardown mid-gesture");
        }
        self.exit_gesture();
        self.deferred = None;
    }

    /// Single exit path out of `Chosen`/`Dragging`
    fn exit_gesture(&mut self) -> Option<GestureOutcome> {
        let was_dragging = self.state == DragState::Dragging;
        self.listeners = None;
        self.state = DragState::Idle;
        let outcome = self.tracker.on_gesture_end();
        if was_dragging {
            if let (Some(o), Some(cb)) = (&outcome, self.on_classification.as_mut()) {
                cb(&o.dragged, Classification::Keep);
            }
        }
        outcome
    }

    fn notify(&mut self, classification: Classification) {
        if let (Some(id), Some(cb)) = (self.tracker.dragged(), self.on_classification.as_mut()) {
            cb(id, classification);
        }
    }

    // ========================
    // Authoritative order
    // ========================

    /// Bring the list into the authoritative order
    pub fn reconcile(&mut self, authoritative: &[ItemId]) -> ReconcileOutcome {
        if self.state != DragState::Idle {
            debug!(count = authoritative.len(), "authoritative order deferred until drag ends");
            self.deferred = Some(authoritative.to_vec());
            return ReconcileOutcome::Deferred;
        }
        self.apply_reconcile(authoritative)
    }

    fn apply_deferred(&mut self) {
        if let Some(ids) = self.deferred.take() {
            self.apply_reconcile(&ids);
        }
    }

    fn apply_reconcile(&mut self, authoritative: &[ItemId]) -> ReconcileOutcome {
        let current: Vec<ItemId> = self.list.items().into_iter().map(|i| i.id).collect();
        let target = reconcile_order(&current, authoritative, &self.dom);
        if target == current {
            trace!("authoritative order already applied");
            return ReconcileOutcome::Unchanged;
        }
        debug!(count = target.len(), "applying authoritative order");
        self.list.apply_order(&target, true);
        ReconcileOutcome::Applied
    }
}

impl<L: SortableList> Drop for ReorderEngine<L> {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ========================
// Pure computations
// ========================

/// Derive the reorder result from display order and the gesture outcome
pub fn compute_reorder(
    dom_order: &[Item],
    outcome: &GestureOutcome,
    dom: &DomIdentity,
) -> ReorderResult {
    let items: Vec<&Item> = dom_order
        .iter()
        .filter(|i| !dom.is_placeholder(i.id.as_str()))
        .collect();

    let new_parent = items
        .iter()
        .position(|i| i.id == outcome.dragged)
        .map(|pos| {
            let before = items[pos].parent_id.clone();
            match outcome.classification {
                Classification::Keep => before,
                Classification::Unnest => None,
                Classification::Nest => nest_target(&items, pos).or(before),
            }
        });

    let entries = items
        .iter()
        .map(|i| ReorderEntry {
            id: i.id.clone(),
            parent_id: match &new_parent {
                Some(parent) if i.id == outcome.dragged => parent.clone(),
                _ => i.parent_id.clone(),
            },
        })
        .collect();

    ReorderResult { items: entries }
}

/// Parent for an item nested at `pos`, or `None` when nesting is impossible
fn nest_target(items: &[&Item], pos: usize) -> Option<ItemId> {
    let dragged = &items[pos].id;
    if items.iter().any(|i| i.parent_id.as_ref() == Some(dragged)) {
        debug!(item = %dragged, "item with children cannot be nested");
        return None;
    }
    let above = items.get(pos.checked_sub(1)?)?;
    let candidate = above.parent_id.clone().unwrap_or_else(|| above.id.clone());
    top_level_ancestor(items, candidate, dragged)
}

/// Walk up to a top-level item; `None` on cycles or when the walk reaches
/// the dragged item itself
fn top_level_ancestor(items: &[&Item], mut candidate: ItemId, dragged: &ItemId) -> Option<ItemId> {
    let parents: HashMap<&ItemId, Option<&ItemId>> =
        items.iter().map(|i| (&i.id, i.parent_id.as_ref())).collect();

    for _ in 0..=items.len() {
        if &candidate == dragged {
            return None;
        }
        match parents.get(&candidate) {
            Some(Some(parent)) => {
                warn!(item = %candidate, parent = %parent, "nested parent flattened to its ancestor");
                candidate = (*parent).clone();
            }
            // Top-level, or a parent not rendered in this list
            _ => return Some(candidate),
        }
    }
    warn!(item = %dragged, "parent cycle while resolving nest target");
    None
}

/// Target order for a reconcile.
///
/// Placeholder, unknown and duplicate ids are dropped; local items the
/// authority did not mention follow in their current relative order.
pub fn reconcile_order(
    current: &[ItemId],
    authoritative: &[ItemId],
    dom: &DomIdentity,
) -> Vec<ItemId> {
    let known: HashSet<&ItemId> = current.iter().collect();
    let mut seen: HashSet<&ItemId> = HashSet::with_capacity(current.len());
    let mut target = Vec::with_capacity(current.len());

    for id in authoritative {
        if dom.is_placeholder(id.as_str()) {
            continue;
        }
        if !known.contains(id) {
            warn!(item = %id, "unknown id in authoritative order dropped");
            continue;
        }
        if seen.insert(id) {
            target.push(id.clone());
        }
    }
    for id in current {
        if !seen.contains(id) && !dom.is_placeholder(id.as_str()) {
            target.push(id.clone());
        }
    }
    target
}
