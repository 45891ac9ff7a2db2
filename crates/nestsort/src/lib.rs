//! Nestsort
//!
//! Two-tier drag-and-drop reordering on top of a commodity sortable list.
//! Vertical moves are left to the list; horizontal drag offset decides
//! whether the dragged item nests under the item above, leaves its parent,
//! or keeps it. The resulting order is sent to an external authority, which
//! can push its own order back at any time.
//!
//! The crate has no DOM dependency: the list is reached through
//! [`SortableList`] and the backend through [`Authority`].

mod config;
mod engine;
mod item;
mod sync;
mod tracker;

pub use config::{SortConfig, DEFAULT_ID_PREFIX, DEFAULT_PARENT_ATTR, DEFAULT_PLACEHOLDER_ID, NEST_THRESHOLD};
pub use engine::{compute_reorder, reconcile_order, DragState, ReconcileOutcome, ReorderEngine, SortableList};
pub use item::{index_items, DomIdentity, Item, ItemId, ReorderEntry, ReorderResult};
pub use sync::{Authority, ReorderItemsCommand, SyncChannel, SyncError, REORDER_EVENT, REORDER_ITEMS_EVENT};
pub use tracker::{classify, Classification, DragTracker, GestureOutcome};
