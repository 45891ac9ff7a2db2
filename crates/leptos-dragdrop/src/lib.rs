//! Leptos DragDrop Utilities
//!
//! Nested drag-and-drop for Leptos on top of SortableJS.
//! SortableJS moves items vertically; the `nestsort` engine watches
//! horizontal pointer offset to nest or unnest the dragged item, and syncs
//! the result with an external authority.

mod dom_list;
mod error;
mod handle;
mod hook;
mod listener;
mod sortable;

pub use dom_list::DomList;
pub use error::BindError;
pub use handle::{NestedSortable, SharedEngine};
pub use hook::{use_nested_sortable, SortableSlot};
pub use listener::EventListenerGuard;
pub use sortable::{Sortable, SortableCallbacks, SortableInstance};
