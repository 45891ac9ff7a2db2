//! Sync Channel
//!
//! Outbound `reorder` results to the authority, inbound `reorder_items`
//! orders from it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{ReconcileOutcome, ReorderEngine, SortableList};
use crate::item::{DomIdentity, ItemId, ReorderResult};

/// Outbound event name
pub const REORDER_EVENT: &str = "reorder";
/// Inbound event name
pub const REORDER_ITEMS_EVENT: &str = "reorder_items";

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("invalid {event} payload: {source}")]
    Decode {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("transport error: {0}")]
    Transport(String),
}

/// Inbound payload: the full authoritative order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItemsCommand {
    pub ids: Vec<String>,
}

/// Transport to the system owning the canonical order.
///
/// Delivery is fire-and-forget from the engine's point of view; retries are
/// the transport's business.
pub trait Authority {
    fn push_reorder(&self, result: &ReorderResult) -> Result<(), SyncError>;
}

pub struct SyncChannel<A> {
    authority: A,
    dom: DomIdentity,
    sent: u64,
}

impl<A: Authority> SyncChannel<A> {
    pub fn new(authority: A, dom: DomIdentity) -> Self {
        Self {
            authority,
            dom,
            sent: 0,
        }
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Number of results handed to the transport
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Send one completed gesture's result
    pub fn emit(&mut self, result: &ReorderResult) {
        debug!(event = REORDER_EVENT, count = result.len(), "emitting reorder");
        if let Err(e) = self.authority.push_reorder(result) {
            warn!(error = %e, "reorder not delivered");
            return;
        }
        self.sent += 1;
    }

    /// End the engine's drag and emit its result, if any
    pub fn complete_gesture<L: SortableList>(
        &mut self,
        engine: &mut ReorderEngine<L>,
    ) -> Option<ReorderResult> {
        let result = engine.end()?;
        self.emit(&result);
        Some(result)
    }

    /// Strip DOM prefixes and drop the placeholder
    pub fn ids_of(&self, command: &ReorderItemsCommand) -> Vec<ItemId> {
        command.ids.iter().filter_map(|raw| self.dom.parse(raw)).collect()
    }

    pub fn decode(&self, payload: &str) -> Result<ReorderItemsCommand, SyncError> {
        serde_json::from_str(payload).map_err(|source| SyncError::Decode {
            event: REORDER_ITEMS_EVENT,
            source,
        })
    }

    /// Apply an inbound authoritative order
    pub fn accept<L: SortableList>(
        &self,
        engine: &mut ReorderEngine<L>,
        command: &ReorderItemsCommand,
    ) -> ReconcileOutcome {
        let ids = self.ids_of(command);
        let outcome = engine.reconcile(&ids);
        debug!(event = REORDER_ITEMS_EVENT, count = ids.len(), ?outcome, "authoritative order");
        outcome
    }

    pub fn accept_json<L: SortableList>(
        &self,
        engine: &mut ReorderEngine<L>,
        payload: &str,
    ) -> Result<ReconcileOutcome, SyncError> {
        let command = self.decode(payload)?;
        Ok(self.accept(engine, &command))
    }
}
