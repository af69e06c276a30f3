// ── Row deletion controller ──
//
// Confirmation, single in-flight delete lock, and post-delete refresh.
// At most one row may be delete-in-flight at a time; while one is, all
// edit actions across the list are disabled through the in-flight
// signal (a row being edited could otherwise be concurrently removed).

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use stockpit_api::ResourceClient;

use crate::error::CoreError;
use crate::model::EntityKey;
use crate::notify::NotificationGateway;
use crate::resource::Resource;
use crate::store::ListStore;

/// Controller for row deletion in one managed collection.
///
/// Exclusively owns the delete lock. Rows are never removed
/// optimistically: on failure the list is untouched, on success the
/// store refetches with its active filter.
pub struct DeletionController<T: Resource> {
    client: Arc<ResourceClient>,
    store: Arc<ListStore<T>>,
    gateway: NotificationGateway,
    /// Key of the row whose deletion is in flight, if any.
    deleting: watch::Sender<Option<EntityKey>>,
    /// Bool mirror of the lock for the global edit-disable contract.
    in_flight: watch::Sender<bool>,
}

impl<T: Resource> DeletionController<T> {
    pub fn new(
        client: Arc<ResourceClient>,
        store: Arc<ListStore<T>>,
        gateway: NotificationGateway,
    ) -> Self {
        let (deleting, _) = watch::channel(None);
        let (in_flight, _) = watch::channel(false);
        Self {
            client,
            store,
            gateway,
            deleting,
            in_flight,
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Key currently being deleted, if any.
    pub fn deleting(&self) -> Option<EntityKey> {
        self.deleting.borrow().clone()
    }

    pub fn subscribe_deleting(&self) -> watch::Receiver<Option<EntityKey>> {
        self.deleting.subscribe()
    }

    /// `true`-while-deleting signal for wiring into
    /// [`SubmissionController::with_mutation_block`](crate::submit::SubmissionController::with_mutation_block).
    pub fn in_flight_signal(&self) -> watch::Receiver<bool> {
        self.in_flight.subscribe()
    }

    // ── Deletion protocol ────────────────────────────────────────────

    /// Request deletion of one row: confirm, lock, delete, refresh.
    ///
    /// Rejected client-side while any deletion is already in flight.
    /// Declining the confirmation is a pure no-op: no lock, no request.
    pub async fn request_delete(&self, key: EntityKey) {
        let descriptor = T::descriptor();

        if self.deleting.borrow().is_some() {
            warn!(
                resource = descriptor.name,
                %key,
                "delete rejected: another deletion is in flight"
            );
            return;
        }

        let confirmed = self
            .gateway
            .confirm(&format!("Delete this {}?", descriptor.name))
            .await;
        if !confirmed {
            debug!(resource = descriptor.name, %key, "delete cancelled");
            return;
        }

        // Acquire the lock; re-check, the confirmation awaited.
        let mut acquired = false;
        self.deleting.send_if_modified(|current| {
            if current.is_none() {
                *current = Some(key.clone());
                acquired = true;
                return true;
            }
            false
        });
        if !acquired {
            warn!(
                resource = descriptor.name,
                %key,
                "delete rejected: lock acquired elsewhere during confirmation"
            );
            return;
        }
        self.in_flight.send_replace(true);

        let result = self
            .client
            .remove(descriptor.base_path, &key.to_string())
            .await;

        // Release on every path so the row never sticks disabled.
        self.deleting.send_replace(None);
        self.in_flight.send_replace(false);

        match result {
            Ok(()) => {
                self.gateway
                    .success(&format!("{} deleted", descriptor.name))
                    .await;
                self.store.refresh().await;
            }
            Err(e) => {
                // No optimistic removal: the row stays in the list.
                self.gateway
                    .error(&CoreError::from(e).user_message())
                    .await;
            }
        }
    }
}
