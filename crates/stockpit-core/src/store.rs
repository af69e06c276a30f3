// ── Entity list store ──
//
// Owns the current filtered collection, the load state, and the filter
// criteria. `Idle -> Loading -> {Loaded, Failed}`, re-entering Loading
// on every applied filter or refresh. A request generation counter
// suppresses stale responses: only the most recently issued fetch may
// apply its result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use stockpit_api::ResourceClient;

use crate::filter::FilterCriteria;
use crate::notify::NotificationGateway;
use crate::resource::{FilterStrategy, Resource};

/// Load state of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Reactive store for one managed collection.
///
/// The held collection is exclusively owned here: controllers never
/// mutate it directly, they ask the store to refetch. Subscribers
/// observe snapshots and load state through `watch` channels.
pub struct ListStore<T: Resource> {
    client: Arc<ResourceClient>,
    gateway: NotificationGateway,
    items: watch::Sender<Arc<Vec<T>>>,
    state: watch::Sender<LoadState>,
    /// Criteria being edited; not fetched until applied.
    pending: watch::Sender<FilterCriteria>,
    /// Criteria of the last applied fetch; refreshes reuse these.
    applied: watch::Sender<FilterCriteria>,
    /// Fetch generation. A completing fetch applies its result only if
    /// its generation is still current.
    generation: AtomicU64,
}

impl<T: Resource> ListStore<T> {
    pub fn new(client: Arc<ResourceClient>, gateway: NotificationGateway) -> Self {
        let (items, _) = watch::channel(Arc::new(Vec::new()));
        let (state, _) = watch::channel(LoadState::Idle);
        let (pending, _) = watch::channel(FilterCriteria::new());
        let (applied, _) = watch::channel(FilterCriteria::new());

        Self {
            client,
            gateway,
            items,
            state,
            pending,
            applied,
            generation: AtomicU64::new(0),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Current collection snapshot (cheap `Arc` clone, server order).
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.items.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.items.subscribe()
    }

    pub fn load_state(&self) -> LoadState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn pending_filter(&self) -> FilterCriteria {
        self.pending.borrow().clone()
    }

    pub fn applied_filter(&self) -> FilterCriteria {
        self.applied.borrow().clone()
    }

    // ── Filter operations ────────────────────────────────────────────

    /// Edit the filter criteria without fetching. Nothing happens until
    /// [`apply_filter`](Self::apply_filter) — the explicit search action.
    pub fn set_filter(&self, criteria: FilterCriteria) {
        self.pending.send_replace(criteria);
    }

    /// Edit one criterion without fetching.
    pub fn set_filter_field(&self, field: &str, value: &str) {
        self.pending.send_modify(|c| {
            c.set(field, value);
        });
    }

    /// Fetch with the pending criteria. The initial load is an
    /// `apply_filter` over empty criteria.
    pub async fn apply_filter(&self) {
        let criteria = self.pending.borrow().clone();
        self.applied.send_replace(criteria.clone());
        self.fetch(criteria).await;
    }

    /// Clear criteria to empty and immediately refetch.
    pub async fn reset_filter(&self) {
        self.pending.send_replace(FilterCriteria::new());
        self.applied.send_replace(FilterCriteria::new());
        self.fetch(FilterCriteria::new()).await;
    }

    /// Refetch with the currently applied criteria (not the pending
    /// edits) — post-mutation refreshes respect the active search.
    pub async fn refresh(&self) {
        let criteria = self.applied.borrow().clone();
        self.fetch(criteria).await;
    }

    // ── Fetch ────────────────────────────────────────────────────────

    async fn fetch(&self, criteria: FilterCriteria) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        // send_replace stores unconditionally, even with zero receivers.
        self.state.send_replace(LoadState::Loading);

        let descriptor = T::descriptor();
        let result = match descriptor.filter {
            FilterStrategy::ServerPost => {
                self.client
                    .filter::<T>(descriptor.base_path, &criteria.as_body())
                    .await
            }
            FilterStrategy::ClientSide => self
                .client
                .list::<T>(descriptor.base_path)
                .await
                .map(|all| all.into_iter().filter(|e| e.matches(&criteria)).collect()),
        };

        // A newer fetch superseded this one; its result decides.
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                resource = descriptor.name,
                generation, "stale list response discarded"
            );
            return;
        }

        match result {
            Ok(fetched) => {
                self.items.send_replace(Arc::new(fetched));
                self.state.send_replace(LoadState::Loaded);
            }
            Err(e) => {
                self.items.send_replace(Arc::new(Vec::new()));
                self.state.send_replace(LoadState::Failed);
                self.gateway
                    .error(&crate::error::CoreError::from(e).user_message())
                    .await;
            }
        }
    }
}
