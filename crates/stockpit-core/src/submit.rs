// ── Submission controller ──
//
// Owns the create-or-edit form state and the dialog lifecycle:
// `Closed -> OpenCreate | OpenEdit(key) -> (submitting) ->
// {Closed on success, unchanged on failure}`. Submission is
// single-flight; validation runs before any network call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use stockpit_api::ResourceClient;

use crate::draft::FormDraft;
use crate::error::CoreError;
use crate::model::EntityKey;
use crate::notify::NotificationGateway;
use crate::resource::Resource;
use crate::store::ListStore;

/// Dialog visibility: closed, open for create, or open for edit of one
/// record. Only one dialog may be open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    OpenCreate,
    OpenEdit(EntityKey),
}

enum Outcome {
    /// Nothing to do (dialog was closed).
    Skipped,
    Saved,
    Failed(String),
}

/// Controller for the create/edit dialog of one managed collection.
///
/// Exclusively owns the form draft and the submission lock; outcomes are
/// reported through the gateway and the list store is asked to refetch
/// on success.
pub struct SubmissionController<T: Resource> {
    client: Arc<ResourceClient>,
    store: Arc<ListStore<T>>,
    gateway: NotificationGateway,
    dialog: watch::Sender<DialogState>,
    draft: watch::Sender<FormDraft>,
    submitting: AtomicBool,
    /// Raised by the deletion controller while any delete is in flight;
    /// edit actions across the whole list are disabled meanwhile.
    mutation_block: Option<watch::Receiver<bool>>,
}

impl<T: Resource> SubmissionController<T> {
    pub fn new(
        client: Arc<ResourceClient>,
        store: Arc<ListStore<T>>,
        gateway: NotificationGateway,
    ) -> Self {
        let (dialog, _) = watch::channel(DialogState::Closed);
        let (draft, _) = watch::channel(FormDraft::new());

        Self {
            client,
            store,
            gateway,
            dialog,
            draft,
            submitting: AtomicBool::new(false),
            mutation_block: None,
        }
    }

    /// Wire in the deletion controller's in-flight signal.
    pub fn with_mutation_block(mut self, block: watch::Receiver<bool>) -> Self {
        self.mutation_block = Some(block);
        self
    }

    fn mutations_blocked(&self) -> bool {
        self.mutation_block.as_ref().is_some_and(|rx| *rx.borrow())
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn dialog_state(&self) -> DialogState {
        self.dialog.borrow().clone()
    }

    pub fn subscribe_dialog(&self) -> watch::Receiver<DialogState> {
        self.dialog.subscribe()
    }

    pub fn draft(&self) -> FormDraft {
        self.draft.borrow().clone()
    }

    pub fn subscribe_draft(&self) -> watch::Receiver<FormDraft> {
        self.draft.subscribe()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    // ── Dialog lifecycle ─────────────────────────────────────────────

    /// Open for create, seeding an empty draft. Returns `false` while a
    /// deletion is in flight (edit actions are globally disabled).
    pub fn open_create(&self) -> bool {
        if self.mutations_blocked() {
            warn!(resource = T::descriptor().name, "create refused: deletion in flight");
            return false;
        }
        self.draft.send_replace(FormDraft::new());
        self.dialog.send_replace(DialogState::OpenCreate);
        true
    }

    /// Open for edit, seeding the draft from the record's current field
    /// values. Returns `false` while a deletion is in flight.
    pub fn open_edit(&self, entity: &T) -> bool {
        if self.mutations_blocked() {
            warn!(resource = T::descriptor().name, "edit refused: deletion in flight");
            return false;
        }
        self.draft.send_replace(entity.to_draft());
        self.dialog.send_replace(DialogState::OpenEdit(entity.key()));
        true
    }

    /// Set one draft field.
    pub fn set_field(&self, field: &str, value: impl Into<serde_json::Value>) {
        let value = value.into();
        self.draft.send_modify(|d| {
            d.set(field, value);
        });
    }

    /// Close the dialog and discard the draft (explicit cancel).
    pub fn cancel(&self) {
        self.dialog.send_replace(DialogState::Closed);
        self.draft.send_replace(FormDraft::new());
    }

    /// Ambient close trigger (e.g. outside click). Refused while a
    /// blocking error notice is visible — the notice has modal priority.
    pub fn request_close(&self) -> bool {
        if self.gateway.blocking_notice() {
            debug!("ambient close ignored: blocking notice active");
            return false;
        }
        self.cancel();
        true
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Submit the draft. No-op while a submission is already in flight:
    /// concurrent attempts never issue a second request.
    pub async fn submit(&self) {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(resource = T::descriptor().name, "submit ignored: already in flight");
            return;
        }

        let outcome = self.perform_submit().await;

        // The lock is released on every path so the UI never sticks.
        self.submitting.store(false, Ordering::SeqCst);

        match outcome {
            Outcome::Skipped => {}
            Outcome::Saved => {
                self.dialog.send_replace(DialogState::Closed);
                self.draft.send_replace(FormDraft::new());
                self.gateway
                    .success(&format!("{} saved", T::descriptor().name))
                    .await;
                // Refetch with the currently applied filter, not the
                // empty one.
                self.store.refresh().await;
            }
            Outcome::Failed(message) => {
                // Dialog stays open, draft preserved for correction.
                self.gateway.error(&message).await;
            }
        }
    }

    async fn perform_submit(&self) -> Outcome {
        let mode = self.dialog.borrow().clone();
        if mode == DialogState::Closed {
            debug!("submit ignored: no dialog open");
            return Outcome::Skipped;
        }

        let draft = self.draft.borrow().clone();
        let descriptor = T::descriptor();

        if let Err(e) = descriptor.validate(&draft) {
            return Outcome::Failed(e.user_message());
        }

        let result = match &mode {
            DialogState::OpenCreate => self
                .client
                .create::<T, _>(descriptor.base_path, draft.as_map())
                .await
                .map(drop),
            DialogState::OpenEdit(key) => self
                .client
                .update::<T, _>(descriptor.base_path, &key.to_string(), draft.as_map())
                .await
                .map(drop),
            DialogState::Closed => return Outcome::Skipped,
        };

        match result {
            Ok(()) => Outcome::Saved,
            Err(e) => Outcome::Failed(CoreError::from(e).user_message()),
        }
    }
}
