//! Generic resource-management pattern for stockpit admin surfaces.
//!
//! Every reference collection (brands, units, roles, taxes, settings)
//! is the same interaction state machine parametrized over a
//! [`ResourceDescriptor`]; this crate implements the machine once:
//!
//! - **[`ListStore`]** — owns the filtered collection, the load state,
//!   and the filter criteria. `Idle -> Loading -> {Loaded, Failed}`,
//!   with stale-response suppression: only the most recently issued
//!   fetch may apply its result.
//!
//! - **[`SubmissionController`]** — owns the create/edit dialog and the
//!   form draft. Single-flight submission, synchronous validation
//!   before any network call, dialog stays open (draft intact) on
//!   failure.
//!
//! - **[`DeletionController`]** — confirmation, one delete in flight at
//!   a time, and the list-wide edit-disable signal while it runs.
//!
//! - **[`NotificationGateway`]** — uniform success/error/confirm
//!   contract over a presentation-supplied [`Notifier`], owning the
//!   explicit blocking-notice signal that dialogs consult before
//!   honoring ambient close triggers.
//!
//! Ownership is strict: each component exclusively owns its state and
//! others reach it only through exposed operations. All network calls
//! go through `stockpit_api::ResourceClient`, which carries the
//! injected bearer credential.

pub mod delete;
pub mod draft;
pub mod error;
pub mod filter;
pub mod model;
pub mod notify;
pub mod resource;
pub mod store;
pub mod submit;

// ── Primary re-exports ──────────────────────────────────────────────
pub use delete::DeletionController;
pub use draft::FormDraft;
pub use error::CoreError;
pub use filter::FilterCriteria;
pub use model::{Brand, EntityKey, Role, Setting, Tax, Unit};
pub use notify::{NotificationGateway, Notifier, SUCCESS_DISMISS};
pub use resource::{FieldKind, FieldSpec, FilterStrategy, Resource, ResourceDescriptor};
pub use store::{ListStore, LoadState};
pub use submit::{DialogState, SubmissionController};
