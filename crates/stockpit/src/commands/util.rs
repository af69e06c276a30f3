//! Shared helpers for command handlers.

use std::sync::Arc;

use tabled::Tabled;

use stockpit_core::{
    DeletionController, EntityKey, ListStore, Resource, SubmissionController,
};

use crate::cli::{GlobalOpts, NamedCommand};
use crate::error::CliError;
use crate::output;
use crate::session::Session;

/// Build a fresh list store for one resource type.
pub fn store<T: Resource>(session: &Session) -> Arc<ListStore<T>> {
    Arc::new(ListStore::new(
        Arc::clone(&session.client),
        session.gateway.clone(),
    ))
}

/// Build a submission controller over a store.
pub fn submitter<T: Resource>(
    session: &Session,
    store: Arc<ListStore<T>>,
) -> SubmissionController<T> {
    SubmissionController::new(
        Arc::clone(&session.client),
        store,
        session.gateway.clone(),
    )
}

/// Build a deletion controller over a store.
pub fn deleter<T: Resource>(
    session: &Session,
    store: Arc<ListStore<T>>,
) -> DeletionController<T> {
    DeletionController::new(
        Arc::clone(&session.client),
        store,
        session.gateway.clone(),
    )
}

/// Turn an error the controllers surfaced through the gateway into a
/// nonzero exit. Controllers report failures via the notifier rather
/// than return values, so handlers call this after every operation.
pub fn check(session: &Session) -> Result<(), CliError> {
    match session.notifier.take_error() {
        Some(message) => Err(CliError::OperationFailed { message }),
        None => Ok(()),
    }
}

/// Load the collection and find the entity with the given key.
pub async fn find_entity<T: Resource>(
    session: &Session,
    store: &ListStore<T>,
    key: &EntityKey,
) -> Result<T, CliError> {
    store.apply_filter().await;
    check(session)?;
    store
        .snapshot()
        .iter()
        .find(|e| e.key() == *key)
        .cloned()
        .ok_or_else(|| {
            let name = T::descriptor().name;
            CliError::NotFound {
                resource: name.into(),
                identifier: key.to_string(),
                list_command: format!("{name}s list"),
            }
        })
}

/// Shared handler for collections whose only editable field is `name`
/// (brands, units, roles). The caller supplies the table-row mapping.
pub async fn handle_named<T, R>(
    session: &Session,
    command: NamedCommand,
    global: &GlobalOpts,
    to_row: impl Fn(&T) -> R,
) -> Result<(), CliError>
where
    T: Resource,
    R: Tabled,
{
    match command {
        NamedCommand::List { name } => {
            let store = store::<T>(session);
            if let Some(name) = name {
                store.set_filter_field("name", &name);
            }
            store.apply_filter().await;
            check(session)?;
            let snap = store.snapshot();
            let out =
                output::render_list(&session.output, &snap, to_row, |e| e.key().to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NamedCommand::Create { name } => {
            let store = store::<T>(session);
            let ctrl = submitter(session, store);
            ctrl.open_create();
            ctrl.set_field("name", name);
            ctrl.submit().await;
            check(session)
        }

        NamedCommand::Edit { id, name } => {
            let store = store::<T>(session);
            let entity = find_entity(session, &store, &EntityKey::Id(id)).await?;
            let ctrl = submitter(session, Arc::clone(&store));
            ctrl.open_edit(&entity);
            ctrl.set_field("name", name);
            ctrl.submit().await;
            check(session)
        }

        NamedCommand::Delete { id } => {
            let store = store::<T>(session);
            let ctrl = deleter(session, store);
            ctrl.request_delete(EntityKey::Id(id)).await;
            check(session)
        }
    }
}
