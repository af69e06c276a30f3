//! Application settings command handlers.

use std::sync::Arc;

use tabled::Tabled;

use stockpit_core::{CoreError, EntityKey, Resource, Setting};

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand};
use crate::error::CliError;
use crate::output;
use crate::session::Session;

use super::util;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Setting> for SettingRow {
    fn from(s: &Setting) -> Self {
        Self {
            key: s.key.clone(),
            value: s.value.clone(),
            description: s.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    session: &Session,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SettingsCommand::List { key } => {
            let store = util::store::<Setting>(session);
            if let Some(key) = key {
                store.set_filter_field("key", &key);
            }
            store.apply_filter().await;
            util::check(session)?;
            let snap = store.snapshot();
            let out =
                output::render_list(&session.output, &snap, |s| SettingRow::from(s), |s| s.key.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SettingsCommand::Create {
            key,
            value,
            description,
        } => {
            let store = util::store::<Setting>(session);
            let ctrl = util::submitter(session, store);
            ctrl.open_create();
            ctrl.set_field("key", key);
            ctrl.set_field("value", value);
            if let Some(description) = description {
                ctrl.set_field("description", description);
            }
            ctrl.submit().await;
            util::check(session)
        }

        SettingsCommand::Edit {
            key,
            value,
            description,
        } => {
            let store = util::store::<Setting>(session);
            let setting =
                util::find_entity(session, &store, &EntityKey::Key(key)).await?;
            let ctrl = util::submitter(session, Arc::clone(&store));
            ctrl.open_edit(&setting);
            if let Some(value) = value {
                ctrl.set_field("value", value);
            }
            if let Some(description) = description {
                ctrl.set_field("description", description);
            }
            ctrl.submit().await;
            util::check(session)
        }

        SettingsCommand::Delete { key } => {
            let store = util::store::<Setting>(session);
            let ctrl = util::deleter(session, store);
            ctrl.request_delete(EntityKey::Key(key)).await;
            util::check(session)
        }

        SettingsCommand::Apply { file } => {
            let contents = std::fs::read_to_string(&file)?;
            let records: Vec<Setting> = serde_json::from_str(&contents)?;
            let count = records.len();

            session
                .client
                .replace_all(Setting::descriptor().base_path, &records)
                .await
                .map_err(|e| CliError::OperationFailed {
                    message: CoreError::from(e).user_message(),
                })?;

            if !global.quiet {
                eprintln!("Applied {count} settings");
            }
            Ok(())
        }
    }
}
