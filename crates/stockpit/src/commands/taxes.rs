//! Tax rate command handlers.

use std::sync::Arc;

use tabled::Tabled;

use stockpit_core::{EntityKey, Tax};

use crate::cli::{GlobalOpts, TaxesArgs, TaxesCommand};
use crate::error::CliError;
use crate::output;
use crate::session::Session;

use super::util;

#[derive(Tabled)]
struct TaxRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rate %")]
    rate: f64,
}

impl From<&Tax> for TaxRow {
    fn from(t: &Tax) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            rate: t.rate,
        }
    }
}

pub async fn handle(
    session: &Session,
    args: TaxesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TaxesCommand::List { name } => {
            let store = util::store::<Tax>(session);
            if let Some(name) = name {
                store.set_filter_field("name", &name);
            }
            store.apply_filter().await;
            util::check(session)?;
            let snap = store.snapshot();
            let out =
                output::render_list(&session.output, &snap, |t| TaxRow::from(t), |t| t.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TaxesCommand::Create { name, rate } => {
            let store = util::store::<Tax>(session);
            let ctrl = util::submitter(session, store);
            ctrl.open_create();
            ctrl.set_field("name", name);
            ctrl.set_field("rate", rate);
            ctrl.submit().await;
            util::check(session)
        }

        TaxesCommand::Edit { id, name, rate } => {
            let store = util::store::<Tax>(session);
            let tax = util::find_entity(session, &store, &EntityKey::Id(id)).await?;
            let ctrl = util::submitter(session, Arc::clone(&store));
            // The draft is seeded from the current values; flags override
            // individual fields.
            ctrl.open_edit(&tax);
            if let Some(name) = name {
                ctrl.set_field("name", name);
            }
            if let Some(rate) = rate {
                ctrl.set_field("rate", rate);
            }
            ctrl.submit().await;
            util::check(session)
        }

        TaxesCommand::Delete { id } => {
            let store = util::store::<Tax>(session);
            let ctrl = util::deleter(session, store);
            ctrl.request_delete(EntityKey::Id(id)).await;
            util::check(session)
        }
    }
}
