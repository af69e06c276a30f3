//! Measurement unit command handlers.

use tabled::Tabled;

use stockpit_core::Unit;

use crate::cli::{GlobalOpts, NamedArgs};
use crate::error::CliError;
use crate::session::Session;

use super::util;

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Unit> for UnitRow {
    fn from(u: &Unit) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
        }
    }
}

pub async fn handle(
    session: &Session,
    args: NamedArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::handle_named::<Unit, _>(session, args.command, global, |u| UnitRow::from(u)).await
}
