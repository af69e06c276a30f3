//! User role command handlers.

use tabled::Tabled;

use stockpit_core::Role;

use crate::cli::{GlobalOpts, NamedArgs};
use crate::error::CliError;
use crate::session::Session;

use super::util;

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Role> for RoleRow {
    fn from(r: &Role) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
        }
    }
}

pub async fn handle(
    session: &Session,
    args: NamedArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::handle_named::<Role, _>(session, args.command, global, |r| RoleRow::from(r)).await
}
