//! Brand command handlers.

use tabled::Tabled;

use stockpit_core::Brand;

use crate::cli::{GlobalOpts, NamedArgs};
use crate::error::CliError;
use crate::session::Session;

use super::util;

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Brand> for BrandRow {
    fn from(b: &Brand) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
        }
    }
}

pub async fn handle(
    session: &Session,
    args: NamedArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::handle_named::<Brand, _>(session, args.command, global, |b| BrandRow::from(b)).await
}
