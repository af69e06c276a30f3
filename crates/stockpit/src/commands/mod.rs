//! Command handlers: one module per managed collection, plus config.

pub mod brands;
pub mod config_cmd;
pub mod roles;
pub mod settings;
pub mod taxes;
pub mod units;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::session::Session;

/// Route a resource command to its handler.
pub async fn dispatch(
    command: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Brands(args) => brands::handle(session, args, global).await,
        Command::Units(args) => units::handle(session, args, global).await,
        Command::Roles(args) => roles::handle(session, args, global).await,
        Command::Taxes(args) => taxes::handle(session, args, global).await,
        Command::Settings(args) => settings::handle(session, args, global).await,
        // Handled before a session is built.
        Command::Config(_) => Ok(()),
    }
}
