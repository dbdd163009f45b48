//! Command dispatch: bridges CLI args -> core lifecycle -> output formatting.

pub mod schema;
pub mod team;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Schema => schema::handle(global),
        Command::Team(args) => team::handle(args, global).await,
        Command::Completions(_) => Ok(()),
    }
}
