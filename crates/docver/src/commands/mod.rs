mod purge;
mod sync;

use crate::cli::Command;
use crate::error::CliError;

pub async fn run(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Purge(args) => purge::run(args).await,
        Command::Synchronize(args) => sync::run(args),
    }
}
