mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod prompt;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref());

    match commands::run(&cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("{error:?}");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
