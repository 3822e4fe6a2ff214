use clap::Parser as _;
use tracing::debug;

use crate::{
    application::{Application, ApplicationError},
    cli::Cli,
};

mod application;
mod cli;
mod ext;
mod filesystem;
mod parser;
mod report;

#[snafu::report]
fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    report::init_color();
    debug!("Parsed CLI arguments: {cli_args:?}");

    let outcome = Application::run(cli_args)?;

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = report::write_outcome(&mut stdout, &outcome) {
        debug!("Failed to write the run summary: {err}");
    }

    Ok(())
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.max_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
