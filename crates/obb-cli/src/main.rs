mod cli;
mod commands;
mod error;
mod output;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::CommandOutput;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let output = commands::run(&cli).await?;

    let mut stdout = std::io::stdout().lock();
    output::render(&output, cli.format, cli.pretty, &mut stdout)?;
    stdout.flush()?;

    if let CommandOutput::Compare(report) = &output {
        output::render_failures(report, &mut std::io::stderr().lock())?;
        if !report.failures.is_empty() {
            return Err(CliError::PartialFailure {
                failed: report.failures.len(),
                total: report.total(),
            });
        }
    }

    Ok(())
}
