mod compare;
mod historical;

use std::sync::Arc;

use obb_core::{FetchResult, PriceService, YahooAdapter};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use compare::{CompareReport, Comparison};

/// What a command produced, before rendering.
#[derive(Debug)]
pub enum CommandOutput {
    Historical {
        result: FetchResult,
        tail: Option<usize>,
    },
    Compare(CompareReport),
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let service = price_service(cli);

    match &cli.command {
        Command::Historical(args) => {
            let result = historical::run(args, &service).await?;
            Ok(CommandOutput::Historical {
                result,
                tail: args.tail,
            })
        }
        Command::Compare(args) => Ok(CommandOutput::Compare(compare::run(args, &service).await)),
    }
}

fn price_service(cli: &Cli) -> PriceService {
    let adapter = YahooAdapter::default()
        .with_base_url(&cli.yahoo_base_url)
        .with_timeout_ms(cli.upstream_timeout_ms);
    PriceService::new(Arc::new(adapter))
}

/// Symbols are matched case-insensitively upstream; show them upper-cased.
fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Date flags may arrive padded from scripts; core parsing is strict.
fn date_arg(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim)
}
