use obb_core::{equity, FetchResult, PriceService};
use tracing::debug;

use crate::cli::HistoricalArgs;
use crate::error::CliError;

use super::{date_arg, normalize_symbol};

pub async fn run(args: &HistoricalArgs, service: &PriceService) -> Result<FetchResult, CliError> {
    let symbol = normalize_symbol(&args.symbol);
    let start_date = date_arg(&args.start_date);
    let end_date = date_arg(&args.end_date);
    debug!(%symbol, start = ?start_date, end = ?end_date, "historical command");

    let result = equity::price::historical(service, &symbol, start_date, end_date)
    .await?;

    Ok(result)
}
