//! Rendering of command output to a writer.

use std::io::Write;

use obb_core::{FetchResult, SeriesSummary};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::{CommandOutput, CompareReport};
use crate::error::CliError;

pub fn render(
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match output {
        CommandOutput::Historical { result, tail } => {
            render_historical(result, *tail, format, pretty, out)
        }
        CommandOutput::Compare(report) => render_compare(report, format, pretty, out),
    }
}

/// One `SYMBOL: error` line per failed symbol.
pub fn render_failures(report: &CompareReport, err: &mut impl Write) -> Result<(), CliError> {
    for (symbol, error) in &report.failures {
        writeln!(err, "{symbol}: {error}")?;
    }
    Ok(())
}

fn render_historical(
    result: &FetchResult,
    tail: Option<usize>,
    format: OutputFormat,
    pretty: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let mut dict = result.to_dict();
            if let (Some(n), Some(Value::Array(data))) = (tail, dict.get_mut("data")) {
                let skip = data.len().saturating_sub(n);
                data.drain(..skip);
            }
            write_json(&dict, pretty, out)
        }
        OutputFormat::Table => {
            writeln!(out, "{result}")?;
            let table = result.to_table()?;
            let table = match tail {
                Some(n) => table.tail(Some(n)),
                None => table,
            };
            writeln!(out, "{table}")?;
            if let Some(summary) = result.summary() {
                writeln!(out)?;
                write_summary(&summary, out)?;
            }
            Ok(())
        }
    }
}

fn write_summary(summary: &SeriesSummary, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(
        out,
        "Period:        {} to {} ({} records)",
        summary.first_date, summary.last_date, summary.records
    )?;
    writeln!(out, "Latest close:  {:.2}", summary.latest_close)?;
    writeln!(out, "Period high:   {:.2}", summary.period_high)?;
    writeln!(out, "Period low:    {:.2}", summary.period_low)?;
    if let Some(volume) = summary.average_volume {
        writeln!(out, "Avg volume:    {volume:.0}")?;
    }
    if let Some(change) = summary.change_pct {
        writeln!(out, "Change:        {change:+.2}%")?;
    }
    Ok(())
}

fn render_compare(
    report: &CompareReport,
    format: OutputFormat,
    pretty: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(&serde_json::to_value(&report.rows)?, pretty, out),
        OutputFormat::Table => {
            writeln!(out, "{:<10} {:>8} {:>14} {:>10}", "symbol", "records", "latest_close", "change")?;
            for row in &report.rows {
                let change = row
                    .change_pct
                    .map_or_else(|| String::from("n/a"), |change| format!("{change:+.2}%"));
                writeln!(
                    out,
                    "{:<10} {:>8} {:>14.2} {:>10}",
                    row.symbol, row.records, row.latest_close, change
                )?;
            }
            Ok(())
        }
    }
}

fn write_json(value: &Value, pretty: bool, out: &mut impl Write) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
