use obb_core::{equity, FetchError, PriceService};
use serde::Serialize;
use tracing::warn;

use crate::cli::CompareArgs;

use super::{date_arg, normalize_symbol};

/// Period performance of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub symbol: String,
    pub records: usize,
    pub latest_close: f64,
    pub change_pct: Option<f64>,
}

/// Per-symbol outcomes of a `compare` run, in argument order.
#[derive(Debug, Default)]
pub struct CompareReport {
    pub rows: Vec<Comparison>,
    pub failures: Vec<(String, FetchError)>,
}

impl CompareReport {
    pub fn total(&self) -> usize {
        self.rows.len() + self.failures.len()
    }
}

/// Fetch each symbol in turn; a failing symbol is recorded, not fatal.
pub async fn run(args: &CompareArgs, service: &PriceService) -> CompareReport {
    let mut report = CompareReport::default();
    let start_date = date_arg(&args.start_date);
    let end_date = date_arg(&args.end_date);

    for raw in &args.symbols {
        let symbol = normalize_symbol(raw);
        let fetched = equity::price::historical(service, &symbol, start_date, end_date).await;

        match fetched.map(|result| result.summary()) {
            Ok(Some(summary)) => report.rows.push(Comparison {
                symbol,
                records: summary.records,
                latest_close: summary.latest_close,
                change_pct: summary.change_pct,
            }),
            Ok(None) => report.failures.push((symbol.clone(), FetchError::not_found(symbol))),
            Err(error) => {
                warn!(%symbol, %error, "compare: symbol failed");
                report.failures.push((symbol, error));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;

    use obb_core::{HistoricalProvider, HistoricalRequest, RawSeries, UpstreamError};
    use serde_json::json;

    use super::*;

    struct OneSymbol;

    impl HistoricalProvider for OneSymbol {
        fn name(&self) -> &'static str {
            "one-symbol"
        }

        fn historical<'a>(
            &'a self,
            req: &'a HistoricalRequest,
        ) -> Pin<Box<dyn Future<Output = Result<RawSeries, UpstreamError>> + Send + 'a>> {
            Box::pin(async move {
                if req.symbol != "AAPL" {
                    return Ok(RawSeries::default());
                }
                Ok(RawSeries::new(
                    vec!["date".into(), "open".into(), "high".into(), "low".into(), "close".into()],
                    vec![
                        vec![json!("2024-01-02"), json!(10.0), json!(11.0), json!(9.0), json!(10.0)],
                        vec![json!("2024-01-03"), json!(10.0), json!(12.0), json!(9.5), json!(11.0)],
                    ],
                ))
            })
        }
    }

    #[tokio::test]
    async fn failing_symbol_does_not_stop_the_others() {
        let service = PriceService::new(Arc::new(OneSymbol));
        let args = CompareArgs {
            symbols: vec!["zzzz".into(), "aapl".into()],
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-05".into()),
        };

        let report = run(&args, &service).await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].symbol, "AAPL");
        assert_eq!(report.rows[0].latest_close, 11.0);
        let change = report.rows[0].change_pct.expect("change is defined");
        assert!((change - 10.0).abs() < 1e-9);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "ZZZZ");
        assert!(report.failures[0].1.is_not_found());
    }

    #[tokio::test]
    async fn padded_date_flags_are_accepted() {
        let service = PriceService::new(Arc::new(OneSymbol));
        let args = CompareArgs {
            symbols: vec!["AAPL".into()],
            start_date: Some(" 2024-01-01 ".into()),
            end_date: Some("2024-01-05\n".into()),
        };

        let report = run(&args, &service).await;

        assert!(report.failures.is_empty(), "{:?}", report.failures);
        assert_eq!(report.rows.len(), 1);
    }
}
