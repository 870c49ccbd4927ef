use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::{date_from_unix_seconds, format_iso_date, DateRange};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::provider::{HistoricalProvider, HistoricalRequest, RawSeries};
use crate::UpstreamError;

pub const PROVIDER_NAME: &str = "yahoo";
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const NOT_FOUND_CODE: &str = "Not Found";

/// Column names emitted by this adapter, in the order Yahoo users know them.
const COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];
const ADJ_CLOSE_COLUMN: &str = "Adj Close";

/// Daily history from the Yahoo Finance v8 chart endpoint.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chart URL covering `[start, end]`; Yahoo treats `period2` as
    /// exclusive, so it points at the midnight after `end`.
    pub fn chart_url(&self, req: &HistoricalRequest) -> String {
        let period1 = req.range.start.midnight().assume_utc().unix_timestamp();
        let after_end = req.range.end.next_day().unwrap_or(req.range.end);
        let period2 = after_end.midnight().assume_utc().unix_timestamp();

        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.base_url,
            urlencoding::encode(&req.symbol),
            period1,
            period2,
        )
    }

    async fn fetch_series(&self, req: &HistoricalRequest) -> Result<RawSeries, UpstreamError> {
        let url = self.chart_url(req);
        debug!(provider = PROVIDER_NAME, %url, "requesting chart");

        let request = HttpRequest::get(url)
            .with_header("user-agent", BROWSER_USER_AGENT)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| {
                let message = if error.timed_out() {
                    format!("timed out after {} ms: {}", self.timeout_ms, error.message())
                } else {
                    error.message().to_owned()
                };
                UpstreamError::Transport {
                    provider: PROVIDER_NAME,
                    message,
                }
            })?;

        if !response.is_success() {
            // Unknown symbols come back as 404 with a chart error body.
            if is_not_found_body(&response.body) {
                return Ok(RawSeries::empty(column_names(false)));
            }
            return Err(UpstreamError::Status {
                provider: PROVIDER_NAME,
                status: response.status,
            });
        }

        chart_to_series(&response.body, &req.range)
    }
}

impl HistoricalProvider for YahooAdapter {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn historical<'a>(
        &'a self,
        req: &'a HistoricalRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawSeries, UpstreamError>> + Send + 'a>> {
        Box::pin(self.fetch_series(req))
    }
}

/// Translate a chart response body into a raw series limited to `range`.
///
/// Bar dates are taken in the exchange's own UTC offset. Rows where every
/// price is null (halted days, padding) are skipped; partially-null rows are
/// kept so normalization can reject them.
pub fn chart_to_series(body: &str, range: &DateRange) -> Result<RawSeries, UpstreamError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::malformed(PROVIDER_NAME, format!("chart body: {e}")))?;

    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case(NOT_FOUND_CODE) {
            return Ok(RawSeries::empty(column_names(false)));
        }
        let message = match error.description {
            Some(description) => format!("{}: {description}", error.code),
            None => error.code,
        };
        return Err(UpstreamError::provider(PROVIDER_NAME, message));
    }

    let Some(result) = response.chart.result.and_then(|results| results.into_iter().next())
    else {
        return Ok(RawSeries::empty(column_names(false)));
    };

    let Some(timestamps) = result.timestamp else {
        return Ok(RawSeries::empty(column_names(false)));
    };

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::malformed(PROVIDER_NAME, "chart has timestamps but no quote"))?;

    let adjclose = result
        .indicators
        .adjclose
        .and_then(|series| series.into_iter().next())
        .map(|series| series.adjclose);

    let gmt_offset = result.meta.and_then(|meta| meta.gmtoffset).unwrap_or(0);

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = date_from_unix_seconds(ts.saturating_add(gmt_offset))
            .map_err(|e| UpstreamError::malformed(PROVIDER_NAME, e.to_string()))?;
        if !range.contains(date) {
            continue;
        }

        let open = cell(&quote.open, i);
        let high = cell(&quote.high, i);
        let low = cell(&quote.low, i);
        let close = cell(&quote.close, i);
        if [open, high, low, close].iter().all(Option::is_none) {
            continue;
        }

        let mut row = vec![
            Value::String(format_iso_date(date)),
            number(open),
            number(high),
            number(low),
            number(close),
            number(cell(&quote.volume, i)),
        ];
        if let Some(adjclose) = &adjclose {
            row.push(number(cell(adjclose, i)));
        }
        rows.push(row);
    }

    Ok(RawSeries::new(column_names(adjclose.is_some()), rows))
}

fn is_not_found_body(body: &str) -> bool {
    serde_json::from_str::<ChartResponse>(body)
        .ok()
        .and_then(|response| response.chart.error)
        .is_some_and(|error| error.code.eq_ignore_ascii_case(NOT_FOUND_CODE))
}

fn column_names(with_adj_close: bool) -> Vec<String> {
    let mut columns: Vec<String> = COLUMNS.iter().map(|name| (*name).to_owned()).collect();
    if with_adj_close {
        columns.push(String::from(ADJ_CLOSE_COLUMN));
    }
    columns
}

fn cell(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn number(value: Option<f64>) -> Value {
    value.map_or(Value::Null, |value| json!(value))
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
    #[serde(default)]
    adjclose: Option<Vec<ChartAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}
