//! Historical price fetch service.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::adapters::YahooAdapter;
use crate::domain::DateRange;
use crate::normalize::normalize_series;
use crate::provider::{HistoricalProvider, HistoricalRequest};
use crate::result::{FetchResult, SYMBOL_KEY};
use crate::{FetchError, UpstreamError, ValidationError};

/// Fetches, normalizes and wraps daily price history for one symbol.
///
/// The service holds no per-call state; clone it or share it behind an
/// `Arc` across concurrent requests.
#[derive(Clone)]
pub struct PriceService {
    provider: Arc<dyn HistoricalProvider>,
}

impl PriceService {
    pub fn new(provider: Arc<dyn HistoricalProvider>) -> Self {
        Self { provider }
    }

    /// Service backed by the Yahoo Finance chart API over reqwest.
    pub fn yahoo() -> Self {
        Self::new(Arc::new(YahooAdapter::default()))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetch daily bars for `symbol`.
    ///
    /// `start_date` and `end_date` are `YYYY-MM-DD` strings; when omitted they
    /// default to 365 days before today and today (UTC).
    ///
    /// # Errors
    ///
    /// - [`FetchError::Validation`] if the symbol is blank or a date is malformed
    /// - [`FetchError::NotFound`] if the provider has no rows for the query,
    ///   or the resolved start falls after the end
    /// - [`FetchError::Upstream`] for transport, provider or decoding failures
    pub async fn historical(
        &self,
        symbol: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<FetchResult, FetchError> {
        let range = DateRange::resolve(start_date, end_date)?;
        self.historical_in(symbol, range).await
    }

    /// Same as [`PriceService::historical`] with an already-resolved range.
    pub async fn historical_in(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<FetchResult, FetchError> {
        if symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }

        let provider = self.provider.name();
        if range.is_empty() {
            debug!(provider, symbol, %range, "range is empty, skipping upstream");
            return Err(FetchError::not_found(symbol));
        }

        debug!(provider, symbol, %range, "fetching historical prices");

        let request = HistoricalRequest::new(symbol, range);
        let series = self.provider.historical(&request).await.map_err(|error| {
            warn!(provider, symbol, %error, "upstream fetch failed");
            FetchError::Upstream(error)
        })?;

        if series.is_empty() {
            debug!(provider, symbol, "upstream returned no rows");
            return Err(FetchError::not_found(symbol));
        }

        let bars = normalize_series(&series).map_err(|error| {
            warn!(provider, symbol, %error, "upstream row failed validation");
            FetchError::Upstream(UpstreamError::malformed(provider, error.to_string()))
        })?;

        let metadata = BTreeMap::from([
            (SYMBOL_KEY.to_owned(), json!(symbol)),
            (String::from("start_date"), Value::String(range.start_iso())),
            (String::from("end_date"), Value::String(range.end_iso())),
            (String::from("provider"), json!(provider)),
        ]);

        debug!(provider, symbol, records = bars.len(), "historical prices normalized");
        Ok(FetchResult::new(bars, metadata))
    }
}

impl std::fmt::Debug for PriceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceService")
            .field("provider", &self.provider.name())
            .finish()
    }
}
