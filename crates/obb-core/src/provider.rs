//! Upstream provider contract.
//!
//! A [`HistoricalProvider`] returns a [`RawSeries`]: the provider's own
//! column names and loosely-typed cells, in the provider's row order. Turning
//! that into canonical bars is the job of [`crate::normalize`], so adapters
//! stay thin and the set of recognized column names lives in one place.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::domain::DateRange;
use crate::UpstreamError;

/// Symbol and resolved date range for one historical query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalRequest {
    pub symbol: String,
    pub range: DateRange,
}

impl HistoricalRequest {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
        }
    }
}

/// Provider-shaped table, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RawSeries {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Series with columns but no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Upstream market-data source for daily historical prices.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request the service handles.
pub trait HistoricalProvider: Send + Sync {
    /// Short provider name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Fetch daily rows for `req.symbol` within `req.range` (both ends
    /// inclusive). Unknown symbols and empty periods return an empty series
    /// rather than an error.
    fn historical<'a>(
        &'a self,
        req: &'a HistoricalRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawSeries, UpstreamError>> + Send + 'a>>;
}
