//! Result wrapper returned by historical price fetches.
//!
//! A [`FetchResult`] is an immutable snapshot: the bars in upstream order
//! plus a metadata map. It offers two independent views over the same data,
//! [`FetchResult::to_table`] (a polars `DataFrame`) for analysis and
//! [`FetchResult::to_dict`] for JSON payloads.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use polars::prelude::{Column, DataFrame, DataType, PolarsResult};
use serde_json::{json, Map, Value};
use time::macros::date;
use time::Date;

use crate::domain::{BarField, HistoricalBar};
use crate::summary::SeriesSummary;

/// Metadata key holding the queried symbol.
pub const SYMBOL_KEY: &str = "symbol";

/// Day zero of polars' `Date` physical representation.
const UNIX_EPOCH: Date = date!(1970 - 01 - 01);

/// Bars for one query plus descriptive metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    bars: Vec<HistoricalBar>,
    metadata: BTreeMap<String, Value>,
}

impl FetchResult {
    pub fn new(bars: Vec<HistoricalBar>, metadata: BTreeMap<String, Value>) -> Self {
        Self { bars, metadata }
    }

    pub fn bars(&self) -> &[HistoricalBar] {
        &self.bars
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn symbol(&self) -> Option<&str> {
        self.metadata.get(SYMBOL_KEY).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// One row per bar with typed columns: `date` (`Date`), `open`, `high`,
    /// `low`, `close` (`Float64`) and `volume` (nullable `Float64`).
    ///
    /// An empty result yields an empty frame with neither columns nor rows.
    pub fn to_table(&self) -> PolarsResult<DataFrame> {
        if self.bars.is_empty() {
            return Ok(DataFrame::empty());
        }

        let dates: Vec<i32> = self
            .bars
            .iter()
            .map(|bar| (bar.date() - UNIX_EPOCH).whole_days() as i32)
            .collect();
        let prices = |price: fn(&HistoricalBar) -> f64| -> Vec<f64> {
            self.bars.iter().map(price).collect()
        };
        let volumes: Vec<Option<f64>> = self.bars.iter().map(HistoricalBar::volume).collect();

        DataFrame::new(vec![
            Column::new(BarField::Date.as_str().into(), dates).cast(&DataType::Date)?,
            Column::new(BarField::Open.as_str().into(), prices(HistoricalBar::open)),
            Column::new(BarField::High.as_str().into(), prices(HistoricalBar::high)),
            Column::new(BarField::Low.as_str().into(), prices(HistoricalBar::low)),
            Column::new(BarField::Close.as_str().into(), prices(HistoricalBar::close)),
            Column::new(BarField::Volume.as_str().into(), volumes),
        ])
    }

    /// `{"data": [bar, ...], "metadata": {...}}`.
    pub fn to_dict(&self) -> Value {
        let data: Vec<Value> = self
            .bars
            .iter()
            .map(|bar| Value::Object(bar.to_map()))
            .collect();
        let metadata: Map<String, Value> = self
            .metadata
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        json!({ "data": data, "metadata": metadata })
    }

    /// Period statistics, or `None` when there are no bars.
    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::from_bars(&self.bars)
    }
}

impl Display for FetchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FetchResult(data={} records, metadata={{", self.bars.len())?;
        for (index, (key, value)) in self.metadata.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("})")
    }
}
