//! # Domain Models
//!
//! Canonical types for historical equity prices.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HistoricalBar`] | One trading-day OHLCV observation |
//! | [`BarField`] | Canonical bar field / column names |
//! | [`DateRange`] | Resolved closed date range for a query |
//!
//! Dates are plain calendar dates (`time::Date`) and always render as
//! `YYYY-MM-DD`:
//!
//! ```rust
//! use obb_core::domain::{format_iso_date, parse_iso_date};
//!
//! let date = parse_iso_date("2024-01-05").unwrap();
//! assert_eq!(format_iso_date(date), "2024-01-05");
//! ```

mod bar;
mod date;
mod range;

pub use bar::{BarField, HistoricalBar};
pub(crate) use date::iso_date;
pub use date::{date_from_unix_seconds, format_iso_date, parse_date_text, parse_iso_date};
pub use range::{DateRange, DEFAULT_LOOKBACK_DAYS};
