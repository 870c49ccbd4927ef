//! # obb Core
//!
//! Historical equity prices from an upstream market-data provider,
//! normalized into typed bars.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance chart API) |
//! | [`domain`] | Domain models (`HistoricalBar`, `DateRange`) |
//! | [`equity`] | Namespaced call surface (`equity::price::historical`) |
//! | [`error`] | Validation, upstream and fetch errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`normalize`] | Provider column mapping table and row normalization |
//! | [`provider`] | Upstream provider contract |
//! | [`result`] | `FetchResult` with table and dict views |
//! | [`service`] | `PriceService`, the fetch pipeline |
//! | [`summary`] | Period statistics over a result |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ equity::price       │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐     ┌──────────────────┐
//! │ PriceService        │────▶│ normalize        │
//! └──────────┬──────────┘     │ (COLUMN_MAP)     │
//!            │                └──────────────────┘
//!            ▼
//! ┌─────────────────────┐     ┌──────────────────┐
//! │ HistoricalProvider  │────▶│ HttpClient       │
//! │ (YahooAdapter)      │     │ (reqwest)        │
//! └─────────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Fetches fail with [`FetchError`]. Callers that need the coarse
//! "no data" versus "something broke" split use
//! [`FetchError::is_not_found`]:
//!
//! ```rust
//! use obb_core::FetchError;
//!
//! fn status_for(error: &FetchError) -> u16 {
//!     if error.is_not_found() { 404 } else { 500 }
//! }
//!
//! assert_eq!(status_for(&FetchError::not_found("ZZZZ")), 404);
//! ```

pub mod adapters;
pub mod domain;
pub mod equity;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod provider;
pub mod result;
pub mod service;
pub mod summary;

pub use adapters::YahooAdapter;

pub use domain::{BarField, DateRange, HistoricalBar};

pub use error::{FetchError, UpstreamError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use provider::{HistoricalProvider, HistoricalRequest, RawSeries};

pub use result::FetchResult;

pub use service::PriceService;

pub use summary::SeriesSummary;
