//! Upstream provider adapters.

pub mod yahoo;

pub use yahoo::YahooAdapter;
