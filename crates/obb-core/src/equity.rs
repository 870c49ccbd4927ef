//! Stable call surface for equity data.
//!
//! ```rust,ignore
//! use obb_core::{equity, PriceService};
//!
//! let service = PriceService::yahoo();
//! let result = equity::price::historical(&service, "AAPL", Some("2024-01-01"), None).await?;
//! println!("{}", result.to_table()?.tail(Some(5)));
//! ```

pub mod price {
    use crate::{FetchError, FetchResult, PriceService};

    /// Daily price history for `symbol`; see [`PriceService::historical`].
    pub async fn historical(
        service: &PriceService,
        symbol: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<FetchResult, FetchError> {
        service.historical(symbol, start_date, end_date).await
    }
}
