use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use obb_core::equity;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::params::{HistoricalQuery, DATE_PATTERN};
use crate::AppState;

pub const HISTORICAL_PRICE_PATH: &str = "/equity/price/historical";
pub const DOCS_PATH: &str = "/docs";

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "OpenBB Platform MVP API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": DOCS_PATH,
        "endpoints": { "historical_price": HISTORICAL_PRICE_PATH },
    }))
}

/// Endpoint index for `GET /docs`.
pub async fn docs() -> Json<Value> {
    Json(json!({
        "title": "OpenBB Platform MVP API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            {
                "method": "GET",
                "path": "/health",
                "summary": "Liveness check",
                "parameters": [],
            },
            {
                "method": "GET",
                "path": HISTORICAL_PRICE_PATH,
                "summary": "Daily OHLCV bars for one equity symbol",
                "parameters": [
                    { "name": "symbol", "in": "query", "required": true },
                    { "name": "start_date", "in": "query", "required": false, "pattern": DATE_PATTERN },
                    { "name": "end_date", "in": "query", "required": false, "pattern": DATE_PATTERN },
                ],
            },
        ],
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `GET /equity/price/historical?symbol=&start_date=&end_date=`
pub async fn historical_price(
    State(state): State<AppState>,
    query: Result<Query<HistoricalQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let params = query.validate()?;

    let result = equity::price::historical(
        state.service(),
        &params.symbol,
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )
    .await?;

    info!(symbol = %params.symbol, records = result.len(), "historical prices served");

    let data: Vec<Value> = result
        .bars()
        .iter()
        .map(|bar| Value::Object(bar.to_map()))
        .collect();
    let metadata = result.metadata();

    Ok(Json(json!({
        "success": true,
        "data": data,
        "metadata": {
            "symbol": params.symbol,
            "start_date": metadata.get("start_date"),
            "end_date": metadata.get("end_date"),
            "records": result.len(),
        },
    })))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
