//! Contract tests for the Yahoo adapter against an in-memory transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use obb_core::{
    DateRange, HistoricalProvider, HistoricalRequest, HttpClient, HttpError, HttpRequest,
    HttpResponse, UpstreamError, YahooAdapter,
};
use time::macros::date;

const CHART_OK: &str = r#"{
    "chart": {
        "result": [{
            "meta": { "symbol": "AAPL", "gmtoffset": -18000 },
            "timestamp": [1704205800, 1704292200, 1704465000],
            "indicators": {
                "quote": [{
                    "open":   [187.15, 184.22, 181.99],
                    "high":   [188.44, 185.88, 182.76],
                    "low":    [183.89, 183.43, 180.17],
                    "close":  [185.64, 184.25, 181.18],
                    "volume": [82488700, 58414500, 62303300]
                }]
            }
        }],
        "error": null
    }
}"#;

const CHART_NOT_FOUND: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

// ============================================================================
// Success path
// ============================================================================

#[test]
fn yahoo_chart_is_returned_as_provider_columns() {
    // Given a transport that answers with a three-day chart
    let client = ScriptedClient::responding(Ok(HttpResponse::ok_json(CHART_OK)));
    let adapter = YahooAdapter::new(client.clone());

    // When the adapter fetches the first week of January
    let series = block_on(adapter.historical(&request("AAPL")))
        .expect("chart should translate into a series");

    // Then rows keep provider order and column names
    assert_eq!(
        series.columns,
        vec!["Date", "Open", "High", "Low", "Close", "Volume"]
    );
    assert_eq!(series.len(), 3);
    assert_eq!(series.rows[0][0], "2024-01-02");
    assert_eq!(series.rows[2][0], "2024-01-05");
    assert_eq!(adapter.name(), "yahoo");
}

#[test]
fn request_targets_chart_endpoint_with_configured_timeout() {
    // Given an adapter pointed at a custom base url with a short timeout
    let client = ScriptedClient::responding(Ok(HttpResponse::ok_json(CHART_OK)));
    let adapter = YahooAdapter::new(client.clone())
        .with_base_url("http://chart.local/")
        .with_timeout_ms(1_500);

    // When a fetch is made
    block_on(adapter.historical(&request("BRK.B"))).expect("fetch should succeed");

    // Then exactly one GET goes to the chart path with browser headers
    let sent = client.requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0]
        .url
        .starts_with("http://chart.local/v8/finance/chart/BRK.B?period1=1704067200"));
    assert!(sent[0].url.contains("period2=1704499200"));
    assert_eq!(sent[0].timeout_ms, 1_500);
    assert!(sent[0].headers.contains_key("user-agent"));
}

// ============================================================================
// Unknown symbols and failures
// ============================================================================

#[test]
fn unknown_symbol_is_an_empty_series_not_an_error() {
    // Given Yahoo's 404 chart error for a delisted symbol
    let client = ScriptedClient::responding(Ok(HttpResponse::new(404, CHART_NOT_FOUND)));
    let adapter = YahooAdapter::new(client);

    // When the adapter fetches
    let series =
        block_on(adapter.historical(&request("ZZZZINVALID"))).expect("not found is not an error");

    // Then the series is empty
    assert!(series.is_empty());
}

#[test]
fn server_error_status_is_reported_with_code() {
    // Given a transport answering 503 with an HTML body
    let client = ScriptedClient::responding(Ok(HttpResponse::new(503, "<html>busy</html>")));
    let adapter = YahooAdapter::new(client);

    // When the adapter fetches
    let error = block_on(adapter.historical(&request("AAPL"))).expect_err("must fail");

    // Then the status surfaces as an upstream error
    assert_eq!(
        error,
        UpstreamError::Status {
            provider: "yahoo",
            status: 503
        }
    );
}

#[test]
fn transport_failure_becomes_transport_error() {
    // Given a transport that times out
    let client = ScriptedClient::responding(Err(HttpError::timeout("request timeout")));
    let adapter = YahooAdapter::new(client);

    // When the adapter fetches
    let error = block_on(adapter.historical(&request("AAPL"))).expect_err("must fail");

    // Then the transport message is kept and the timeout is called out
    match error {
        UpstreamError::Transport { provider, message } => {
            assert_eq!(provider, "yahoo");
            assert!(message.starts_with("timed out after "), "message was {message}");
            assert!(message.ends_with("ms: request timeout"), "message was {message}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn connection_failure_keeps_the_transport_message() {
    // Given a transport that cannot connect
    let client = ScriptedClient::responding(Err(HttpError::new("connection failed: refused")));
    let adapter = YahooAdapter::new(client);

    // When the adapter fetches
    let error = block_on(adapter.historical(&request("AAPL"))).expect_err("must fail");

    // Then the message is passed through without a timeout prefix
    assert_eq!(
        error,
        UpstreamError::Transport {
            provider: "yahoo",
            message: String::from("connection failed: refused"),
        }
    );
}

#[test]
fn non_json_success_body_is_malformed() {
    // Given a 200 response that is not chart JSON
    let client = ScriptedClient::responding(Ok(HttpResponse::ok_json("Will be right back")));
    let adapter = YahooAdapter::new(client);

    // When the adapter fetches
    let error = block_on(adapter.historical(&request("AAPL"))).expect_err("must fail");

    // Then it is a malformed upstream response
    assert!(matches!(error, UpstreamError::Malformed { .. }));
}

// ============================================================================
// Test doubles
// ============================================================================

fn request(symbol: &str) -> HistoricalRequest {
    HistoricalRequest::new(
        symbol,
        DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 05)),
    )
}

struct ScriptedClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    fn responding(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

impl HttpClient for ScriptedClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("lock").push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_noop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_noop,
    noop_raw_waker_noop,
    noop_raw_waker_noop,
);
