//! Wiremock fixtures standing in for the Yahoo Finance endpoints

use serde_json::{json, Value};
use stock_charts::models::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CRUMB: &str = "t3stCrumb";

/// Client configuration pointing every endpoint at the mock server
pub fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        cookie_url: format!("{}/consent", server.uri()),
        rate_limit_per_minute: 60_000,
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// Cookie and crumb endpoints; the session is expected to be set up once
pub async fn mount_session(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/consent"))
        .respond_with(ResponseTemplate::new(404).insert_header("set-cookie", "A3=d=session; Path=/"))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TEST_CRUMB))
        .expect(1)
        .mount(server)
        .await;
}

pub fn raw(value: f64) -> Value {
    json!({ "raw": value, "fmt": format!("{:.2}", value) })
}

/// quoteSummary payload; `None` fields come back as Yahoo's empty object
pub fn quote_summary_body(
    short_name: &str,
    forward_pe: Option<f64>,
    price_to_sales: Option<f64>,
    ev_to_ebitda: Option<f64>,
    price_to_book: Option<f64>,
) -> Value {
    let field = |v: Option<f64>| v.map(raw).unwrap_or_else(|| json!({}));
    json!({
        "quoteSummary": {
            "result": [{
                "price": { "shortName": short_name },
                "summaryDetail": {
                    "forwardPE": field(forward_pe),
                    "priceToSalesTrailing12Months": field(price_to_sales)
                },
                "defaultKeyStatistics": {
                    "enterpriseToEbitda": field(ev_to_ebitda),
                    "priceToBook": field(price_to_book)
                }
            }],
            "error": null
        }
    })
}

pub async fn mount_quote_summary(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v10/finance/quoteSummary/{}", symbol)))
        .and(query_param("crumb", TEST_CRUMB))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Chart payload for the given unix timestamps and closes
pub fn chart_body(timestamps: &[i64], closes: &[Option<f64>]) -> Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -18000 },
                "timestamp": timestamps,
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
}
