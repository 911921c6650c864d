use anyhow::Result;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::{ApiError, ApiRateLimiter, MarketDataProvider};
use crate::models::{Config, PricePoint, ValuationMetrics};

const QUOTE_SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

/// Chart endpoint response
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// quoteSummary endpoint response
#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetail>,
    #[serde(rename = "defaultKeyStatistics")]
    key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Deserialize)]
struct PriceModule {
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "forwardPE")]
    forward_pe: Option<YahooNumber>,
    #[serde(rename = "priceToSalesTrailing12Months")]
    price_to_sales: Option<YahooNumber>,
}

#[derive(Debug, Deserialize)]
struct KeyStatistics {
    #[serde(rename = "forwardPE")]
    forward_pe: Option<YahooNumber>,
    #[serde(rename = "enterpriseToEbitda")]
    enterprise_to_ebitda: Option<YahooNumber>,
    #[serde(rename = "priceToBook")]
    price_to_book: Option<YahooNumber>,
}

/// Yahoo wraps numbers as `{"raw": 12.3, "fmt": "12.30"}`; missing fields are `{}`
/// and some non-finite values arrive as strings like `"Infinity"`.
#[derive(Debug, Deserialize)]
struct YahooNumber {
    raw: Option<Value>,
}

fn raw_value(number: Option<&YahooNumber>) -> Option<f64> {
    number
        .and_then(|n| n.raw.as_ref())
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite())
}

impl QuoteSummaryResult {
    fn into_metrics(self, symbol: &str) -> ValuationMetrics {
        let detail = self.summary_detail.as_ref();
        let stats = self.key_statistics.as_ref();

        ValuationMetrics {
            symbol: symbol.to_string(),
            forward_pe: raw_value(detail.and_then(|d| d.forward_pe.as_ref()))
                .or_else(|| raw_value(stats.and_then(|s| s.forward_pe.as_ref()))),
            price_to_sales: raw_value(detail.and_then(|d| d.price_to_sales.as_ref())),
            ev_to_ebitda: raw_value(stats.and_then(|s| s.enterprise_to_ebitda.as_ref())),
            price_to_book: raw_value(stats.and_then(|s| s.price_to_book.as_ref())),
        }
    }
}

/// Yahoo Finance market data client
pub struct YahooClient {
    client: Client,
    base_url: String,
    cookie_url: String,
    rate_limiter: ApiRateLimiter,
    crumb: Arc<Mutex<Option<String>>>,
}

impl YahooClient {
    /// Create a new Yahoo client
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookie_url: config.cookie_url.clone(),
            rate_limiter: ApiRateLimiter::new(config.rate_limit_per_minute),
            crumb: Arc::new(Mutex::new(None)),
        })
    }

    /// Get the session crumb, establishing the cookie session on first use
    async fn get_crumb(&self) -> Result<String, ApiError> {
        let mut crumb_guard = self.crumb.lock().await;
        if let Some(crumb) = &*crumb_guard {
            return Ok(crumb.clone());
        }

        // The consent endpoint answers with an error page but still sets the session cookie
        self.rate_limiter.wait().await;
        debug!("Requesting session cookie from {}", self.cookie_url);
        let response = self.client.get(&self.cookie_url).send().await?;
        debug!("Cookie endpoint answered with status {}", response.status());

        self.rate_limiter.wait().await;
        let crumb_url = format!("{}/v1/test/getcrumb", self.base_url);
        debug!("Requesting crumb from {}", crumb_url);
        let response = self.client.get(&crumb_url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() {
            return Err(ApiError::EmptyCrumb);
        }

        info!("Established market data session");
        *crumb_guard = Some(crumb.clone());
        Ok(crumb)
    }

    /// Make a rate-limited GET request and decode the JSON body
    async fn make_request<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.rate_limiter.wait().await;

        debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    fn chart_url(&self, symbol: &str, period: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/v8/finance/chart/{}", self.base_url, symbol))?;
        url.query_pairs_mut()
            .append_pair("range", period)
            .append_pair("interval", "1d")
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    async fn get_quote_summary(&self, symbol: &str) -> Result<QuoteSummaryResult, ApiError> {
        let crumb = self.get_crumb().await?;

        let mut url = Url::parse(&format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol))?;
        url.query_pairs_mut()
            .append_pair("modules", QUOTE_SUMMARY_MODULES)
            .append_pair("crumb", &crumb);

        let envelope: QuoteSummaryEnvelope = self.make_request(url).await?;
        let body = envelope.quote_summary;

        match body.result.and_then(|results| results.into_iter().next()) {
            Some(result) => Ok(result),
            None => Err(ApiError::NoData {
                symbol: symbol.to_string(),
                reason: body
                    .error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "empty quoteSummary result".to_string()),
            }),
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooClient {
    async fn get_display_name(&self, symbol: &str) -> Result<Option<String>> {
        let summary = self.get_quote_summary(symbol).await?;
        Ok(summary.price.and_then(|p| p.short_name))
    }

    async fn get_price_history(&self, symbol: &str, period: &str) -> Result<Vec<PricePoint>> {
        let url = self.chart_url(symbol, period)?;
        let envelope: ChartEnvelope = self.make_request(url).await?;

        let result = match envelope.chart.result.and_then(|results| results.into_iter().next()) {
            Some(result) => result,
            None => {
                return Err(ApiError::NoData {
                    symbol: symbol.to_string(),
                    reason: envelope
                        .chart
                        .error
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "empty chart result".to_string()),
                }
                .into())
            }
        };

        let offset = result.meta.gmtoffset;
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let mut points = Vec::with_capacity(result.timestamp.len());
        for (timestamp, close) in result.timestamp.iter().zip(closes) {
            let Some(close) = close else { continue };
            match DateTime::from_timestamp(timestamp + offset, 0) {
                Some(datetime) => points.push(PricePoint {
                    date: datetime.date_naive(),
                    close,
                }),
                None => warn!("Skipping out-of-range timestamp {} for {}", timestamp, symbol),
            }
        }

        debug!("Retrieved {} closing prices for {} over {}", points.len(), symbol, period);
        Ok(points)
    }

    async fn get_valuation_metrics(&self, symbol: &str) -> Result<ValuationMetrics> {
        let summary = self.get_quote_summary(symbol).await?;
        let metrics = summary.into_metrics(symbol);
        debug!("Valuation metrics for {}: {:?}", symbol, metrics);
        Ok(metrics)
    }
}
