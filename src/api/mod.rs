use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::models::{PricePoint, ValuationMetrics};

pub mod error;
pub mod yahoo_client;
pub use error::ApiError;
pub use yahoo_client::YahooClient;

/// Simple rate limiter for API requests
pub struct ApiRateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ApiRateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let delay_ms = if requests_per_minute > 0 {
            60_000 / requests_per_minute as u64
        } else {
            1000 // Default 1 second delay
        };

        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: Mutex::new(None),
        }
    }

    /// Wait until at least one interval has passed since the previous request.
    /// The first call returns immediately.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Source of price history and fundamentals for the chart reports
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Issuer short name, if the data source has one
    async fn get_display_name(&self, symbol: &str) -> Result<Option<String>>;

    /// Daily closing prices over a period keyword such as `1y` or `ytd`
    async fn get_price_history(&self, symbol: &str, period: &str) -> Result<Vec<PricePoint>>;

    async fn get_valuation_metrics(&self, symbol: &str) -> Result<ValuationMetrics>;
}
