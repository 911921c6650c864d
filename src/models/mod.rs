use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One closing price on one trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing-price series for one ticker over a requested period
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub symbol: String,
    pub display_name: Option<String>,
    pub period: String,
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn new(
        symbol: &str,
        display_name: Option<String>,
        period: &str,
        points: Vec<PricePoint>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            display_name,
            period: period.to_string(),
            points,
        }
    }

    /// Chart title, e.g. `Stock Prices of Apple Inc. (AAPL) Over 1y`.
    ///
    /// Falls back to the ticker when the data source has no short name.
    pub fn title(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or(&self.symbol);
        format!("Stock Prices of {} ({}) Over {}", name, self.symbol, self.period)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn summary(&self) -> Option<PriceSummary> {
        let first = self.points.first()?.close;
        let last = self.points.last()?.close;
        let high = self.points.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);
        let low = self.points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
        let total_return = if first != 0.0 {
            ((last - first) / first) * 100.0
        } else {
            0.0
        };

        Some(PriceSummary {
            first,
            last,
            total_return,
            high,
            low,
            records: self.points.len(),
        })
    }
}

/// Basic statistics over a closing-price series
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub first: f64,
    pub last: f64,
    /// Percent change from first to last close
    pub total_return: f64,
    pub high: f64,
    pub low: f64,
    pub records: usize,
}

/// The four valuation ratios compared across companies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuationMetric {
    ForwardPe,
    PriceToSales,
    EvToEbitda,
    PriceToBook,
}

impl ValuationMetric {
    /// Panel order in the comparison grid: top-left, top-right, bottom-left, bottom-right
    pub const ALL: [ValuationMetric; 4] = [
        ValuationMetric::ForwardPe,
        ValuationMetric::PriceToSales,
        ValuationMetric::EvToEbitda,
        ValuationMetric::PriceToBook,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ValuationMetric::ForwardPe => "P/E Ratio Comparison",
            ValuationMetric::PriceToSales => "P/S Ratio Comparison",
            ValuationMetric::EvToEbitda => "EV/EBITDA Comparison",
            ValuationMetric::PriceToBook => "P/B Ratio Comparison",
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            ValuationMetric::ForwardPe => "P/E Ratio",
            ValuationMetric::PriceToSales => "P/S Ratio",
            ValuationMetric::EvToEbitda => "EV/EBITDA",
            ValuationMetric::PriceToBook => "P/B Ratio",
        }
    }
}

/// Valuation ratios for one ticker; `None` where the data source has no value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuationMetrics {
    pub symbol: String,
    pub forward_pe: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub ev_to_ebitda: Option<f64>,
    pub price_to_book: Option<f64>,
}

impl ValuationMetrics {
    pub fn get(&self, metric: ValuationMetric) -> Option<f64> {
        match metric {
            ValuationMetric::ForwardPe => self.forward_pe,
            ValuationMetric::PriceToSales => self.price_to_sales,
            ValuationMetric::EvToEbitda => self.ev_to_ebitda,
            ValuationMetric::PriceToBook => self.price_to_book,
        }
    }
}

/// Ordered rows of valuation ratios, one per ticker
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricTable {
    rows: Vec<ValuationMetrics>,
}

impl MetricTable {
    pub fn new(rows: Vec<ValuationMetrics>) -> Self {
        Self { rows }
    }

    /// Drop every ticker without a P/E ratio, keeping input order.
    ///
    /// The other three ratios are carried through untouched, missing or not.
    pub fn retain_with_pe(self) -> Self {
        let rows = self
            .rows
            .into_iter()
            .filter(|row| {
                let keep = row.forward_pe.is_some();
                if !keep {
                    info!("Dropping {} from comparison: no P/E ratio", row.symbol);
                }
                keep
            })
            .collect();
        Self { rows }
    }

    pub fn tickers(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.symbol.clone()).collect()
    }

    /// Values of one metric, index-aligned with `tickers()`
    pub fn values(&self, metric: ValuationMetric) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.get(metric)).collect()
    }

    pub fn rows(&self) -> &[ValuationMetrics] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub cookie_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub rate_limit_per_minute: u32,
}

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            rate_limit_per_minute: 120,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build a config from any key lookup; unset or unparsable values keep their defaults
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        Config {
            base_url: get("MARKET_DATA_BASE_URL").unwrap_or(defaults.base_url),
            cookie_url: get("MARKET_DATA_COOKIE_URL").unwrap_or(defaults.cookie_url),
            user_agent: get("MARKET_DATA_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            rate_limit_per_minute: get("RATE_LIMIT_PER_MINUTE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.rate_limit_per_minute),
        }
    }
}
