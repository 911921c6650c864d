//! Common test utilities and helpers

pub mod mock_server;

/// Test data utilities
pub mod test_data {
    use chrono::NaiveDate;
    use stock_charts::models::{PricePoint, ValuationMetrics};

    /// Create valuation metrics with fixed non-P/E ratios
    pub fn create_test_metrics(symbol: &str, forward_pe: Option<f64>) -> ValuationMetrics {
        ValuationMetrics {
            symbol: symbol.to_string(),
            forward_pe,
            price_to_sales: Some(4.0),
            ev_to_ebitda: Some(15.0),
            price_to_book: Some(2.5),
        }
    }

    /// Consecutive daily closes starting at 100.0 and rising by 1.0
    pub fn create_test_price_points(days: i64) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        (0..days)
            .map(|i| PricePoint {
                date: start + chrono::Duration::days(i),
                close: 100.0 + i as f64,
            })
            .collect()
    }
}

/// Logging utilities for tests
pub mod logging {
    use tracing::{debug, info};

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    #[allow(dead_code)]
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
