//! The two chart reports: price history and valuation comparison.
//!
//! Each report runs fetch, reshape, then render. The `build_*` functions stop
//! before the render step so the prepared chart can be inspected.

use anyhow::Result;
use tracing::{info, warn};

use crate::api::MarketDataProvider;
use crate::models::{MetricTable, PriceHistory};
use crate::ui::{self, PriceChart, ValuationChart};

/// Fetch the display name and closing prices for `ticker` over `period`.
pub async fn build_price_chart<P>(provider: &P, ticker: &str, period: &str) -> Result<PriceChart>
where
    P: MarketDataProvider + ?Sized,
{
    info!("Fetching {} price history for {}", period, ticker);

    let display_name = provider.get_display_name(ticker).await?;
    let points = provider.get_price_history(ticker, period).await?;
    if points.is_empty() {
        warn!("No closing prices returned for {} over {}", ticker, period);
    }

    Ok(PriceChart::new(PriceHistory::new(ticker, display_name, period, points)))
}

/// Plot the closing price of `ticker` over `period` and block until the chart is closed.
pub async fn create_stock_graph<P>(provider: &P, ticker: &str, period: &str) -> Result<()>
where
    P: MarketDataProvider + ?Sized,
{
    let chart = build_price_chart(provider, ticker, period).await?;
    ui::show(&chart)
}

/// Fetch valuation ratios for every ticker, in input order
pub async fn fetch_metric_table<P>(provider: &P, tickers: &[String]) -> Result<MetricTable>
where
    P: MarketDataProvider + ?Sized,
{
    let mut rows = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        rows.push(provider.get_valuation_metrics(ticker).await?);
    }
    Ok(MetricTable::new(rows))
}

/// Fetch ratios and keep only the tickers that have a P/E ratio.
pub async fn build_valuation_chart<P>(provider: &P, tickers: &[String], industry_pe: f64) -> Result<ValuationChart>
where
    P: MarketDataProvider + ?Sized,
{
    info!("Fetching valuation metrics for {} tickers", tickers.len());

    let table = fetch_metric_table(provider, tickers).await?.retain_with_pe();
    if table.is_empty() {
        warn!("None of the {} tickers has a P/E ratio", tickers.len());
    }

    Ok(ValuationChart::new(table, industry_pe))
}

/// Compare P/E, P/S, EV/EBITDA and P/B across `tickers` in a 2x2 grid,
/// with `industry_pe` drawn as a reference line on the P/E panel.
pub async fn create_valuation_comparison<P>(provider: &P, tickers: &[String], industry_pe: f64) -> Result<()>
where
    P: MarketDataProvider + ?Sized,
{
    let chart = build_valuation_chart(provider, tickers, industry_pe).await?;
    ui::show(&chart)
}
