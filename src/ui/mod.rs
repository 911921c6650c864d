//! Terminal chart views for price history and valuation comparisons

use ratatui::{layout::Rect, Frame};

pub mod app;
pub mod components;
pub mod layout;
pub mod price_chart;
pub mod valuation_chart;

pub use app::show;
pub use price_chart::PriceChart;
pub use valuation_chart::ValuationChart;

/// A chart that can be drawn into any frame area
pub trait ChartView {
    fn title(&self) -> String;
    fn render(&self, f: &mut Frame, area: Rect);
}
