//! Rendering chart views into an in-memory terminal

use ratatui::{backend::TestBackend, Terminal};
use stock_charts::models::{MetricTable, PriceHistory};
use stock_charts::ui::app::draw_view;
use stock_charts::ui::{ChartView, PriceChart, ValuationChart};
use test_log::test;

use crate::common::test_data::{create_test_metrics, create_test_price_points};

fn rendered_text<V: ChartView>(view: &V, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    draw_view(&mut terminal, view).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_price_chart_title_has_name_ticker_and_period() {
    let history = PriceHistory::new("AAPL", Some("Apple Inc.".to_string()), "ytd", create_test_price_points(30));
    let chart = PriceChart::new(history);

    let title = chart.title();
    assert!(title.contains("Apple Inc."));
    assert!(title.contains("AAPL"));
    assert!(title.contains("ytd"));

    let text = rendered_text(&chart, 120, 30);
    assert!(text.contains(&title));
    assert!(text.contains("Stock Price (USD)"));
}

#[test]
fn test_valuation_chart_labels_every_panel() {
    let table = MetricTable::new(vec![
        create_test_metrics("MSFT", Some(31.0)),
        create_test_metrics("ORCL", None),
        create_test_metrics("CRM", Some(27.0)),
    ])
    .retain_with_pe();
    let chart = ValuationChart::new(table, 29.0);

    let text = rendered_text(&chart, 120, 40);
    assert_eq!(text.matches("Companies").count(), 4);
    assert!(text.contains("MSFT"));
    assert!(text.contains("CRM"));
    assert!(!text.contains("ORCL"));
    assert!(text.contains("Industry Avg P/E: 29.0"));
}
