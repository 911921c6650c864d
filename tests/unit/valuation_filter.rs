//! P/E filtering of the valuation metric table

use pretty_assertions::assert_eq;
use stock_charts::models::{MetricTable, ValuationMetric, ValuationMetrics};
use test_log::test;

use crate::common::test_data::create_test_metrics;

#[test]
fn test_filtered_count_matches_tickers_with_pe() {
    let rows = vec![
        create_test_metrics("AAPL", Some(28.0)),
        create_test_metrics("SNAP", None),
        create_test_metrics("MSFT", Some(31.0)),
        create_test_metrics("RIVN", None),
        create_test_metrics("NVDA", Some(35.0)),
    ];
    let with_pe = rows.iter().filter(|r| r.forward_pe.is_some()).count();

    let table = MetricTable::new(rows).retain_with_pe();

    assert_eq!(table.len(), with_pe);
    assert_eq!(table.tickers(), vec!["AAPL", "MSFT", "NVDA"]);
    for metric in ValuationMetric::ALL {
        assert_eq!(table.values(metric).len(), with_pe);
    }
}

#[test]
fn test_missing_secondary_ratios_are_carried_through() {
    let table = MetricTable::new(vec![
        ValuationMetrics {
            symbol: "A".to_string(),
            forward_pe: Some(10.0),
            price_to_sales: None,
            ev_to_ebitda: None,
            price_to_book: None,
        },
        ValuationMetrics {
            symbol: "B".to_string(),
            forward_pe: None,
            price_to_sales: Some(1.0),
            ev_to_ebitda: Some(1.0),
            price_to_book: Some(1.0),
        },
        ValuationMetrics {
            symbol: "C".to_string(),
            forward_pe: Some(-3.0),
            price_to_sales: Some(0.4),
            ev_to_ebitda: None,
            price_to_book: Some(0.9),
        },
    ])
    .retain_with_pe();

    assert_eq!(table.tickers(), vec!["A", "C"]);
    assert_eq!(table.values(ValuationMetric::ForwardPe), vec![Some(10.0), Some(-3.0)]);
    assert_eq!(table.values(ValuationMetric::PriceToSales), vec![None, Some(0.4)]);
    assert_eq!(table.values(ValuationMetric::EvToEbitda), vec![None, None]);
    assert_eq!(table.values(ValuationMetric::PriceToBook), vec![None, Some(0.9)]);
}

#[test]
fn test_empty_input_filters_to_empty_output() {
    let table = MetricTable::new(Vec::new()).retain_with_pe();
    assert!(table.is_empty());
    assert!(table.tickers().is_empty());
}
