pub mod api;
pub mod models;
pub mod reports;
pub mod ui;

pub use reports::{create_stock_graph, create_valuation_comparison};
