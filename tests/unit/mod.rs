//! Unit tests for the public reshaping and rendering API

mod chart_rendering;
mod valuation_filter;
