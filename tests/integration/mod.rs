//! Integration tests against a mocked market data API
