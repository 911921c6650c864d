use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stock_charts::api::YahooClient;
use stock_charts::models::Config;
use stock_charts::{create_stock_graph, create_valuation_comparison};

/// Stock price and valuation charts in the terminal
#[derive(Parser)]
#[command(name = "stock-charts")]
#[command(version = "0.1.0")]
#[command(about = "Chart stock price history and compare valuation ratios across companies")]
#[command(long_about = "
Fetches market data from Yahoo Finance and draws the result as a full-screen
terminal chart. Press q or Esc to close the chart.

Examples:
  stock-charts history RGTI --period 1y
  stock-charts compare IONQ RGTI QBTS --industry-pe 25
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Line chart of closing prices over a period
    History {
        /// Ticker symbol, e.g. AAPL
        ticker: String,

        /// Period keyword: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd or max
        #[arg(long, short = 'p', default_value = "1y")]
        period: String,
    },
    /// Bar charts comparing P/E, P/S, EV/EBITDA and P/B across companies
    Compare {
        /// Ticker symbols, charted in the order given
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Industry average P/E drawn as a reference line
        #[arg(long, short = 'i')]
        industry_pe: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs share the tty through stderr; nothing logs while a chart holds the alternate screen
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stock_charts=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    info!("Using market data at {}", config.base_url);
    let client = YahooClient::new(&config)?;

    // Errors are reported once, by the `Result` returned from main
    match cli.command {
        Command::History { ticker, period } => create_stock_graph(&client, &ticker, &period).await,
        Command::Compare { tickers, industry_pe } => {
            create_valuation_comparison(&client, &tickers, industry_pe).await
        }
    }
}
