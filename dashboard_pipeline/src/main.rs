use anyhow::bail;
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;

use dashboard_pipeline::{
    config::{DashboardConfig, load_config_path},
    io::sink::{write_chart_spec_to_temp, write_dataframe_to_temp},
    pipeline::{ChartKind, DisplaySelection, TableKind, run_pipeline},
};
use market_data_fetcher::{fetcher::MemoizedFetcher, providers::yahoo_chart::YahooChartProvider};

#[derive(Parser)]
#[command(version, about = "Stock analysis dashboard CLI")]
struct Cli {
    /// Ticker symbol (defaults to the configured symbol, stock "AAPL")
    #[arg(long)]
    symbol: Option<String>,

    /// Start date, ISO format (default: lookback window before end)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date, ISO format, exclusive (default: today)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Tabular view: prices | returns | stats
    #[arg(long, default_value = "prices")]
    table: String,

    /// Chart view: line | candlestick
    #[arg(long, default_value = "candlestick")]
    chart: String,

    /// Path to the config file (dashboard.toml)
    #[arg(short, long)]
    config: Option<String>,
}

fn parse_table_kind(value: &str) -> anyhow::Result<TableKind> {
    match value.trim().to_lowercase().as_str() {
        "prices" | "ohlcv" => Ok(TableKind::Prices),
        "returns" | "daily-returns" => Ok(TableKind::DailyReturns),
        "stats" | "summary" => Ok(TableKind::SummaryStats),
        other => bail!("invalid table view: {other} (expected prices, returns, or stats)"),
    }
}

fn parse_chart_kind(value: &str) -> anyhow::Result<ChartKind> {
    match value.trim().to_lowercase().as_str() {
        "line" => Ok(ChartKind::Line),
        "candlestick" | "candle" => Ok(ChartKind::Candlestick),
        other => bail!("invalid chart view: {other} (expected line or candlestick)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => DashboardConfig::default(),
    };

    let provider = match &config.provider.base_url {
        Some(url) => YahooChartProvider::with_base_url(url)?,
        None => YahooChartProvider::new()?,
    };
    let fetcher = MemoizedFetcher::new(Box::new(provider));

    let symbol = cli.symbol.unwrap_or_else(|| config.defaults.symbol.clone());
    let end = cli.end.unwrap_or_else(|| Utc::now().date_naive());
    let start = cli
        .start
        .unwrap_or_else(|| end - Duration::days(i64::from(config.defaults.lookback_days)));

    let selection = DisplaySelection {
        table: parse_table_kind(&cli.table)?,
        chart: parse_chart_kind(&cli.chart)?,
    };

    let mut output = run_pipeline(&fetcher, &symbol, start, end, selection).await?;

    println!("{}", output.table);

    let table_path = write_dataframe_to_temp(&mut output.table, &symbol)?;
    let chart_path = write_chart_spec_to_temp(&output.chart, &symbol)?;
    println!("{}", table_path.display());
    println!("{}", chart_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_kind() {
        assert_eq!(parse_table_kind("prices").unwrap(), TableKind::Prices);
        assert_eq!(parse_table_kind(" Returns ").unwrap(), TableKind::DailyReturns);
        assert_eq!(parse_table_kind("stats").unwrap(), TableKind::SummaryStats);
        assert!(parse_table_kind("volume").is_err());
    }

    #[test]
    fn test_parse_chart_kind() {
        assert_eq!(parse_chart_kind("line").unwrap(), ChartKind::Line);
        assert_eq!(parse_chart_kind("Candlestick").unwrap(), ChartKind::Candlestick);
        assert!(parse_chart_kind("pie").is_err());
    }
}
