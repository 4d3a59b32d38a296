//! Tabular views of the pipeline outputs as polars DataFrames.
//!
//! These are the three tables the dashboard can display: the raw OHLCV
//! rows, the daily returns (null first row), and the describe()-shaped
//! summary statistics. All three work on empty input and produce
//! zero-height frames.

use chrono::NaiveDate;
use market_data_fetcher::models::bar::PriceSeries;
use polars::prelude::*;
use series_metrics::{derived::DerivedSeries, stats::SummaryStatistics};

/// Raw OHLCV table: one row per bar.
pub fn price_frame(series: &PriceSeries) -> PolarsResult<DataFrame> {
    let dates: Vec<NaiveDate> = series.bars.iter().map(|b| b.date).collect();
    df!(
        "date" => dates,
        "open" => series.bars.iter().map(|b| b.open).collect::<Vec<f64>>(),
        "high" => series.bars.iter().map(|b| b.high).collect::<Vec<f64>>(),
        "low" => series.bars.iter().map(|b| b.low).collect::<Vec<f64>>(),
        "close" => series.closes(),
        "volume" => series.bars.iter().map(|b| b.volume).collect::<Vec<u64>>(),
    )
}

/// Daily-return table, index-aligned with the series; the first row is
/// null (no previous close to compare against).
pub fn returns_frame(series: &PriceSeries, derived: &DerivedSeries) -> PolarsResult<DataFrame> {
    let dates: Vec<NaiveDate> = series.bars.iter().map(|b| b.date).collect();
    df!(
        "date" => dates,
        "daily_return" => derived.daily_return.clone(),
    )
}

/// Summary-statistics table: a label column plus one value column, rows in
/// describe() order. Undefined statistics are null values, not absent rows.
pub fn stats_frame(stats: &SummaryStatistics) -> PolarsResult<DataFrame> {
    let rows = stats.rows();
    let labels: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|(_, value)| *value).collect();
    df!(
        "statistic" => labels,
        "value" => values,
    )
}
