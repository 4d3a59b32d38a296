//! The explicit fetch → derive → compose pipeline.

use anyhow::Context;
use chart_composer::{compose, spec::ChartSpec};
use chrono::NaiveDate;
use market_data_fetcher::fetcher::MemoizedFetcher;
use polars::frame::DataFrame;
use series_metrics::stats::SummaryStatistics;
use tracing::info;

use crate::io::frames;

/// Which of the three tables to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Raw OHLCV rows.
    Prices,
    /// Daily fractional returns.
    DailyReturns,
    /// describe()-shaped statistics over the returns.
    SummaryStats,
}

/// Which of the two charts to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Close price line chart.
    Line,
    /// Dual-pane candlestick + volume + EMA overlay chart.
    Candlestick,
}

/// The user's display choices for one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySelection {
    pub table: TableKind,
    pub chart: ChartKind,
}

/// Everything one pipeline run hands to the presentation layer.
pub struct DashboardOutput {
    /// The selected tabular view.
    pub table: DataFrame,
    /// The selected chart spec.
    pub chart: ChartSpec,
    /// Return statistics, always computed regardless of the selection.
    pub stats: SummaryStatistics,
}

/// Runs exactly one fetch → derive → compose sequence.
///
/// Fetch failures abort the request and propagate to the caller for
/// display; everything downstream of a successful fetch is total on
/// well-ordered input, including the empty series.
pub async fn run_pipeline(
    fetcher: &MemoizedFetcher,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    selection: DisplaySelection,
) -> anyhow::Result<DashboardOutput> {
    info!(symbol, %start, %end, ?selection, "running dashboard pipeline");

    let series = fetcher
        .fetch(symbol, start, end)
        .await
        .context("fetching price history")?;

    let (derived, stats) =
        series_metrics::derived::compute(&series).context("computing derived series")?;

    let table = match selection.table {
        TableKind::Prices => frames::price_frame(&series),
        TableKind::DailyReturns => frames::returns_frame(&series, &derived),
        TableKind::SummaryStats => frames::stats_frame(&stats),
    }
    .context("building tabular view")?;

    let chart = match selection.chart {
        ChartKind::Line => compose::compose_line(&series),
        ChartKind::Candlestick => compose::compose_candlestick(&series, &derived, symbol),
    };

    Ok(DashboardOutput {
        table,
        chart,
        stats,
    })
}
