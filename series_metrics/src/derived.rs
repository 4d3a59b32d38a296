//! Per-bar derived series: daily fractional returns and the three fixed
//! exponential moving averages of the close.

use market_data_fetcher::models::bar::PriceSeries;
use serde::Serialize;

use crate::{errors::InvalidSeriesError, stats::SummaryStatistics};

/// Smoothing window of the short EMA.
pub const EMA_SHORT_SPAN: usize = 8;
/// Smoothing window of the medium EMA.
pub const EMA_MEDIUM_SPAN: usize = 21;
/// Smoothing window of the long EMA.
pub const EMA_LONG_SPAN: usize = 200;

/// Derived values computed per bar, index-aligned with the input series.
///
/// Recomputed fully on every request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    /// Fractional change of close vs. the previous close. `None` for the
    /// first bar, which has no predecessor.
    pub daily_return: Vec<Option<f64>>,
    /// EMA of close with span 8.
    pub ema8: Vec<f64>,
    /// EMA of close with span 21.
    pub ema21: Vec<f64>,
    /// EMA of close with span 200.
    pub ema200: Vec<f64>,
}

/// Computes the derived series and return statistics for `series`.
///
/// Never fails on an empty series (all outputs are empty/undefined); the
/// only error is the ordering precondition.
pub fn compute(
    series: &PriceSeries,
) -> Result<(DerivedSeries, SummaryStatistics), InvalidSeriesError> {
    if !series.is_strictly_ordered() {
        return Err(InvalidSeriesError {
            symbol: series.symbol.clone(),
        });
    }

    let closes = series.closes();
    let daily_return = daily_returns(&closes);

    let defined: Vec<f64> = daily_return.iter().flatten().copied().collect();
    let stats = SummaryStatistics::describe(&defined);

    let derived = DerivedSeries {
        ema8: ema(&closes, EMA_SHORT_SPAN),
        ema21: ema(&closes, EMA_MEDIUM_SPAN),
        ema200: ema(&closes, EMA_LONG_SPAN),
        daily_return,
    };

    Ok((derived, stats))
}

/// Daily fractional change: `(close[i] - close[i-1]) / close[i-1]`.
///
/// Index 0 is `None`; output length always equals input length.
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    for (i, &close) in closes.iter().enumerate() {
        if i == 0 {
            out.push(None);
        } else {
            let prev = closes[i - 1];
            out.push(Some((close - prev) / prev));
        }
    }
    out
}

/// Exponential moving average with smoothing factor `alpha = 2/(span+1)`.
///
/// Seeded with the first value, then `ema[i] = alpha*x[i] + (1-alpha)*ema[i-1]`.
/// This is the adjust=false recurrence, not the bias-corrected weighted
/// average; the two diverge materially for small `i`.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(prev);
    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}
