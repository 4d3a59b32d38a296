//! Canonical in-memory representation of one trading day's bar (OHLCV).
//!
//! This struct is the standard output for all
//! [`DataProvider`](crate::providers::DataProvider) implementations and the
//! standard input for every downstream stage (derived series, chart specs,
//! tabular views).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day's trading record for a symbol.
///
/// The `date` is the ordering key: within a [`PriceSeries`], dates are
/// strictly increasing with no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Calendar day this bar covers.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the session.
    pub high: f64,

    /// Lowest price during the session.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the session.
    pub volume: u64,
}

/// An ordered sequence of [`PriceBar`]s for one symbol over a contiguous
/// requested range.
///
/// Immutable once produced by the fetcher. An empty series is a valid
/// terminal state (unknown symbol, range with no trading days), not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The collection of daily bars, ascending by date.
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Creates a series from already-ordered bars.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Whether bar dates are strictly increasing with no duplicates.
    ///
    /// Holds vacuously for empty and single-bar series.
    pub fn is_strictly_ordered(&self) -> bool {
        self.bars.windows(2).all(|w| w[0].date < w[1].date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn bar(date: NaiveDate) -> PriceBar {
        PriceBar {
            date,
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.5,
            volume: 1_000,
        }
    }

    #[test]
    fn empty_and_single_bar_series_are_ordered() {
        assert!(PriceSeries::new("AAPL", vec![]).is_strictly_ordered());
        assert!(PriceSeries::new("AAPL", vec![bar(day(2))]).is_strictly_ordered());
    }

    #[test]
    fn duplicate_dates_are_not_ordered() {
        let series = PriceSeries::new("AAPL", vec![bar(day(2)), bar(day(2))]);
        assert!(!series.is_strictly_ordered());
    }

    #[test]
    fn descending_dates_are_not_ordered() {
        let series = PriceSeries::new("AAPL", vec![bar(day(3)), bar(day(2))]);
        assert!(!series.is_strictly_ordered());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sorting_and_deduping_always_restores_the_invariant(
            offsets in proptest::collection::vec(0i64..2000, 0..50),
        ) {
            let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let mut bars: Vec<PriceBar> = offsets
                .iter()
                .map(|&o| bar(base + chrono::Duration::days(o)))
                .collect();
            bars.sort_by_key(|b| b.date);
            bars.dedup_by_key(|b| b.date);
            prop_assert!(PriceSeries::new("AAPL", bars).is_strictly_ordered());
        }
    }
}
