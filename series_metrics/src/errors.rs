//! Error type for derived-series computation.

use thiserror::Error;

/// The input series violated the ordering precondition: bar dates must be
/// strictly increasing with no duplicates.
///
/// This should not occur with a well-behaved fetcher, which validates
/// ordering before caching; it is treated as fatal to the request.
#[derive(Debug, Error)]
#[error("Price series for {symbol} is not strictly date-ordered")]
pub struct InvalidSeriesError {
    /// Symbol of the offending series.
    pub symbol: String,
}
