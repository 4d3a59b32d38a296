use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for requesting daily bars from a data provider.
///
/// Also serves as the memoization key: two requests are the same cache
/// entry only when all three fields are exactly equal. No normalization is
/// applied, so a one-day-shifted range is a distinct key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Ticker symbol to request (e.g., "AAPL").
    pub symbol: String,

    /// Start of the requested range (inclusive).
    pub start: NaiveDate,

    /// End of the requested range (exclusive).
    ///
    /// Providers return bars strictly before this date.
    pub end: NaiveDate,
}

impl FetchRequest {
    /// Builds a request for `symbol` over `[start, end)`.
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }
}
