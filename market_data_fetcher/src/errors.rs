use thiserror::Error;

use crate::providers::errors::ProviderError;

/// The unified error type for a memoized fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request itself was malformed (empty symbol, start after end).
    #[error("Invalid fetch request: {0}")]
    InvalidRequest(String),

    /// The provider/network call could not complete. Not retried; the
    /// caller surfaces this to the user.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider returned bars that are not strictly date-ordered.
    /// A data-integrity failure; nothing is cached for the request.
    #[error("Provider returned out-of-order bars for {symbol}")]
    MisorderedSeries {
        /// Symbol whose payload failed the ordering check.
        symbol: String,
    },
}
