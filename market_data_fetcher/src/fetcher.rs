//! Memoizing front-end over a [`DataProvider`].
//!
//! [`MemoizedFetcher`] guarantees that repeated identical requests within
//! one process lifetime hit the provider at most once. The cache is
//! injectable so tests (and multi-tenant hosts) can control its lifetime,
//! and eviction-free: entries live until the process exits.
//!
//! Implementation notes:
//! - Key equality is exact value equality on (symbol, start, end); a
//!   one-day-shifted range is a cache miss.
//! - The map is mutex-guarded, so concurrent callers are safe, but the
//!   lock is not held across the provider call. Two concurrent misses on
//!   the same key may both fetch; the second insert wins harmlessly.

use std::sync::Mutex;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    errors::FetchError,
    models::{bar::PriceSeries, request::FetchRequest},
    providers::DataProvider,
};

/// Process-lifetime memoization of fetch results, keyed by the exact
/// request triple.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: Mutex<IndexMap<FetchRequest, PriceSeries>>,
}

impl FetchCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached series for `request`, if any.
    pub fn get(&self, request: &FetchRequest) -> Option<PriceSeries> {
        self.lock().get(request).cloned()
    }

    /// Stores `series` under `request`, replacing any previous entry.
    pub fn insert(&self, request: FetchRequest, series: PriceSeries) {
        self.lock().insert(request, series);
    }

    /// Number of cached requests.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every entry. Useful for tests.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<FetchRequest, PriceSeries>> {
        // A poisoned lock only means another caller panicked mid-insert;
        // the map itself is still usable.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The DataFetcher of the pipeline: validates requests, memoizes results,
/// and enforces the series ordering invariant on provider payloads.
pub struct MemoizedFetcher {
    provider: Box<dyn DataProvider>,
    cache: FetchCache,
}

impl MemoizedFetcher {
    /// Wraps `provider` with a fresh per-fetcher cache.
    pub fn new(provider: Box<dyn DataProvider>) -> Self {
        Self::with_cache(provider, FetchCache::new())
    }

    /// Wraps `provider` with an injected cache.
    pub fn with_cache(provider: Box<dyn DataProvider>, cache: FetchCache) -> Self {
        Self { provider, cache }
    }

    /// Read access to the cache, for inspection in tests and hosts.
    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Fetches daily bars for `symbol` over `[start, end)`.
    ///
    /// Returns the cached series when the exact triple was fetched before.
    /// An empty series is a valid result, not an error. Provider failures
    /// propagate as [`FetchError::Provider`] without retry.
    pub async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        if symbol.trim().is_empty() {
            return Err(FetchError::InvalidRequest(
                "symbol must be a non-empty ticker".to_string(),
            ));
        }
        if start > end {
            return Err(FetchError::InvalidRequest(format!(
                "start {start} is after end {end}"
            )));
        }

        let request = FetchRequest::new(symbol, start, end);

        if let Some(series) = self.cache.get(&request) {
            debug!(symbol, %start, %end, "fetch cache hit");
            return Ok(series);
        }

        debug!(symbol, %start, %end, "fetch cache miss, calling provider");
        let series = self.provider.fetch_bars(&request).await?;

        if !series.is_strictly_ordered() {
            return Err(FetchError::MisorderedSeries {
                symbol: request.symbol,
            });
        }

        self.cache.insert(request, series.clone());
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::{models::bar::PriceBar, providers::errors::ProviderError};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn bar(date: NaiveDate, close: f64) -> PriceBar {
        PriceBar {
            date,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    /// Counts provider calls so tests can observe memoization.
    struct CountingProvider {
        calls: Arc<AtomicUsize>,
        bars: Vec<PriceBar>,
    }

    impl CountingProvider {
        fn with_bars(bars: Vec<PriceBar>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                    bars,
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl DataProvider for CountingProvider {
        async fn fetch_bars(&self, request: &FetchRequest) -> Result<PriceSeries, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PriceSeries::new(request.symbol.clone(), self.bars.clone()))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl DataProvider for FailingProvider {
        async fn fetch_bars(&self, _request: &FetchRequest) -> Result<PriceSeries, ProviderError> {
            Err(ProviderError::Api("rate limited".to_string()))
        }
    }

    #[tokio::test]
    async fn identical_request_is_served_from_cache() {
        let (provider, calls) =
            CountingProvider::with_bars(vec![bar(day(2), 100.0), bar(day(3), 102.0)]);
        let fetcher = MemoizedFetcher::new(Box::new(provider));

        let first = fetcher.fetch("AAPL", day(1), day(10)).await.unwrap();
        let second = fetcher.fetch("AAPL", day(1), day(10)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fetcher.cache().len(), 1);
    }

    #[tokio::test]
    async fn shifted_range_is_a_cache_miss() {
        let (provider, calls) = CountingProvider::with_bars(vec![]);
        let fetcher = MemoizedFetcher::new(Box::new(provider));

        fetcher.fetch("AAPL", day(1), day(10)).await.unwrap();
        fetcher.fetch("AAPL", day(2), day(10)).await.unwrap();

        // No normalization: both triples are cached separately.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(fetcher.cache().len(), 2);
    }

    #[tokio::test]
    async fn empty_symbol_is_rejected_before_the_provider() {
        let fetcher = MemoizedFetcher::new(Box::new(FailingProvider));
        let err = fetcher.fetch("  ", day(1), day(10)).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn start_after_end_is_rejected() {
        let fetcher = MemoizedFetcher::new(Box::new(FailingProvider));
        let err = fetcher.fetch("AAPL", day(10), day(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn provider_failure_propagates_and_caches_nothing() {
        let fetcher = MemoizedFetcher::new(Box::new(FailingProvider));
        let err = fetcher.fetch("AAPL", day(1), day(10)).await.unwrap_err();
        assert!(matches!(err, FetchError::Provider(_)));
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn misordered_payload_is_rejected_and_not_cached() {
        let (provider, _calls) =
            CountingProvider::with_bars(vec![bar(day(3), 100.0), bar(day(2), 99.0)]);
        let fetcher = MemoizedFetcher::new(Box::new(provider));

        let err = fetcher.fetch("AAPL", day(1), day(10)).await.unwrap_err();
        assert!(matches!(err, FetchError::MisorderedSeries { .. }));
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn empty_series_is_a_valid_cached_result() {
        let (provider, _calls) = CountingProvider::with_bars(vec![]);
        let fetcher = MemoizedFetcher::new(Box::new(provider));
        let series = fetcher.fetch("NOPE", day(1), day(10)).await.unwrap();
        assert!(series.is_empty());
        assert_eq!(fetcher.cache().len(), 1);
    }

    #[tokio::test]
    async fn injected_cache_is_used() {
        let cache = FetchCache::new();
        cache.insert(
            FetchRequest::new("AAPL", day(1), day(10)),
            PriceSeries::new("AAPL", vec![bar(day(2), 42.0)]),
        );

        // The provider would fail, proving the hit never reaches it.
        let fetcher = MemoizedFetcher::with_cache(Box::new(FailingProvider), cache);
        let series = fetcher.fetch("AAPL", day(1), day(10)).await.unwrap();
        assert_eq!(series.bars[0].close, 42.0);
    }
}
