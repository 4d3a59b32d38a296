//! Market data fetching for the dashboard core.
//!
//! This crate covers the first stage of the pipeline: given a ticker symbol
//! and a date range, produce an ordered series of daily OHLCV bars. It is
//! split into a vendor-agnostic [`DataProvider`](providers::DataProvider)
//! abstraction, a concrete HTTP provider speaking the Yahoo chart JSON
//! convention, and a memoizing front-end ([`fetcher::MemoizedFetcher`]) that
//! guarantees repeated identical requests never re-contact the provider
//! within one process lifetime.

pub mod errors;
pub mod fetcher;
pub mod models;
pub mod providers;
