//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching daily bar data from any market data vendor. Each concrete
//! implementation (such as the Yahoo chart provider) handles its own API
//! conventions and validation.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) so the hosting layer can select a provider at
//! runtime and tests can substitute fakes.

pub mod errors;
pub mod yahoo_chart;

use async_trait::async_trait;

use crate::{
    models::{bar::PriceSeries, request::FetchRequest},
    providers::errors::ProviderError,
};

#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch_bars(&self, request: &FetchRequest) -> Result<PriceSeries, ProviderError>;
}
