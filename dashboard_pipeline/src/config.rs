//! Dashboard configuration: parsing, normalization, and loading.
//!
//! A small TOML file drives the bits a deployment wants to vary without
//! code changes:
//!
//! ```toml
//! [provider]
//! base_url = "http://localhost:8080/v8/finance/chart"
//!
//! [defaults]
//! symbol = "AAPL"
//! lookback_days = 110
//! ```
//!
//! Every section and field is optional; the defaults match the public
//! endpoint and the dashboard's stock AAPL / 110-day window. Unknown
//! fields are rejected so typos fail loudly instead of being ignored.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DashboardConfig {
    /// Provider endpoint settings.
    pub provider: ProviderCfg,
    /// Input defaults used when the caller supplies none.
    pub defaults: DefaultsCfg,
}

/// Provider endpoint settings.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderCfg {
    /// Overrides the public chart endpoint (fixture servers, proxies).
    pub base_url: Option<String>,
}

/// Input defaults used when the caller supplies none.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DefaultsCfg {
    /// Symbol to fetch when none is given.
    pub symbol: String,
    /// Length of the default date window, ending today.
    pub lookback_days: u32,
}

impl Default for DefaultsCfg {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            lookback_days: 110,
        }
    }
}

/// Normalize a parsed config in-place: trim and uppercase the default
/// symbol, reject empty values.
pub fn normalize_config(cfg: &mut DashboardConfig) -> anyhow::Result<()> {
    cfg.defaults.symbol = cfg.defaults.symbol.trim().to_uppercase();
    if cfg.defaults.symbol.is_empty() {
        bail!("defaults.symbol cannot be empty after trimming");
    }
    if cfg.defaults.lookback_days == 0 {
        bail!("defaults.lookback_days must be at least 1");
    }
    if let Some(url) = &mut cfg.provider.base_url {
        let trimmed = url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            bail!("provider.base_url cannot be empty after trimming");
        }
        *url = trimmed;
    }
    Ok(())
}

/// Parse and normalize a config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<DashboardConfig> {
    let mut cfg: DashboardConfig =
        toml::from_str(toml_str).context("failed to parse dashboard config TOML")?;
    normalize_config(&mut cfg).context("normalize_config failed")?;
    Ok(cfg)
}

/// Read a config TOML file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<DashboardConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
