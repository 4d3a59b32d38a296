use async_trait::async_trait;
use chrono::{DateTime, NaiveTime};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use tracing::debug;

use crate::{
    models::{
        bar::{PriceBar, PriceSeries},
        request::FetchRequest,
    },
    providers::{
        DataProvider,
        errors::{ProviderError, ProviderInitError},
        yahoo_chart::response::{ChartEnvelope, ChartResult},
    },
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// The endpoint rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) market-data-fetcher/0.1";

pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a provider against the public chart endpoint.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_base_url(BASE_URL)
    }

    /// Creates a provider against an alternate endpoint.
    ///
    /// Used by integration tests to point at a local fixture server, and by
    /// deployments fronting the vendor with their own proxy.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            // Bursts of cache misses stay polite: at most 4 calls per second.
            limiter: RateLimiter::direct(Quota::per_second(nonzero!(4u32))),
        })
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(&self, request: &FetchRequest) -> Result<PriceSeries, ProviderError> {
        if request.symbol.trim().is_empty() {
            return Err(ProviderError::Validation(
                "symbol must be a non-empty ticker".to_string(),
            ));
        }

        self.limiter.until_ready().await;

        let period1 = request.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = request.end.and_time(NaiveTime::MIN).and_utc().timestamp();

        let url = format!("{}/{}", self.base_url, request.symbol);
        debug!(symbol = %request.symbol, %url, "requesting daily bars");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(error_msg));
        }

        let envelope = response.json::<ChartEnvelope>().await?;

        if let Some(api_error) = envelope.chart.error {
            return Err(ProviderError::Api(format!(
                "{}: {}",
                api_error.code, api_error.description
            )));
        }

        // Unknown symbols can come back as an empty result list rather than
        // an error payload; treat that as a valid empty series.
        let bars = match envelope.chart.result.and_then(|mut r| {
            if r.is_empty() { None } else { Some(r.remove(0)) }
        }) {
            Some(result) => collect_bars(&result, request)?,
            None => Vec::new(),
        };

        Ok(PriceSeries::new(request.symbol.clone(), bars))
    }
}

/// Converts column-oriented chart arrays into ordered [`PriceBar`]s.
///
/// Rows with any null field are skipped (sessions without a trade print),
/// bars outside `[start, end)` are dropped, and the output is sorted and
/// de-duplicated by date so the fetcher's ordering invariant holds no
/// matter what order the vendor emitted.
fn collect_bars(result: &ChartResult, request: &FetchRequest) -> Result<Vec<PriceBar>, ProviderError> {
    let timestamps = match result.timestamp.as_deref() {
        Some(ts) => ts,
        None => return Ok(Vec::new()),
    };
    let quote = match result.indicators.quote.first() {
        Some(q) => q,
        None => return Ok(Vec::new()),
    };

    for (column, len) in [
        ("open", quote.open.len()),
        ("high", quote.high.len()),
        ("low", quote.low.len()),
        ("close", quote.close.len()),
        ("volume", quote.volume.len()),
    ] {
        if len != timestamps.len() {
            return Err(ProviderError::Decode(format!(
                "column '{}' has {} entries, expected {}",
                column,
                len,
                timestamps.len()
            )));
        }
    }

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            quote.open[i],
            quote.high[i],
            quote.low[i],
            quote.close[i],
            quote.volume[i],
        ) else {
            continue;
        };
        let Some(when) = DateTime::from_timestamp(ts, 0) else {
            continue;
        };
        let date = when.date_naive();
        if date < request.start || date >= request.end {
            continue;
        }
        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::providers::yahoo_chart::response::QuoteColumns;

    fn request() -> FetchRequest {
        FetchRequest::new(
            "AAPL",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    fn chart_result(timestamps: Vec<i64>, quote: QuoteColumns) -> ChartResult {
        let payload = serde_json::json!({
            "timestamp": timestamps,
            "indicators": { "quote": [{
                "open": quote.open,
                "high": quote.high,
                "low": quote.low,
                "close": quote.close,
                "volume": quote.volume,
            }]}
        });
        serde_json::from_value(payload).unwrap()
    }

    // 2024-01-02 and 2024-01-03 at 14:30 UTC (regular session open).
    const JAN_2: i64 = 1704205800;
    const JAN_3: i64 = 1704292200;

    fn columns(n: usize) -> QuoteColumns {
        QuoteColumns {
            open: vec![Some(10.0); n],
            high: vec![Some(11.0); n],
            low: vec![Some(9.0); n],
            close: vec![Some(10.5); n],
            volume: vec![Some(1_000); n],
        }
    }

    #[test]
    fn skips_null_rows() {
        let mut quote = columns(2);
        quote.close[1] = None;
        let bars = collect_bars(&chart_result(vec![JAN_2, JAN_3], quote), &request()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn sorts_and_dedupes_by_date() {
        let bars = collect_bars(
            &chart_result(vec![JAN_3, JAN_2, JAN_2], columns(3)),
            &request(),
        )
        .unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn drops_bars_outside_half_open_range() {
        let mut req = request();
        req.end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let bars = collect_bars(&chart_result(vec![JAN_2, JAN_3], columns(2)), &req).unwrap();
        // End date is exclusive: the Jan 3 bar is dropped.
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn mismatched_column_lengths_are_a_decode_error() {
        let mut quote = columns(2);
        quote.volume.pop();
        let err = collect_bars(&chart_result(vec![JAN_2, JAN_3], quote), &request()).unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[test]
    fn missing_timestamps_yield_empty_series() {
        let result: ChartResult =
            serde_json::from_value(serde_json::json!({ "indicators": { "quote": [] } })).unwrap();
        let bars = collect_bars(&result, &request()).unwrap();
        assert!(bars.is_empty());
    }
}
