use serde::Deserialize;

/// Top-level envelope of the chart endpoint.
#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Deserialize, Debug)]
pub struct ChartBody {
    /// One result per requested symbol; absent or empty for unknown symbols
    /// on some mirrors.
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartApiError>,
}

/// Error payload the API embeds instead of an HTTP failure status.
#[derive(Deserialize, Debug)]
pub struct ChartApiError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    /// Unix timestamps (seconds, UTC) of the bars. Absent when the range
    /// contains no trading days.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

/// Column-oriented OHLCV arrays, index-aligned with `timestamp`.
///
/// Individual entries are `null` for sessions the venue reports without a
/// trade print, so every field is an `Option`.
#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_chart_payload_with_nulls() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "AAPL"},
                    "timestamp": [1704153600, 1704240000],
                    "indicators": {
                        "quote": [{
                            "open": [184.35, null],
                            "high": [186.0, null],
                            "low": [183.9, null],
                            "close": [185.64, null],
                            "volume": [82488700, null]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let envelope: ChartEnvelope = serde_json::from_str(payload).unwrap();
        let result = &envelope.chart.result.unwrap()[0];
        assert_eq!(result.timestamp.as_deref().unwrap().len(), 2);
        assert_eq!(result.indicators.quote[0].close[0], Some(185.64));
        assert_eq!(result.indicators.quote[0].close[1], None);
    }

    #[test]
    fn deserializes_error_envelope() {
        let payload = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;

        let envelope: ChartEnvelope = serde_json::from_str(payload).unwrap();
        assert!(envelope.chart.result.is_none());
        assert_eq!(envelope.chart.error.unwrap().code, "Not Found");
    }
}
