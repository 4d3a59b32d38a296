#![cfg(test)]
use chrono::{Duration, Utc};
use market_data_fetcher::{
    models::request::FetchRequest,
    providers::{DataProvider, yahoo_chart::YahooChartProvider},
};

#[tokio::test]
#[ignore]
async fn test_yahoo_provider_fetch_bars() {
    // Hits the live chart endpoint; run manually with --ignored.
    let provider = YahooChartProvider::new().expect("Failed to create YahooChartProvider");

    let end = Utc::now().date_naive();
    let start = end - Duration::days(30);
    let request = FetchRequest::new("AAPL", start, end);

    let result = provider.fetch_bars(&request).await;

    assert!(result.is_ok(), "fetch_bars returned an error: {:?}", result.err());

    let series = result.unwrap();
    assert_eq!(series.symbol, "AAPL");
    assert!(!series.is_empty(), "Expected at least one bar for AAPL");
    assert!(series.is_strictly_ordered(), "Bars must be ascending by date");

    for bar in &series.bars {
        assert!(bar.date >= start && bar.date < end);
        assert!(bar.low <= bar.high);
    }
}
