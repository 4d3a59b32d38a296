//! Builders for the two dashboard figures.

use chrono::NaiveDate;
use market_data_fetcher::models::bar::PriceSeries;
use series_metrics::derived::{
    DerivedSeries, EMA_LONG_SPAN, EMA_MEDIUM_SPAN, EMA_SHORT_SPAN,
};

use crate::spec::{ChartSpec, Layout, Pane, PaneId, Trace};

/// Candlestick body color for up-days.
pub const UP_COLOR: &str = "green";
/// Candlestick body color for down-days.
pub const DOWN_COLOR: &str = "red";
/// Volume bar fill, distinct from both candle colors.
pub const VOLUME_COLOR: &str = "lime";
/// EMA 8 line color.
pub const EMA_SHORT_COLOR: &str = "blue";
/// EMA 21 line color.
pub const EMA_MEDIUM_COLOR: &str = "orange";
/// EMA 200 line color.
pub const EMA_LONG_COLOR: &str = "purple";

/// Height weight of the price pane.
const PRICE_ROW_WEIGHT: f64 = 0.7;
/// Height weight of the volume pane.
const VOLUME_ROW_WEIGHT: f64 = 0.2;
/// Fractional gap between the two panes.
const VERTICAL_SPACING: f64 = 0.10;

/// Builds the dual-pane candlestick figure: OHLC candles overlaid with the
/// three EMA lines on top, volume bars below, shared time axis.
///
/// `derived` must be index-aligned with `series` (as produced by
/// [`series_metrics::derived::compute`]). An empty series yields a spec
/// whose traces are all zero-length.
pub fn compose_candlestick(
    series: &PriceSeries,
    derived: &DerivedSeries,
    title: &str,
) -> ChartSpec {
    let x: Vec<NaiveDate> = series.bars.iter().map(|b| b.date).collect();

    let mut traces = vec![
        Trace::Bar {
            name: "Volume".to_string(),
            x: x.clone(),
            y: series.bars.iter().map(|b| b.volume as f64).collect(),
            color: VOLUME_COLOR.to_string(),
            pane: PaneId::Volume,
            show_legend: false,
        },
        Trace::Candlestick {
            name: "OHLC".to_string(),
            x: x.clone(),
            open: series.bars.iter().map(|b| b.open).collect(),
            high: series.bars.iter().map(|b| b.high).collect(),
            low: series.bars.iter().map(|b| b.low).collect(),
            close: series.closes(),
            increasing_color: UP_COLOR.to_string(),
            decreasing_color: DOWN_COLOR.to_string(),
            pane: PaneId::Price,
            show_legend: true,
        },
    ];

    let overlays = [
        (EMA_SHORT_SPAN, &derived.ema8, EMA_SHORT_COLOR),
        (EMA_MEDIUM_SPAN, &derived.ema21, EMA_MEDIUM_COLOR),
        (EMA_LONG_SPAN, &derived.ema200, EMA_LONG_COLOR),
    ];
    for (span, values, color) in overlays {
        traces.push(Trace::Line {
            name: format!("EMA {span}"),
            x: x.clone(),
            y: values.clone(),
            color: color.to_string(),
            pane: PaneId::Price,
            show_legend: true,
        });
    }

    ChartSpec {
        title: Some(title.to_string()),
        panes: vec![
            Pane {
                id: PaneId::Price,
                title: Some(format!("{} Candlestick Chart", series.symbol)),
                height_weight: PRICE_ROW_WEIGHT,
            },
            Pane {
                id: PaneId::Volume,
                title: Some("Volume".to_string()),
                height_weight: VOLUME_ROW_WEIGHT,
            },
        ],
        vertical_spacing: VERTICAL_SPACING,
        traces,
        layout: Layout::dark_dashboard(),
    }
}

/// Builds the simple close-vs-date line figure, no overlays.
pub fn compose_line(series: &PriceSeries) -> ChartSpec {
    let trace = Trace::Line {
        name: "Close".to_string(),
        x: series.bars.iter().map(|b| b.date).collect(),
        y: series.closes(),
        color: EMA_SHORT_COLOR.to_string(),
        pane: PaneId::Price,
        show_legend: false,
    };

    ChartSpec {
        title: Some(series.symbol.clone()),
        panes: vec![Pane {
            id: PaneId::Price,
            title: None,
            height_weight: 1.0,
        }],
        vertical_spacing: 0.0,
        traces: vec![trace],
        layout: Layout::light_default(),
    }
}
