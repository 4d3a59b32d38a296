//! The chart spec data model.
//!
//! Serde-serializable so hosts can ship specs to whatever renderer they
//! embed (a browser charting library, a native plot window, a file sink).

use chrono::NaiveDate;
use serde::Serialize;

/// Identifies which pane of the figure a trace is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneId {
    /// Upper price pane.
    Price,
    /// Lower volume pane.
    Volume,
}

/// One drawable series within a pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    /// OHLC candlestick glyphs, color-coded by direction.
    Candlestick {
        /// Legend label.
        name: String,
        /// Bar dates (shared x axis).
        x: Vec<NaiveDate>,
        /// Opening prices.
        open: Vec<f64>,
        /// Session highs.
        high: Vec<f64>,
        /// Session lows.
        low: Vec<f64>,
        /// Closing prices.
        close: Vec<f64>,
        /// Body color for up-days.
        increasing_color: String,
        /// Body color for down-days.
        decreasing_color: String,
        /// Pane this trace is drawn in.
        pane: PaneId,
        /// Whether the trace gets a legend entry.
        show_legend: bool,
    },
    /// A plain line.
    Line {
        /// Legend label.
        name: String,
        /// X values.
        x: Vec<NaiveDate>,
        /// Y values.
        y: Vec<f64>,
        /// Line color.
        color: String,
        /// Pane this trace is drawn in.
        pane: PaneId,
        /// Whether the trace gets a legend entry.
        show_legend: bool,
    },
    /// Vertical bars from a zero baseline.
    Bar {
        /// Legend label.
        name: String,
        /// X values.
        x: Vec<NaiveDate>,
        /// Bar heights.
        y: Vec<f64>,
        /// Fill color.
        color: String,
        /// Pane this trace is drawn in.
        pane: PaneId,
        /// Whether the trace gets a legend entry.
        show_legend: bool,
    },
}

impl Trace {
    /// Number of data points in the trace.
    pub fn len(&self) -> usize {
        match self {
            Trace::Candlestick { x, .. } | Trace::Line { x, .. } | Trace::Bar { x, .. } => x.len(),
        }
    }

    /// Whether the trace holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pane the trace is assigned to.
    pub fn pane(&self) -> PaneId {
        match self {
            Trace::Candlestick { pane, .. }
            | Trace::Line { pane, .. }
            | Trace::Bar { pane, .. } => *pane,
        }
    }
}

/// One row of the vertically stacked figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pane {
    /// Row identity, referenced by traces.
    pub id: PaneId,
    /// Optional subplot title shown above the row.
    pub title: Option<String>,
    /// Relative height of the row within the canvas.
    pub height_weight: f64,
}

/// Margins around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    /// Left margin.
    pub l: u32,
    /// Right margin.
    pub r: u32,
    /// Bottom margin.
    pub b: u32,
    /// Top margin.
    pub t: u32,
    /// Padding between plot area and axis labels.
    pub pad: u32,
}

/// Canvas-level presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Margins on all four sides.
    pub margin: Margin,
    /// Background of the surrounding canvas.
    pub paper_bgcolor: String,
    /// Background of the plotting area.
    pub plot_bgcolor: String,
    /// Color of axis text and labels.
    pub axis_text_color: String,
    /// Optional y-axis title on the price pane.
    pub y_axis_title: Option<String>,
    /// Font size of the y-axis title.
    pub y_axis_title_size: u32,
    /// Font size of tick labels.
    pub tick_font_size: u32,
    /// Whether the time axis shows a range-slider control.
    pub range_slider: bool,
}

impl Layout {
    /// Dark dashboard layout used by the candlestick figure: fixed square
    /// canvas, black background, light axis text, no range slider.
    pub fn dark_dashboard() -> Self {
        Self {
            width: 900,
            height: 900,
            margin: Margin {
                l: 50,
                r: 50,
                b: 100,
                t: 100,
                pad: 4,
            },
            paper_bgcolor: "black".to_string(),
            plot_bgcolor: "black".to_string(),
            axis_text_color: "white".to_string(),
            y_axis_title: Some("Price ($)".to_string()),
            y_axis_title_size: 18,
            tick_font_size: 12,
            range_slider: false,
        }
    }

    /// Plain light layout for the simple line chart.
    pub fn light_default() -> Self {
        Self {
            width: 900,
            height: 450,
            margin: Margin {
                l: 50,
                r: 50,
                b: 50,
                t: 50,
                pad: 4,
            },
            paper_bgcolor: "white".to_string(),
            plot_bgcolor: "white".to_string(),
            axis_text_color: "black".to_string(),
            y_axis_title: None,
            y_axis_title_size: 18,
            tick_font_size: 12,
            range_slider: false,
        }
    }
}

/// A complete declarative figure: pane stack, traces, layout.
///
/// Panes are ordered top to bottom and share the time axis;
/// `vertical_spacing` is the gap between rows as a fraction of canvas
/// height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Figure title.
    pub title: Option<String>,
    /// Rows of the figure, top first.
    pub panes: Vec<Pane>,
    /// Fractional vertical gap between rows.
    pub vertical_spacing: f64,
    /// Drawable series, each assigned to a pane.
    pub traces: Vec<Trace>,
    /// Canvas-level presentation settings.
    pub layout: Layout,
}

impl ChartSpec {
    /// Traces assigned to `pane`.
    pub fn traces_in(&self, pane: PaneId) -> Vec<&Trace> {
        self.traces.iter().filter(|t| t.pane() == pane).collect()
    }
}
