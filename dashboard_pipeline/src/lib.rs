//! Orchestration for the dashboard core.
//!
//! One explicit pipeline call per user interaction: fetch the requested
//! series, derive returns/EMAs/statistics, then build the selected tabular
//! view and chart spec. There is no implicit rerun machinery; the caller
//! (the presentation layer, or the bundled CLI) invokes
//! [`pipeline::run_pipeline`] for each new (symbol, start, end, selection)
//! tuple.

pub mod config;
pub mod io;
pub mod pipeline;
