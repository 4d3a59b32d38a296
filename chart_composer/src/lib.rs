//! Declarative chart construction for the dashboard.
//!
//! A [`spec::ChartSpec`] is a value object describing a figure (trace
//! list, pane stack, layout) with no behavior of its own. Rendering is
//! the presentation layer's job; this crate only builds specs, and builds
//! them for any input including the empty series.

pub mod compose;
pub mod spec;
