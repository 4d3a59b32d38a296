//! Derived-series computation: daily returns, exponential moving averages,
//! and descriptive statistics over the returns.
//!
//! Everything here is pure and synchronous. Given the same ordered price
//! series the output is identical; no I/O, no mutation of the input. The
//! only failure mode is a precondition violation (bars out of date order),
//! which indicates a misbehaving provider upstream.

#![deny(missing_docs)]

pub mod derived;
pub mod errors;
pub mod stats;
