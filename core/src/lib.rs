//! The concurrent port-probing engine.
//!
//! [`scanner::perform_scan`] drives a [`scanner::Prober`] over a validated
//! target in bounded batches and returns a port-ordered report.

pub mod network;
pub mod scanner;
