//! Shared building blocks for `scanport`.
//!
//! * [`network`] holds the scan data model and the request validator.
//! * [`config`] loads the process-wide [`config::ScanConfig`].
//! * [`error`] defines the error taxonomy used across the workspace.

pub mod config;
pub mod error;
pub mod network;
