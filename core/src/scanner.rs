//! The central **abstraction** for port scanning operations.
//!
//! A scan is split in three stages:
//!
//! * a [`Prober`] classifies a single `(host, port)` pair,
//! * the [`batch`] scheduler fans probes out in bounded batches,
//! * the [`aggregate`] step restores port order on the collected results.
//!
//! Callers with a validated [`ScanTarget`] should go through [`perform_scan`],
//! which wires the real TCP prober to the configured batch size and timeout.

use std::net::SocketAddrV4;
use std::time::Duration;

use async_trait::async_trait;
use scanport_common::config::ScanConfig;
use scanport_common::network::port::{PortResult, ScanReport};
use scanport_common::network::target::ScanTarget;
use tracing::debug;

use crate::network::tcp::TcpConnectProber;

pub mod aggregate;
pub mod batch;

pub use batch::BatchScheduler;

/// Defines the strategy for probing a single transport-layer port.
///
/// Implementations never fail: every socket-level error is folded into a
/// closed [`PortResult`].
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, addr: SocketAddrV4, probe_timeout: Duration) -> PortResult;
}

/// Scans every port of `target` and returns the port-ordered report.
pub async fn perform_scan(target: ScanTarget, cfg: &ScanConfig) -> ScanReport {
    debug!(
        "Scanning {target} in batches of {} with a {:?} timeout",
        cfg.batch_size, cfg.probe_timeout
    );

    let scheduler = BatchScheduler::from_config(TcpConnectProber, cfg);
    let bag: Vec<PortResult> = scheduler.scan(target).await;
    aggregate::aggregate(bag)
}
