//! Bounded fan-out of probes.
//!
//! The port range is cut into consecutive batches of at most `batch_size`
//! ports. Every port of a batch gets its own task, and the next batch is only
//! launched once all tasks of the current one have been joined. At no instant
//! are more than `batch_size` connects in flight.

use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use scanport_common::config::ScanConfig;
use scanport_common::network::port::{PortResult, PortState};
use scanport_common::network::range::PortRange;
use scanport_common::network::target::ScanTarget;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::Prober;

type ResultBag = Arc<Mutex<Vec<PortResult>>>;

pub struct BatchScheduler<P: Prober> {
    prober: Arc<P>,
    batch_size: usize,
    probe_timeout: Duration,
}

impl<P: Prober> BatchScheduler<P> {
    /// A `batch_size` of zero is raised to one.
    pub fn new(prober: P, batch_size: usize, probe_timeout: Duration) -> Self {
        Self {
            prober: Arc::new(prober),
            batch_size: batch_size.max(1),
            probe_timeout,
        }
    }

    pub fn from_config(prober: P, cfg: &ScanConfig) -> Self {
        Self::new(prober, cfg.batch_size, cfg.probe_timeout)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Probes every port of `target` and returns the results unordered.
    ///
    /// The returned bag always holds exactly one entry per port in the range.
    pub async fn scan(&self, target: ScanTarget) -> Vec<PortResult> {
        let bag: ResultBag = Arc::new(Mutex::new(Vec::with_capacity(target.ports.len())));

        for batch in target.ports.batches(self.batch_size) {
            self.run_batch(target, batch, &bag).await;
        }

        std::mem::take(&mut *bag.lock().await)
    }

    async fn run_batch(&self, target: ScanTarget, batch: PortRange, bag: &ResultBag) {
        let host: Ipv4Addr = target.host;
        debug!("Probing {host} ports {}-{}", batch.begin(), batch.end());

        let mut workers: JoinSet<()> = JoinSet::new();
        for port in batch.to_iter() {
            let prober = Arc::clone(&self.prober);
            let bag = Arc::clone(bag);
            let addr: SocketAddrV4 = target.socket_addr(port);
            let probe_timeout = self.probe_timeout;

            workers.spawn(async move {
                let result: PortResult = prober.probe(addr, probe_timeout).await;
                bag.lock().await.push(result);
            });
        }

        let mut lost: usize = 0;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!("Probe task on {host} died before reporting: {e}");
                lost += 1;
            }
        }

        if lost > 0 {
            backfill_closed(batch, bag).await;
        }
    }
}

/// Records every port of `batch` missing from `bag` as closed.
async fn backfill_closed(batch: PortRange, bag: &ResultBag) {
    let mut results = bag.lock().await;
    let reported: HashSet<u16> = results
        .iter()
        .map(|r| r.port)
        .filter(|port| batch.contains(*port))
        .collect();

    for port in batch.to_iter().filter(|port| !reported.contains(port)) {
        warn!("No result for port {port}, recording it as closed");
        results.push(PortResult::new(port, PortState::Closed));
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
