use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scanport_common::network::port::{PortResult, PortState};
use scanport_common::network::range::PortRange;
use scanport_common::network::target::ScanTarget;
use scanport_core::network::tcp::TcpConnectProber;
use scanport_core::scanner::{BatchScheduler, Prober, aggregate::aggregate};

use crate::utils::{OpenPort, test_config};

/// Wraps the real TCP prober and counts overlapping probes.
struct InstrumentedProber {
    inner: TcpConnectProber,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl Prober for InstrumentedProber {
    async fn probe(&self, addr: SocketAddrV4, probe_timeout: Duration) -> PortResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let result = self.inner.probe(addr, probe_timeout).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batch_of_five_over_twenty_three_ports() {
    let open = OpenPort::bind().await;
    // 23-port window around the listener, shifted down near the top of the port space.
    let begin = open.port.saturating_sub(11).min(u16::MAX - 22);
    let end = begin + 22;
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let prober = InstrumentedProber {
        inner: TcpConnectProber,
        in_flight: in_flight.clone(),
        peak: peak.clone(),
    };
    let scheduler = BatchScheduler::from_config(prober, &test_config(5));
    let scan_target = ScanTarget::new(Ipv4Addr::LOCALHOST, PortRange::new(begin, end).unwrap());

    let report = aggregate(scheduler.scan(scan_target).await);

    assert_eq!(report.len(), 23);
    assert!(peak.load(Ordering::SeqCst) <= 5, "peak was {}", peak.load(Ordering::SeqCst));
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    let state = report.iter().find(|r| r.port == open.port).map(|r| r.state);
    assert_eq!(state, Some(PortState::Open));
}
