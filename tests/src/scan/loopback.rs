use scanport_common::network::port::{PortState, ScanReport};
use scanport_common::network::target::{self, ScanTarget};
use scanport_core::scanner;

use crate::utils::{OpenPort, test_config};

fn ports_of(report: &ScanReport) -> Vec<u16> {
    report.iter().map(|r| r.port).collect()
}

/// Nothing listens on the low privileged ports 10-20 of a test machine.
#[tokio::test]
async fn loopback_low_ports_are_closed() {
    let scan_target: ScanTarget = target::validate("127.0.0.1", "10", "20").unwrap();

    let report = scanner::perform_scan(scan_target, &test_config(5)).await;

    assert_eq!(report.len(), 11);
    assert_eq!(ports_of(&report), (10..=20).collect::<Vec<u16>>());
    assert!(report.iter().all(|r| r.state == PortState::Closed));
}

#[tokio::test]
async fn listener_started_for_the_test_is_open() {
    let open = OpenPort::bind().await;
    let begin = open.port.saturating_sub(2);
    let end = open.port.saturating_add(2);
    let scan_target = target::validate("127.0.0.1", &begin.to_string(), &end.to_string()).unwrap();

    let report = scanner::perform_scan(scan_target, &test_config(2)).await;

    assert_eq!(usize::from(end - begin) + 1, report.len());
    assert_eq!(ports_of(&report), (begin..=end).collect::<Vec<u16>>());
    let result = report.iter().find(|r| r.port == open.port).unwrap();
    assert_eq!(result.state, PortState::Open);
}

#[tokio::test]
async fn single_port_range_yields_one_entry() {
    let open = OpenPort::bind().await;
    let port = open.port.to_string();
    let scan_target = target::validate("127.0.0.1", &port, &port).unwrap();

    let report = scanner::perform_scan(scan_target, &test_config(5)).await;

    assert_eq!(report.len(), 1);
    assert_eq!(report.open_ports().collect::<Vec<u16>>(), vec![open.port]);
}

#[tokio::test]
async fn repeated_scans_of_a_stable_target_match() {
    let open = OpenPort::bind().await;
    let begin = open.port.saturating_sub(5);
    let end = open.port.saturating_add(5);
    let scan_target = target::validate("127.0.0.1", &begin.to_string(), &end.to_string()).unwrap();

    let first = scanner::perform_scan(scan_target, &test_config(16)).await;
    let second = scanner::perform_scan(scan_target, &test_config(3)).await;

    assert_eq!(first, second);
    assert_eq!(ports_of(&first), (begin..=end).collect::<Vec<u16>>());
    assert!(first.open_ports().any(|p| p == open.port));
}
