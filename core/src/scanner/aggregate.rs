use scanport_common::network::port::{PortResult, ScanReport};

/// Orders an unordered bag of results by ascending port.
///
/// Each port appears exactly once per scan, so the order is total and two
/// scans of a stable target produce identical reports.
pub fn aggregate(mut bag: Vec<PortResult>) -> ScanReport {
    bag.sort_unstable_by_key(|result| result.port);
    ScanReport::from_sorted(bag)
}
