use std::time::Instant;

use scanport_common::{config::ScanConfig, network::target};
use scanport_core::scanner;
use tracing::info;

use crate::terminal::print;

/// One-shot scan from the command line; the JSON report goes to stdout.
pub async fn scan(host: &str, begin_port: &str, end_port: &str, cfg: &ScanConfig) -> anyhow::Result<()> {
    let scan_target = target::validate(host, begin_port, end_port)?;
    info!("Scanning {scan_target}");

    let start_time: Instant = Instant::now();
    let report = scanner::perform_scan(scan_target, cfg).await;
    let elapsed = start_time.elapsed();

    print::json(&report)?;
    info!(
        "Scan complete: {} of {} ports open in {:.2}s",
        report.open_ports().count(),
        report.len(),
        elapsed.as_secs_f64()
    );
    Ok(())
}
