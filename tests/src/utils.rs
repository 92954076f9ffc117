use std::net::Ipv4Addr;

use scanport_common::config::ScanConfig;
use std::time::Duration;
use tokio::net::TcpListener;

pub fn test_config(batch_size: usize) -> ScanConfig {
    ScanConfig {
        port: 0,
        batch_size,
        probe_timeout: Duration::from_millis(500),
    }
}

/// Keeps a loopback listener open for as long as the value lives.
pub struct OpenPort {
    pub port: u16,
    _listener: TcpListener,
}

impl OpenPort {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("failed to bind loopback listener");
        let port = listener.local_addr().expect("listener has no address").port();
        Self {
            port,
            _listener: listener,
        }
    }
}
