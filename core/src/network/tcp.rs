use std::net::SocketAddrV4;
use std::time::Duration;

use async_trait::async_trait;
use scanport_common::network::port::{PortResult, PortState};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::Prober;

/// Full TCP handshake prober backed by the tokio reactor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber;

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, addr: SocketAddrV4, probe_timeout: Duration) -> PortResult {
        handshake_probe(addr, probe_timeout).await
    }
}

/// Attempts one connect to `addr`, waiting at most `probe_timeout`.
///
/// Only a completed handshake counts as open. The stream (or the pending
/// connect, on timeout) is dropped before returning, which closes the socket.
pub async fn handshake_probe(addr: SocketAddrV4, probe_timeout: Duration) -> PortResult {
    let state: PortState = match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortState::Open
        }
        Ok(Err(e)) => {
            trace!("{addr} refused or unreachable: {e}");
            PortState::Closed
        }
        Err(_elapsed) => {
            trace!("{addr} timed out after {probe_timeout:?}");
            PortState::Closed
        }
    };

    PortResult::new(addr.port(), state)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn handshake_probe_reports_listening_port_open() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();

        let result = handshake_probe(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port), PROBE_TIMEOUT).await;
        assert_eq!(result, PortResult::new(port, PortState::Open));
    }

    #[tokio::test]
    async fn handshake_probe_reports_refused_port_closed() {
        let port: u16 = {
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let result = handshake_probe(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port), PROBE_TIMEOUT).await;
        assert_eq!(result, PortResult::new(port, PortState::Closed));
    }

    #[tokio::test]
    #[ignore]
    async fn handshake_probe_should_timeout_on_unreachable_ip() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(203, 0, 113, 1), 80);
        let result = handshake_probe(addr, Duration::from_millis(100)).await;
        assert_eq!(result.state, PortState::Closed);
    }

    #[tokio::test]
    #[ignore]
    async fn handshake_probe_should_find_known_open_port() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(1, 1, 1, 1), 443);
        let result = TcpConnectProber.probe(addr, Duration::from_secs(2)).await;
        assert!(result.is_open());
    }
}
