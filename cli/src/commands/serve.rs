//! HTTP boundary of the scanner.
//!
//! Exposes a single route, `GET /scan/{host}/{begin_port}/{end_port}`, which
//! validates the raw path segments, runs a full scan and answers with the
//! port-ordered JSON report. Rejected requests get `400 Bad Request` with the
//! validation message as body.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use scanport_common::{
    config::ScanConfig,
    error::ValidationError,
    network::{port::ScanReport, target},
};
use scanport_core::scanner;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub const SCAN_ROUTE: &str = "/scan/{host}/{begin_port}/{end_port}";

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("server can not be started on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] std::io::Error),
}

/// Rejection returned to the caller when the request fails validation.
pub struct Rejection(ValidationError);

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
    }
}

pub fn router(cfg: Arc<ScanConfig>) -> Router {
    Router::new()
        .route(SCAN_ROUTE, get(handle_scan))
        .with_state(cfg)
}

/// Binds the listen port; the returned listener is the one that gets served.
pub async fn bind(port: u16) -> Result<TcpListener, ServeError> {
    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .map_err(|source| ServeError::Bind { port, source })
}

pub async fn serve(cfg: ScanConfig) -> Result<(), ServeError> {
    let listener: TcpListener = bind(cfg.port).await?;
    info!(
        "Server started on port {} (batch size {}, timeout {:?})",
        cfg.port, cfg.batch_size, cfg.probe_timeout
    );

    let app = router(Arc::new(cfg)).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn handle_scan(
    State(cfg): State<Arc<ScanConfig>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    Path((host, begin_port, end_port)): Path<(String, String, String)>,
) -> Result<Json<ScanReport>, Rejection> {
    info!("Request from [{remote}] was accepted");

    let scan_target = target::validate(&host, &begin_port, &end_port).map_err(|e| {
        warn!("Rejected request from [{remote}]: {e}");
        Rejection(e)
    })?;

    let report: ScanReport = scanner::perform_scan(scan_target, &cfg).await;

    info!(
        "Sent response for [{remote}]: {} ports scanned on {}, {} open",
        report.len(),
        scan_target.host,
        report.open_ports().count()
    );
    Ok(Json(report))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, finishing in-flight scans");
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
