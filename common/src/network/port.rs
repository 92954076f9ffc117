//! # Port Scan Results
//!
//! The per-port outcome of a probe and the ordered report handed back to
//! callers. Both serialize to the wire format of the HTTP boundary:
//! `[{"port": 22, "state": "open"}, {"port": 23, "state": "close"}]`.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Two-valued connectivity state.
///
/// Refused, timed out and unreachable all collapse into [`PortState::Closed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortState {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "close")]
    Closed,
}

impl Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PortState::Open => "open",
            PortState::Closed => "close",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortResult {
    pub port: u16,
    pub state: PortState,
}

impl PortResult {
    pub fn new(port: u16, state: PortState) -> Self {
        Self { port, state }
    }

    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}

/// Port-ascending sequence of results, one entry per scanned port.
///
/// Only built through [`ScanReport::from_sorted`], so it is serialize-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanReport(Vec<PortResult>);

impl ScanReport {
    /// Builds a report from results that are already sorted by port.
    pub fn from_sorted(results: Vec<PortResult>) -> Self {
        debug_assert!(results.windows(2).all(|w| w[0].port < w[1].port));
        Self(results)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortResult> {
        self.0.iter()
    }

    pub fn open_ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().filter(|r| r.is_open()).map(|r| r.port)
    }
}

impl<'a> IntoIterator for &'a ScanReport {
    type Item = &'a PortResult;
    type IntoIter = std::slice::Iter<'a, PortResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
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
