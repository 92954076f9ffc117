//! # Scan Target Model
//!
//! Defines the validated input of a port scan and the validator that
//! builds it from raw request text.
//!
//! A request carries three untrusted strings: a dotted-quad IPv4 address and
//! the two ends of an inclusive port range. [`validate`] checks them in that
//! order and is the only way a [`ScanTarget`] comes into existence.

use std::fmt::{self, Display};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::num::IntErrorKind;

use crate::error::ValidationError;
use crate::network::range::PortRange;

pub const MAX_PORT: i64 = 65_535;
const OCTET_COUNT: usize = 4;

/// A host plus the inclusive port range to probe on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    pub host: Ipv4Addr,
    pub ports: PortRange,
}

impl ScanTarget {
    pub fn new(host: Ipv4Addr, ports: PortRange) -> Self {
        Self { host, ports }
    }

    pub fn socket_addr(&self, port: u16) -> SocketAddrV4 {
        SocketAddrV4::new(self.host, port)
    }
}

impl Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.host,
            self.ports.begin(),
            self.ports.end()
        )
    }
}

/// Validates raw request input and builds a [`ScanTarget`].
///
/// The address is checked first, then both ports are parsed, then the
/// `0 <= begin <= end <= 65535` constraint is enforced.
pub fn validate(
    raw_host: &str,
    raw_begin: &str,
    raw_end: &str,
) -> Result<ScanTarget, ValidationError> {
    let host: Ipv4Addr = parse_host(raw_host)?;

    let begin: i64 = parse_port_number(raw_begin, raw_begin, raw_end)?;
    let end: i64 = parse_port_number(raw_end, raw_begin, raw_end)?;

    let invalid_range = || ValidationError::InvalidPortRange {
        begin: raw_begin.to_string(),
        end: raw_end.to_string(),
    };

    if !(is_valid_port(begin) && is_valid_port(end) && begin <= end) {
        return Err(invalid_range());
    }

    let range = PortRange::new(begin as u16, end as u16).ok_or_else(invalid_range)?;
    Ok(ScanTarget::new(host, range))
}

/// Single-port validity check, `0 <= value <= 65535`.
pub fn is_valid_port(value: i64) -> bool {
    (0..=MAX_PORT).contains(&value)
}

/// Parses a dotted quad: exactly four integer segments, each in `0..=255`.
///
/// Segments are read as plain integers, so `"010"` is accepted as 10.
fn parse_host(raw: &str) -> Result<Ipv4Addr, ValidationError> {
    let invalid = || ValidationError::InvalidAddress(raw.to_string());

    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() != OCTET_COUNT {
        return Err(invalid());
    }

    let mut octets = [0u8; OCTET_COUNT];
    for (slot, segment) in octets.iter_mut().zip(segments) {
        let value: i64 = segment.trim().parse().map_err(|_| invalid())?;
        *slot = u8::try_from(value).map_err(|_| invalid())?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Integer text that overflows is still numeric, so it is reported as an
/// out-of-range port rather than malformed input.
fn parse_port_number(raw: &str, raw_begin: &str, raw_end: &str) -> Result<i64, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(ValidationError::InvalidPortRange {
                begin: raw_begin.to_string(),
                end: raw_end.to_string(),
            })
        }
        Err(_) => Err(ValidationError::MalformedInput(raw.to_string())),
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
