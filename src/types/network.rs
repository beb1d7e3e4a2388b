//! IP address checks
//!
//! Parsing delegates to `std::net`, which enforces strict dotted-quad
//! and `::`-compression grammar. Ports are parsed digit-strict so
//! signs and whitespace never slip through.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde_json::Value;

use crate::diag::ErrorCode;

/// Address family restriction (`$format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpFormat {
    #[default]
    Any,
    V4,
    V6,
}

/// Checks an IP address, optionally with a port: `ip:port` for v4 and
/// `[ip]:port` for v6.
pub(crate) fn check_ip(value: &Value, format: IpFormat, port: bool) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    if port {
        check_with_port(s, format)
    } else {
        check_bare(s, format)
    }
}

fn check_bare(s: &str, format: IpFormat) -> Result<(), ErrorCode> {
    let v4 = s.parse::<Ipv4Addr>().is_ok();
    let v6 = s.parse::<Ipv6Addr>().is_ok();
    let ok = match format {
        IpFormat::V4 => v4,
        IpFormat::V6 => v6,
        IpFormat::Any => v4 || v6,
    };
    if ok {
        Ok(())
    } else {
        Err(ErrorCode::InvalidFormat)
    }
}

fn check_with_port(s: &str, format: IpFormat) -> Result<(), ErrorCode> {
    if let Some(rest) = s.strip_prefix('[') {
        // [v6]:port
        if format == IpFormat::V4 {
            return Err(ErrorCode::InvalidFormat);
        }
        let (addr, port_text) = rest
            .split_once("]:")
            .ok_or(ErrorCode::InvalidFormat)?;
        if addr.parse::<Ipv6Addr>().is_err() {
            return Err(ErrorCode::InvalidFormat);
        }
        check_port(port_text)
    } else {
        // v4:port
        if format == IpFormat::V6 {
            return Err(ErrorCode::InvalidFormat);
        }
        let (addr, port_text) = s.rsplit_once(':').ok_or(ErrorCode::InvalidFormat)?;
        if addr.parse::<Ipv4Addr>().is_err() {
            return Err(ErrorCode::InvalidFormat);
        }
        check_port(port_text)
    }
}

fn check_port(text: &str) -> Result<(), ErrorCode> {
    if text.is_empty() || text.len() > 5 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorCode::InvalidFormat);
    }
    match text.parse::<u32>() {
        Ok(n) if n <= 65535 => Ok(()),
        _ => Err(ErrorCode::OutOfRange),
    }
}
