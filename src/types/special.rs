//! Domain-specific string checks: colors, credit cards, ISBN, MAC
//! addresses, UUIDs

use serde_json::Value;

use crate::diag::ErrorCode;
use crate::misc::css_color_hex;

/// ISBN form restriction (`$format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsbnFormat {
    #[default]
    Any,
    Isbn10,
    Isbn13,
}

/// MAC group separator (`$separator`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacSeparator {
    #[default]
    Colon,
    Dash,
    None,
}

/// UUID version constraint (`$version`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidVersion {
    #[default]
    Any,
    Exact(u8),
    /// `"N+"`: version N or newer.
    Min(u8),
}

/// UUID brace form (`$format`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidFormat {
    /// Unbraced 8-4-4-4-12 only. This is the default.
    #[default]
    Rfc,
    /// Braced `{...}` required.
    Windows,
    /// Braced or unbraced.
    Any,
}

/// Checks a color value: `#RGB`, `#RRGGBB` (case-insensitive), CSS
/// names when `css_names`, and caller-supplied extra names
/// (case-insensitive).
pub(crate) fn check_color(
    value: &Value,
    css_names: bool,
    extra_names: &[(String, String)],
) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    if let Some(hex) = s.strip_prefix('#') {
        let ok = (hex.len() == 3 || hex.len() == 6) && hex.bytes().all(|b| b.is_ascii_hexdigit());
        return if ok { Ok(()) } else { Err(ErrorCode::InvalidFormat) };
    }
    if css_names && css_color_hex(s).is_some() {
        return Ok(());
    }
    if extra_names
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(s))
    {
        return Ok(());
    }
    Err(ErrorCode::InvalidFormat)
}

/// Checks a credit-card number: digits only, 13-19 long, Luhn
/// checksum. No issuer rules.
pub(crate) fn check_credit_card(value: &Value) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    if !s.bytes().all(|b| b.is_ascii_digit()) || s.len() < 13 || s.len() > 19 {
        return Err(ErrorCode::InvalidFormat);
    }
    if luhn_checksum(s) {
        Ok(())
    } else {
        Err(ErrorCode::InvalidValue)
    }
}

fn luhn_checksum(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in digits.bytes().rev().enumerate() {
        let mut d = (b - b'0') as u32;
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

/// Checks an ISBN in 10- or 13-digit form with a proper checksum.
/// `-` and space separators are ignored.
pub(crate) fn check_isbn(value: &Value, format: IsbnFormat) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    let compact: String = s.chars().filter(|c| *c != '-' && *c != ' ').collect();
    match compact.len() {
        10 if format != IsbnFormat::Isbn13 => {
            if !isbn10_shape(&compact) {
                return Err(ErrorCode::InvalidFormat);
            }
            if isbn10_checksum(&compact) {
                Ok(())
            } else {
                Err(ErrorCode::InvalidValue)
            }
        }
        13 if format != IsbnFormat::Isbn10 => {
            if !compact.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ErrorCode::InvalidFormat);
            }
            if isbn13_checksum(&compact) {
                Ok(())
            } else {
                Err(ErrorCode::InvalidValue)
            }
        }
        _ => Err(ErrorCode::InvalidFormat),
    }
}

fn isbn10_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes[..9].iter().all(|b| b.is_ascii_digit())
        && (bytes[9].is_ascii_digit() || bytes[9] == b'X' || bytes[9] == b'x')
}

fn isbn10_checksum(s: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in s.bytes().enumerate() {
        let d = if b == b'X' || b == b'x' {
            10
        } else {
            (b - b'0') as u32
        };
        sum += (10 - i as u32) * d;
    }
    sum % 11 == 0
}

fn isbn13_checksum(s: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in s.bytes().enumerate() {
        let d = (b - b'0') as u32;
        sum += if i % 2 == 0 { d } else { 3 * d };
    }
    sum % 10 == 0
}

/// Checks a 48-bit MAC address with the configured separator.
pub(crate) fn check_mac(value: &Value, separator: MacSeparator) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    let ok = match separator {
        MacSeparator::Colon => mac_grouped(s, ':'),
        MacSeparator::Dash => mac_grouped(s, '-'),
        MacSeparator::None => s.len() == 12 && s.bytes().all(|b| b.is_ascii_hexdigit()),
    };
    if ok {
        Ok(())
    } else {
        Err(ErrorCode::InvalidFormat)
    }
}

fn mac_grouped(s: &str, sep: char) -> bool {
    let groups: Vec<&str> = s.split(sep).collect();
    groups.len() == 6
        && groups
            .iter()
            .all(|g| g.len() == 2 && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Checks a UUID against version and brace-form constraints.
pub(crate) fn check_uuid(
    value: &Value,
    version: UuidVersion,
    format: UuidFormat,
) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    let braced = s.starts_with('{') && s.ends_with('}');
    match format {
        UuidFormat::Rfc if braced => return Err(ErrorCode::InvalidFormat),
        UuidFormat::Windows if !braced => return Err(ErrorCode::InvalidFormat),
        _ => {}
    }
    let inner = if braced { &s[1..s.len() - 1] } else { s };
    if !uuid_shape(inner) {
        return Err(ErrorCode::InvalidFormat);
    }
    // Version nibble: first hex digit of the third group.
    let nibble = inner.as_bytes()[14] as char;
    let v = nibble.to_digit(16).expect("shape verified") as u8;
    let ok = match version {
        UuidVersion::Any => true,
        UuidVersion::Exact(n) => v == n,
        UuidVersion::Min(n) => v >= n,
    };
    if ok {
        Ok(())
    } else {
        Err(ErrorCode::InvalidValue)
    }
}

fn uuid_shape(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    let widths = [8, 4, 4, 4, 12];
    groups.len() == widths.len()
        && groups
            .iter()
            .zip(widths)
            .all(|(g, w)| g.len() == w && g.bytes().all(|b| b.is_ascii_hexdigit()))
}
