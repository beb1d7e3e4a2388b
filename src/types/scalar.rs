//! Numeric scalar checks: integers, floats, fixed-point decimals,
//! geographic coordinates

use serde_json::Value;

use crate::diag::ErrorCode;

/// Checks a bounded signed integer.
///
/// The value must be a JSON integer token; floats are not integers
/// even with a zero fraction.
pub(crate) fn check_int(value: &Value, min: i64, max: i64) -> Result<(), ErrorCode> {
    if !value.is_number() {
        return Err(ErrorCode::ExpectedNumber);
    }
    let n = match value.as_i64() {
        Some(n) => n,
        None => {
            // u64 beyond i64::MAX or a float token
            return if value.is_u64() {
                Err(ErrorCode::OutOfRange)
            } else {
                Err(ErrorCode::InvalidValue)
            };
        }
    };
    if n < min || n > max {
        return Err(ErrorCode::OutOfRange);
    }
    Ok(())
}

/// Checks a bounded unsigned integer.
pub(crate) fn check_uint(value: &Value, max: u64) -> Result<(), ErrorCode> {
    if !value.is_number() {
        return Err(ErrorCode::ExpectedNumber);
    }
    let n = match value.as_u64() {
        Some(n) => n,
        None => {
            return if value.is_i64() {
                // negative integer
                Err(ErrorCode::OutOfRange)
            } else {
                Err(ErrorCode::InvalidValue)
            };
        }
    };
    if n > max {
        return Err(ErrorCode::OutOfRange);
    }
    Ok(())
}

/// Checks a finite floating-point number. `serde_json` cannot hold
/// NaN or infinities, so any number token passes.
pub(crate) fn check_number(value: &Value) -> Result<(), ErrorCode> {
    if value.is_number() {
        Ok(())
    } else {
        Err(ErrorCode::ExpectedNumber)
    }
}

/// Checks a latitude or longitude bound.
pub(crate) fn check_coordinate(value: &Value, bound: f64) -> Result<(), ErrorCode> {
    let n = value.as_f64().ok_or(ErrorCode::ExpectedNumber)?;
    if n < -bound || n > bound {
        return Err(ErrorCode::OutOfRange);
    }
    Ok(())
}

/// Checks a fixed-point decimal with `precision` total digits and
/// `scale` fractional digits. Accepts JSON numbers and decimal
/// strings; digit counts come from the canonical decimal rendering.
pub(crate) fn check_numeric(value: &Value, precision: u32, scale: u32) -> Result<(), ErrorCode> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Err(ErrorCode::ExpectedNumber),
    };
    let (int_digits, frac_digits) = decimal_digits(&text).ok_or(ErrorCode::InvalidFormat)?;
    if frac_digits > scale || int_digits > precision - scale {
        return Err(ErrorCode::OutOfRange);
    }
    Ok(())
}

/// Splits a decimal rendering into (integer digits, fraction digits).
/// Returns None for anything that is not a plain signed decimal.
fn decimal_digits(text: &str) -> Option<(u32, u32)> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    if unsigned.is_empty() {
        return None;
    }
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Leading integer zeros and trailing fraction zeros carry no
    // significance for precision accounting.
    let int_digits = int_part.trim_start_matches('0').len().max(1) as u32;
    let frac_digits = frac_part.trim_end_matches('0').len() as u32;
    Some((int_digits, frac_digits))
}
