//! Type registry and the type catalog
//!
//! Every schema node resolves to a named type registered here. A
//! registry entry contributes three things: the check the compiled
//! validator runs, default values for the type's own directives, and
//! an optional shorthand parser (`numeric(p, s)`). Dispatch over the
//! catalog is exhaustive — adding a variant without wiring its check
//! is a compile error.

mod datetime;
mod network;
mod scalar;
mod special;
mod strings;

pub use datetime::DateTimeSpec;
pub use network::IpFormat;
pub use special::{IsbnFormat, MacSeparator, UuidFormat, UuidVersion};
pub use strings::TextFlavor;

use serde_json::{Map, Value};

use crate::diag::{DefineError, ErrorCode};

const I64_MIN_STR: &str = "-9223372036854775808";
const I64_MAX_STR: &str = "9223372036854775807";
const U64_MAX_STR: &str = "18446744073709551615";

/// Largest integer magnitude losslessly representable in a 53-bit
/// mantissa.
const SAFE_INT_MAX: i64 = (1 << 53) - 1;

/// Every registered type name, in catalog order.
pub const TYPE_NAMES: &[&str] = &[
    "any", "bool", "int", "uint", "int8", "int16", "int24", "int32", "int53", "uint8", "uint16",
    "uint24", "uint32", "uint53", "number", "double", "numeric", "lat", "lon", "bigint", "int64",
    "uint64", "char", "string", "text", "textline", "color", "creditcard", "isbn", "mac", "ip",
    "uuid", "date", "time", "datetime", "datetime-ms", "datetime-us", "object", "map", "array",
];

/// A fully resolved scalar type with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarType {
    Any,
    Bool,
    Int { min: i64, max: i64 },
    Uint { max: u64 },
    Number,
    Numeric { precision: u32, scale: u32 },
    Lat,
    Lon,
    /// Decimal-string integer, optionally bounded by the type itself
    /// (`int64`, `uint64`).
    Big {
        min: Option<&'static str>,
        max: Option<&'static str>,
    },
    Char { allowed: Option<String> },
    Text(TextFlavor),
    Color {
        css_names: bool,
        extra_names: Vec<(String, String)>,
    },
    CreditCard,
    Isbn { format: IsbnFormat },
    Mac { separator: MacSeparator },
    Ip { format: IpFormat, port: bool },
    Uuid {
        version: UuidVersion,
        format: UuidFormat,
    },
    DateTime(DateTimeSpec),
}

/// What a type name denotes: a scalar check or a container shape.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseType {
    Scalar(ScalarType),
    Object,
    Map,
    Array,
}

impl ScalarType {
    /// Runs the type check. Emptiness (`$empty`) and null handling are
    /// the caller's concern; the value here is neither null nor an
    /// admitted empty string.
    pub(crate) fn check(&self, value: &Value) -> Result<(), ErrorCode> {
        match self {
            ScalarType::Any => Ok(()),
            ScalarType::Bool => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(ErrorCode::ExpectedBoolean)
                }
            }
            ScalarType::Int { min, max } => scalar::check_int(value, *min, *max),
            ScalarType::Uint { max } => scalar::check_uint(value, *max),
            ScalarType::Number => scalar::check_number(value),
            ScalarType::Numeric { precision, scale } => {
                scalar::check_numeric(value, *precision, *scale)
            }
            ScalarType::Lat => scalar::check_coordinate(value, 90.0),
            ScalarType::Lon => scalar::check_coordinate(value, 180.0),
            ScalarType::Big { min, max } => check_big(value, *min, *max),
            ScalarType::Char { allowed } => strings::check_char(value, allowed.as_deref()),
            ScalarType::Text(flavor) => strings::check_text(value, *flavor),
            ScalarType::Color {
                css_names,
                extra_names,
            } => special::check_color(value, *css_names, extra_names),
            ScalarType::CreditCard => special::check_credit_card(value),
            ScalarType::Isbn { format } => special::check_isbn(value, *format),
            ScalarType::Mac { separator } => special::check_mac(value, *separator),
            ScalarType::Ip { format, port } => network::check_ip(value, *format, *port),
            ScalarType::Uuid { version, format } => special::check_uuid(value, *version, *format),
            ScalarType::DateTime(spec) => datetime::check_datetime(value, spec),
        }
    }

    /// True for types whose values are strings, where `$empty` can
    /// admit the empty string.
    pub(crate) fn is_string_like(&self) -> bool {
        matches!(
            self,
            ScalarType::Char { .. }
                | ScalarType::Text(_)
                | ScalarType::Color { .. }
                | ScalarType::CreditCard
                | ScalarType::Isbn { .. }
                | ScalarType::Mac { .. }
                | ScalarType::Ip { .. }
                | ScalarType::Uuid { .. }
                | ScalarType::DateTime(_)
        )
    }

    /// True for types whose `$min`/`$max` bounds are numbers.
    pub(crate) fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarType::Int { .. }
                | ScalarType::Uint { .. }
                | ScalarType::Number
                | ScalarType::Numeric { .. }
                | ScalarType::Lat
                | ScalarType::Lon
        )
    }

    /// True for the decimal-string integer family, whose
    /// `$min`/`$max` bounds are big-integer strings.
    pub(crate) fn is_big(&self) -> bool {
        matches!(self, ScalarType::Big { .. })
    }
}

fn check_big(
    value: &Value,
    min: Option<&'static str>,
    max: Option<&'static str>,
) -> Result<(), ErrorCode> {
    let s = value.as_str().ok_or(ErrorCode::ExpectedString)?;
    if !crate::misc::is_big_int(s) {
        return Err(ErrorCode::InvalidFormat);
    }
    if let Some(min) = min {
        if crate::misc::compare_big_int(s, min).is_lt() {
            return Err(ErrorCode::OutOfRange);
        }
    }
    if let Some(max) = max {
        if crate::misc::compare_big_int(s, max).is_gt() {
            return Err(ErrorCode::OutOfRange);
        }
    }
    Ok(())
}

/// Directives owned by each type, beyond the common set. Used by the
/// normalizer to reject unknown directives.
pub(crate) fn type_directives(name: &str) -> &'static [&'static str] {
    match name {
        "numeric" => &["$precision", "$scale"],
        "color" => &["$cssNames", "$extraNames"],
        "isbn" => &["$format"],
        "mac" => &["$separator"],
        "ip" => &["$format", "$port"],
        "uuid" => &["$version", "$format"],
        "date" | "time" | "datetime" | "datetime-ms" | "datetime-us" => {
            &["$format", "$leapYear", "$leapSecond"]
        }
        "map" | "array" => &["$data"],
        _ => &[],
    }
}

/// True when the registry knows the name (shorthand suffixes already
/// stripped; `numeric(p,s)` counts as `numeric`).
pub fn is_known_type(name: &str) -> bool {
    TYPE_NAMES.contains(&base_name(name))
}

fn base_name(name: &str) -> &str {
    match name.find('(') {
        Some(i) => &name[..i],
        None => name,
    }
}

/// Resolves a base type name plus its directive bag into a
/// [`BaseType`], applying per-type directive defaults.
pub(crate) fn resolve(name: &str, bag: &Map<String, Value>) -> Result<BaseType, DefineError> {
    // Parenthesized arguments are a numeric-only shorthand.
    if name.contains('(') && base_name(name) != "numeric" {
        return Err(DefineError::UnknownType(name.to_string()));
    }
    let scalar = match base_name(name) {
        "any" => ScalarType::Any,
        "bool" => ScalarType::Bool,
        "int" => ScalarType::Int {
            min: i64::MIN,
            max: i64::MAX,
        },
        "uint" => ScalarType::Uint { max: u64::MAX },
        "int8" => ScalarType::Int { min: -128, max: 127 },
        "int16" => ScalarType::Int {
            min: -32768,
            max: 32767,
        },
        "int24" => ScalarType::Int {
            min: -8_388_608,
            max: 8_388_607,
        },
        "int32" => ScalarType::Int {
            min: i32::MIN as i64,
            max: i32::MAX as i64,
        },
        "int53" => ScalarType::Int {
            min: -SAFE_INT_MAX,
            max: SAFE_INT_MAX,
        },
        "uint8" => ScalarType::Uint { max: 255 },
        "uint16" => ScalarType::Uint { max: 65535 },
        "uint24" => ScalarType::Uint { max: 16_777_215 },
        "uint32" => ScalarType::Uint {
            max: u32::MAX as u64,
        },
        "uint53" => ScalarType::Uint {
            max: SAFE_INT_MAX as u64,
        },
        "number" | "double" => ScalarType::Number,
        "numeric" => resolve_numeric(name, bag)?,
        "lat" => ScalarType::Lat,
        "lon" => ScalarType::Lon,
        "bigint" => ScalarType::Big {
            min: None,
            max: None,
        },
        "int64" => ScalarType::Big {
            min: Some(I64_MIN_STR),
            max: Some(I64_MAX_STR),
        },
        "uint64" => ScalarType::Big {
            min: Some("0"),
            max: Some(U64_MAX_STR),
        },
        "char" => ScalarType::Char {
            allowed: match bag.get("$allowed") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            },
        },
        "string" => ScalarType::Text(TextFlavor::Plain),
        "text" => ScalarType::Text(TextFlavor::Text),
        "textline" => ScalarType::Text(TextFlavor::TextLine),
        "color" => ScalarType::Color {
            css_names: get_bool(bag, "$cssNames", true)?,
            extra_names: resolve_extra_names(bag)?,
        },
        "creditcard" => ScalarType::CreditCard,
        "isbn" => ScalarType::Isbn {
            format: match get_str(bag, "$format")? {
                None | Some("any") => IsbnFormat::Any,
                Some("isbn10") => IsbnFormat::Isbn10,
                Some("isbn13") => IsbnFormat::Isbn13,
                Some(other) => {
                    return Err(bad_directive("$format", format!("unknown isbn form '{}'", other)))
                }
            },
        },
        "mac" => ScalarType::Mac {
            separator: match get_str(bag, "$separator")? {
                None | Some(":") => MacSeparator::Colon,
                Some("-") => MacSeparator::Dash,
                Some("") => MacSeparator::None,
                Some(other) => {
                    return Err(bad_directive(
                        "$separator",
                        format!("unknown separator '{}'", other),
                    ))
                }
            },
        },
        "ip" => ScalarType::Ip {
            format: match get_str(bag, "$format")? {
                None | Some("any") => IpFormat::Any,
                Some("ipv4") => IpFormat::V4,
                Some("ipv6") => IpFormat::V6,
                Some(other) => {
                    return Err(bad_directive("$format", format!("unknown ip form '{}'", other)))
                }
            },
            port: get_bool(bag, "$port", false)?,
        },
        "uuid" => ScalarType::Uuid {
            version: resolve_uuid_version(bag)?,
            format: match get_str(bag, "$format")? {
                None | Some("rfc") => UuidFormat::Rfc,
                Some("windows") => UuidFormat::Windows,
                Some("any") => UuidFormat::Any,
                Some(other) => {
                    return Err(bad_directive(
                        "$format",
                        format!("unknown uuid form '{}'", other),
                    ))
                }
            },
        },
        "date" => resolve_datetime(bag, "YYYY-MM-DD")?,
        "time" => resolve_datetime(bag, "HH:mm:ss")?,
        "datetime" => resolve_datetime(bag, "YYYY-MM-DD HH:mm:ss")?,
        "datetime-ms" => resolve_datetime(bag, "YYYY-MM-DD HH:mm:ss.SSS")?,
        "datetime-us" => resolve_datetime(bag, "YYYY-MM-DD HH:mm:ss.SSSSSS")?,
        "object" => return Ok(BaseType::Object),
        "map" => return Ok(BaseType::Map),
        "array" => return Ok(BaseType::Array),
        other => return Err(DefineError::UnknownType(other.to_string())),
    };
    Ok(BaseType::Scalar(scalar))
}

fn resolve_numeric(name: &str, bag: &Map<String, Value>) -> Result<ScalarType, DefineError> {
    // numeric(p, s) shorthand supplies defaults; explicit directives win.
    let mut precision: Option<u32> = None;
    let mut scale: Option<u32> = None;
    if let Some(args) = name.strip_prefix("numeric(") {
        let args = args.strip_suffix(')').ok_or_else(|| DefineError::BadShorthand {
            shorthand: name.to_string(),
            reason: "missing closing parenthesis".into(),
        })?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(DefineError::BadShorthand {
                shorthand: name.to_string(),
                reason: "expected numeric(precision, scale)".into(),
            });
        }
        precision = Some(parse_u32(parts[0], name)?);
        scale = Some(parse_u32(parts[1], name)?);
    }
    if let Some(p) = get_u32(bag, "$precision")? {
        precision = Some(p);
    }
    if let Some(s) = get_u32(bag, "$scale")? {
        scale = Some(s);
    }
    let precision = precision
        .ok_or_else(|| bad_directive("$precision", "numeric requires a precision".to_string()))?;
    let scale = scale.unwrap_or(0);
    if scale >= precision {
        return Err(DefineError::BadPrecision { precision, scale });
    }
    Ok(ScalarType::Numeric { precision, scale })
}

fn parse_u32(text: &str, shorthand: &str) -> Result<u32, DefineError> {
    text.parse().map_err(|_| DefineError::BadShorthand {
        shorthand: shorthand.to_string(),
        reason: format!("'{}' is not a non-negative integer", text),
    })
}

fn resolve_extra_names(bag: &Map<String, Value>) -> Result<Vec<(String, String)>, DefineError> {
    match bag.get("$extraNames") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => {
            let mut names = Vec::with_capacity(map.len());
            for (k, v) in map {
                let hex = v.as_str().ok_or_else(|| {
                    bad_directive("$extraNames", format!("value for '{}' must be a string", k))
                })?;
                names.push((k.clone(), hex.to_string()));
            }
            Ok(names)
        }
        Some(_) => Err(bad_directive(
            "$extraNames",
            "expected an object of name to hex".to_string(),
        )),
    }
}

fn resolve_uuid_version(bag: &Map<String, Value>) -> Result<UuidVersion, DefineError> {
    let text = match get_str(bag, "$version")? {
        None => return Ok(UuidVersion::Any),
        Some(text) => text,
    };
    let (digits, minimum) = match text.strip_suffix('+') {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    let n: u8 = digits
        .parse()
        .map_err(|_| bad_directive("$version", format!("unknown version '{}'", text)))?;
    if !(1..=5).contains(&n) {
        return Err(bad_directive(
            "$version",
            format!("version must be 1 through 5, got '{}'", text),
        ));
    }
    Ok(if minimum {
        UuidVersion::Min(n)
    } else {
        UuidVersion::Exact(n)
    })
}

fn resolve_datetime(bag: &Map<String, Value>, default_format: &str) -> Result<ScalarType, DefineError> {
    let format = get_str(bag, "$format")?.unwrap_or(default_format);
    Ok(ScalarType::DateTime(DateTimeSpec {
        format: datetime::parse_format(format)?,
        leap_year: get_bool(bag, "$leapYear", true)?,
        leap_second: get_bool(bag, "$leapSecond", false)?,
    }))
}

fn bad_directive(directive: &str, reason: String) -> DefineError {
    DefineError::BadDirective {
        directive: directive.to_string(),
        reason,
    }
}

fn get_bool(bag: &Map<String, Value>, key: &str, default: bool) -> Result<bool, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(bad_directive(key, "expected a boolean".to_string())),
    }
}

fn get_str<'a>(bag: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(bad_directive(key, "expected a string".to_string())),
    }
}

fn get_u32(bag: &Map<String, Value>, key: &str) -> Result<Option<u32>, DefineError> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let n = v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| bad_directive(key, "expected a non-negative integer".to_string()))?;
            Ok(Some(n))
        }
    }
}
