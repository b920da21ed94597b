//! Primitive resolvers for environment variables
//!
//! Each resolver reads one variable and converts it to a typed value.
//! `None` means the variable is unset, is not valid unicode, or does not
//! parse as the target type. The two cases are deliberately indistinguishable
//! here; check [`std::env::var_os`] first when they must be told apart.

use std::env;

/// Read `key` verbatim. An empty value is still present.
pub fn resolve_string(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Read `key` as a base-10 signed 64-bit integer.
pub fn resolve_i64(key: &str) -> Option<i64> {
    resolve_string(key).as_deref().and_then(parse_i64)
}

/// Read `key` as a base-10 unsigned 64-bit integer.
pub fn resolve_u64(key: &str) -> Option<u64> {
    resolve_string(key).as_deref().and_then(parse_u64)
}

/// Read `key` as a platform-width signed integer.
pub fn resolve_isize(key: &str) -> Option<isize> {
    resolve_i64(key).and_then(|v| isize::try_from(v).ok())
}

/// Read `key` as a platform-width unsigned integer.
pub fn resolve_usize(key: &str) -> Option<usize> {
    resolve_u64(key).and_then(|v| usize::try_from(v).ok())
}

/// Read `key` as a boolean. See [`parse_bool`] for the accepted spellings.
pub fn resolve_bool(key: &str) -> Option<bool> {
    resolve_string(key).as_deref().and_then(parse_bool)
}

/// Read `key` as a 64-bit float.
pub fn resolve_f64(key: &str) -> Option<f64> {
    resolve_string(key).as_deref().and_then(parse_f64)
}

/// Parse a base-10 signed integer with an optional `+` or `-` sign.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

/// Parse a base-10 unsigned integer. No sign is accepted.
pub fn parse_u64(value: &str) -> Option<u64> {
    // `u64::from_str` tolerates a leading `+`
    if value.is_empty() || value.starts_with('+') {
        return None;
    }
    value.parse().ok()
}

/// Parse a boolean.
///
/// Accepted spellings:
/// - true: `1`, `t`, `T`, `TRUE`, `true`, `True`
/// - false: `0`, `f`, `F`, `FALSE`, `false`, `False`
///
/// Anything else, including other casings such as `tRUE`, is rejected.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a decimal floating point literal.
///
/// `inf`, `infinity` and `nan` are accepted in any case. A finite literal
/// too large for `f64` is rejected instead of saturating to infinity.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    let parsed: f64 = value.parse().ok()?;
    if parsed.is_infinite() && !is_infinity_literal(value) {
        return None;
    }
    Some(parsed)
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
