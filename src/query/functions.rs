//! Forensic scalar functions available inside every read-only session.
//!
//! Each function is pure and total: NULL or undecodable input yields NULL instead
//! of an error, so one malformed artifact never aborts an analyst's query.
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike as _};
use regex::Regex;
use rusqlite::{Connection, functions::FunctionFlags, types::ValueRef};
use std::sync::LazyLock;

use super::display_value;

/// A scalar function registered on every read-only connection.
#[derive(Clone, Copy)]
pub struct ForensicFunction {
    pub name: &'static str,
    pub arity: i32,
    pub apply: fn(ValueRef<'_>) -> Option<String>,
}

pub const FORENSIC_FUNCTIONS: [ForensicFunction; 12] = [
    ForensicFunction { name: "unix_to_datetime", arity: 1, apply: unix_to_datetime },
    ForensicFunction { name: "webkit_to_datetime", arity: 1, apply: webkit_to_datetime },
    ForensicFunction { name: "ios_to_datetime", arity: 1, apply: ios_to_datetime },
    ForensicFunction { name: "filetime_to_datetime", arity: 1, apply: filetime_to_datetime },
    ForensicFunction { name: "decode_base64", arity: 1, apply: decode_base64 },
    ForensicFunction { name: "encode_base64", arity: 1, apply: encode_base64 },
    ForensicFunction { name: "decode_hex", arity: 1, apply: decode_hex },
    ForensicFunction { name: "to_hex", arity: 1, apply: to_hex },
    ForensicFunction { name: "extract_email", arity: 1, apply: extract_email },
    ForensicFunction { name: "extract_ip", arity: 1, apply: extract_ip },
    ForensicFunction { name: "extract_url", arity: 1, apply: extract_url },
    ForensicFunction { name: "extract_phone", arity: 1, apply: extract_phone },
];

pub fn register_forensic_functions(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    for function in FORENSIC_FUNCTIONS {
        let apply = function.apply;
        conn.create_scalar_function(function.name, function.arity, flags, move |ctx| {
            Ok(apply(ctx.get_raw(0)))
        })?;
    }
    Ok(())
}

// --- Timestamps ---

fn epoch(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
}

fn as_number(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f),
        ValueRef::Text(t) => std::str::from_utf8(t).ok()?.trim().parse().ok(),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

/// `epoch + micros`, rounded to the microsecond, as `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
fn offset_iso(epoch_year: i32, micros: f64) -> Option<String> {
    if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
        return None;
    }
    let at = epoch(epoch_year)?.checked_add_signed(TimeDelta::microseconds(micros.round() as i64))?;
    let iso = if at.nanosecond() == 0 {
        at.format("%Y-%m-%dT%H:%M:%S")
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f")
    };
    Some(iso.to_string())
}

/// Seconds since 1970-01-01.
pub fn unix_to_datetime(value: ValueRef<'_>) -> Option<String> {
    offset_iso(1970, as_number(value)? * 1e6)
}

/// Microseconds since 1601-01-01 (Chrome/WebKit).
pub fn webkit_to_datetime(value: ValueRef<'_>) -> Option<String> {
    offset_iso(1601, as_number(value)?)
}

/// Seconds since 2001-01-01 (iOS/macOS Core Data).
pub fn ios_to_datetime(value: ValueRef<'_>) -> Option<String> {
    offset_iso(2001, as_number(value)? * 1e6)
}

/// 100 ns intervals since 1601-01-01 (Windows FILETIME).
pub fn filetime_to_datetime(value: ValueRef<'_>) -> Option<String> {
    offset_iso(1601, as_number(value)? / 10.0)
}

// --- Encodings ---

fn bytes_of(value: ValueRef<'_>) -> Option<&[u8]> {
    match value {
        ValueRef::Text(b) | ValueRef::Blob(b) => Some(b),
        _ => None,
    }
}

pub fn decode_base64(value: ValueRef<'_>) -> Option<String> {
    let text = std::str::from_utf8(bytes_of(value)?).ok()?;
    let decoded = STANDARD.decode(text.trim()).ok()?;
    Some(String::from_utf8_lossy(&decoded).into_owned())
}

pub fn encode_base64(value: ValueRef<'_>) -> Option<String> {
    Some(STANDARD.encode(display_value(value)?))
}

pub fn decode_hex(value: ValueRef<'_>) -> Option<String> {
    let text = std::str::from_utf8(bytes_of(value)?).ok()?;
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let decoded = hex::decode(compact).ok()?;
    Some(String::from_utf8_lossy(&decoded).into_owned())
}

pub fn to_hex(value: ValueRef<'_>) -> Option<String> {
    Some(hex::encode(display_value(value)?))
}

// --- Extractors ---

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern"));
static IPV4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("ipv4 pattern"));
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("url pattern"));
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}").expect("phone pattern")
});

fn first_match(pattern: &Regex, value: ValueRef<'_>) -> Option<String> {
    let text = display_value(value)?;
    pattern.find(&text).map(|m| m.as_str().to_string())
}

pub fn extract_email(value: ValueRef<'_>) -> Option<String> {
    first_match(&EMAIL, value)
}

pub fn extract_ip(value: ValueRef<'_>) -> Option<String> {
    first_match(&IPV4, value)
}

pub fn extract_url(value: ValueRef<'_>) -> Option<String> {
    first_match(&URL, value)
}

/// North-American formats: `(123) 456-7890`, `123-456-7890`, `123.456.7890`, `+1 …`.
pub fn extract_phone(value: ValueRef<'_>) -> Option<String> {
    first_match(&PHONE, value)
}
