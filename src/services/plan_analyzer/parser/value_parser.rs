//! Typed parsing of showplan attribute values
//!
//! Showplan attributes are plain decimal strings ("0.0032831", "1.5E+07",
//! "100"). Anything absent, empty or unparsable falls back to the caller's
//! default instead of failing the analysis.

use std::str::FromStr;

/// Value parser for showplan attributes
pub struct ValueParser;

impl ValueParser {
    /// Parse a value, returning `None` for absent, blank or malformed input
    pub fn parse<T: FromStr>(raw: Option<&str>) -> Option<T> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<T>().ok()
    }

    /// Parse a value or fall back to `default`
    pub fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
        Self::parse(raw).unwrap_or(default)
    }

    /// Parse a float, rejecting NaN and infinities
    pub fn parse_f64(raw: Option<&str>) -> Option<f64> {
        Self::parse::<f64>(raw).filter(|v| v.is_finite())
    }

    /// Parse a row count: the float value floored to a non-negative integer.
    ///
    /// Estimated row counts are fractional ("1.5"); they are truncated, never
    /// rounded. Negative values clamp to zero.
    pub fn parse_row_count(raw: Option<&str>) -> Option<u64> {
        let value = Self::parse_f64(raw)?;
        if value <= 0.0 { Some(0) } else { Some(value.floor() as u64) }
    }

    /// Parse a showplan boolean ("true"/"false"/"1"/"0")
    pub fn parse_bool(raw: Option<&str>) -> bool {
        matches!(raw.map(str::trim), Some(v) if v.eq_ignore_ascii_case("true") || v == "1")
    }
}
