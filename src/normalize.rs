//! Canonicalization of raw configuration values for comparison.
//!
//! Configuration sources spell the same logical setting differently:
//! `ON` vs `1`, `512K` vs `524288`, reordered `sql_mode` lists. Without
//! canonicalization nearly every comparison would be a false positive.

use regex::Regex;

use crate::loader::RawValue;

const KIB: i64 = 1024;
const GIB: i64 = 1024 * 1024 * 1024;

/// The canonical comparable form of a raw value. Produced on demand during
/// comparison; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Canonicalizes values. Holds the compiled numeric-suffix pattern as
/// immutable data, so normalizers can be shared freely.
#[derive(Debug, Clone)]
pub struct Normalizer {
    numeric: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            // Digits with an optional K/G binary-unit suffix. Anything with
            // another suffix (e.g. `16M`) falls through to the string rule.
            numeric: Regex::new(r"^(\d+)([kKgG])?$").expect("static pattern"),
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the canonical form of `value` under key `key`.
    ///
    /// Total over any input; unrecognized forms fall through to a
    /// lowercased-string default.
    pub fn normalize(&self, key: &str, value: &RawValue) -> CanonicalValue {
        match value {
            // Booleans compare only to other booleans
            RawValue::Bool(b) => CanonicalValue::Bool(*b),
            // 0/1 from a JSON template mean off/on, same as the textual
            // spellings below
            RawValue::Int(0) => CanonicalValue::Bool(false),
            RawValue::Int(1) => CanonicalValue::Bool(true),
            RawValue::Int(n) => CanonicalValue::Int(*n),
            RawValue::Float(x) => self.normalize_str(key, &x.to_string()),
            RawValue::Str(s) => self.normalize_str(key, s),
        }
    }

    fn normalize_str(&self, key: &str, raw: &str) -> CanonicalValue {
        let mut value = raw.trim();

        // A literal `none` models an absent setting, not a missing key
        if value.eq_ignore_ascii_case("none") {
            value = "";
        }

        let lower = value.to_lowercase();

        // Boolean spellings, including the 0/1 literals. Checked before the
        // numeric rule so that `1` compares equal to `ON`.
        match lower.as_str() {
            "on" | "1" => return CanonicalValue::Bool(true),
            "off" | "0" => return CanonicalValue::Bool(false),
            _ => {}
        }

        // Numbers with an optional K/G suffix scale to plain integers
        if let Some(caps) = self.numeric.captures(value) {
            if let Ok(number) = caps[1].parse::<i64>() {
                let scaled = match caps.get(2).map(|m| m.as_str()) {
                    Some("k") | Some("K") => number.checked_mul(KIB),
                    Some("g") | Some("G") => number.checked_mul(GIB),
                    _ => Some(number),
                };
                // Overflowing values fall through to the string rule
                if let Some(number) = scaled {
                    return CanonicalValue::Int(number);
                }
            }
        }

        // sql_mode is an order-insensitive flag list
        if key.eq_ignore_ascii_case("sql_mode") {
            let mut modes: Vec<String> = value
                .split(',')
                .map(|mode| mode.trim().to_lowercase())
                .collect();
            modes.sort();
            return CanonicalValue::Text(modes.join(","));
        }

        CanonicalValue::Text(lower)
    }
}
