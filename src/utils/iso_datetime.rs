//! # ISO-8601 Datetime Coercion
//!
//! Values crossing into the store are compared in the canonical
//! `YYYY-MM-DD HH:MM:SS` form. The only convertible input is an ISO-8601
//! timestamp with fractional seconds and a literal `Z`, which is what the
//! Fillout API and JavaScript clients emit. Anything else passes through
//! untouched, so canonicalization is idempotent.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::OnceLock;

static ISO_DATE_MATCHER: OnceLock<Regex> = OnceLock::new();

fn iso_date_matcher() -> &'static Regex {
    ISO_DATE_MATCHER.get_or_init(|| {
        Regex::new(
            r"^(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})T(?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2})\.[0-9]+Z$",
        )
        .expect("ISO date pattern is a valid regex")
    })
}

/// True when `value` is `YYYY-MM-DDTHH:MM:SS.fffZ` (one or more fraction digits).
pub fn is_date_like(value: &str) -> bool {
    iso_date_matcher().is_match(value)
}

/// Canonicalize a date-like string to `YYYY-MM-DD HH:MM:SS`.
///
/// Non-matching input, including strings already in canonical form, is
/// returned unchanged.
pub fn canonicalize(value: &str) -> String {
    match iso_date_matcher().captures(value) {
        Some(captures) => format!("{} {}", &captures["date"], &captures["time"]),
        None => value.to_string(),
    }
}

/// Canonicalize a native timestamp by way of its ISO-8601 representation.
pub fn canonicalize_datetime(value: &DateTime<Utc>) -> String {
    canonicalize(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
