use super::fragment::SqlFragment;
use crate::constants::defaults;

/// Represents pagination parameters for SQL queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: defaults::LIMIT,
            offset: defaults::OFFSET,
        }
    }
}

impl Pagination {
    /// Create pagination, falling back to the defaults for missing parts
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(defaults::LIMIT),
            offset: offset.unwrap_or(defaults::OFFSET),
        }
    }

    /// `LIMIT offset,limit`. Both numbers are parsed integers, so they are
    /// written into the text rather than bound.
    pub fn to_fragment(&self) -> SqlFragment {
        SqlFragment::raw(format!("LIMIT {},{}", self.offset, self.limit))
    }
}

/// Parse a pagination number the way a browser's `parseInt` reads it:
/// surrounding whitespace is ignored and leading digits are taken, so
/// `"20"`, `" 20 "` and `"20abc"` all yield 20. Anything without leading
/// digits, including negative numbers, yields `None`.
pub fn parse_leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
