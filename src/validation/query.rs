//! # List Query Validation
//!
//! Parses the `limit`, `offset` and `filter` query parameters of the list
//! endpoint.
//!
//! Integer parameters are read leniently: leading whitespace and an optional
//! sign are accepted, the leading run of digits is used, and anything after it
//! is ignored (`"25abc"` reads as 25). A value with no leading digits falls back
//! to the default. Only a value that parses but lies outside its domain is
//! rejected.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult};

/// Page size used when `limit` is absent or unreadable
pub const DEFAULT_LIMIT: usize = 10;

/// Window start used when `offset` is absent or unreadable
pub const DEFAULT_OFFSET: usize = 0;

/// Single key/value containment filter over a record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFilter {
    pub key: String,
    pub value: String,
}

impl QueryFilter {
    /// Parse `key,value`, splitting on the first comma.
    ///
    /// Returns `None` when there is no comma or either side is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, value) = raw.split_once(',')?;
        if key.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// The JSON object a matching payload must contain
    pub fn as_containment(&self) -> Value {
        let mut needle = Map::new();
        needle.insert(self.key.clone(), Value::String(self.value.clone()));
        Value::Object(needle)
    }
}

/// Validated list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: usize,
    pub filter: Option<QueryFilter>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            filter: None,
        }
    }
}

/// Validate raw list query parameters
pub fn validate_query(raw: &HashMap<String, String>) -> ValidationResult<ListQuery> {
    let limit = match raw.get("limit").and_then(|v| parse_leading_int(v)) {
        None => DEFAULT_LIMIT,
        Some(n) if n >= 1 => to_usize("limit", n)?,
        Some(n) => {
            return Err(ValidationError::InvalidQueryParam {
                name: "limit",
                value: n.to_string(),
            })
        }
    };

    let offset = match raw.get("offset").and_then(|v| parse_leading_int(v)) {
        None => DEFAULT_OFFSET,
        Some(n) if n >= 0 => to_usize("offset", n)?,
        Some(n) => {
            return Err(ValidationError::InvalidQueryParam {
                name: "offset",
                value: n.to_string(),
            })
        }
    };

    let filter = raw.get("filter").and_then(|f| QueryFilter::parse(f));

    Ok(ListQuery {
        limit,
        offset,
        filter,
    })
}

/// Read the leading decimal integer of `value`, if any
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Overflowing digit runs are treated as unreadable.
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn to_usize(name: &'static str, n: i64) -> ValidationResult<usize> {
    usize::try_from(n).map_err(|_| ValidationError::InvalidQueryParam {
        name,
        value: n.to_string(),
    })
}
