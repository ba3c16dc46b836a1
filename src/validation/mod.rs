//! # Request Validation
//!
//! Pure checks run on every request before storage is touched:
//! - payloads must be non-empty JSON objects
//! - list queries are normalized into a [`ListQuery`]
//! - identifiers must be canonical hyphenated UUIDs

mod errors;
mod query;

pub use errors::{ValidationError, ValidationResult};
pub use query::{validate_query, ListQuery, QueryFilter, DEFAULT_LIMIT, DEFAULT_OFFSET};

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

static UUID_GRAMMAR: OnceLock<Regex> = OnceLock::new();

fn uuid_grammar() -> &'static Regex {
    UUID_GRAMMAR.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        )
        .expect("UUID pattern is a valid regex")
    })
}

/// A payload known to be a non-empty JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload(Map<String, Value>);

impl ValidatedPayload {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Accept only JSON objects with at least one key
pub fn validate_payload(input: Value) -> ValidationResult<ValidatedPayload> {
    match input {
        Value::Object(map) if !map.is_empty() => Ok(ValidatedPayload(map)),
        _ => Err(ValidationError::MalformedPayload),
    }
}

/// Accept only the canonical 8-4-4-4-12 hex form
pub fn validate_identifier(raw: &str) -> ValidationResult<Uuid> {
    if !uuid_grammar().is_match(raw) {
        return Err(ValidationError::InvalidIdentifier(raw.to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidIdentifier(raw.to_string()))
}
