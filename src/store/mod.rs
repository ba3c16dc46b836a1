//! # Record Storage
//!
//! The storage client is an injected collaborator. Handlers only see the
//! [`StorageClient`] trait; two backends ship with the crate:
//!
//! - [`InMemoryStorage`]: process-local tables, used for local runs and tests
//! - [`PostgrestStorage`]: a hosted table reached over PostgREST

mod errors;
pub mod memory;
pub mod postgrest;

pub use errors::{StorageError, StorageResult};
pub use memory::InMemoryStorage;
pub use postgrest::PostgrestStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored payload with its system-assigned identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Row selection: containment filter, creation-time order, and window
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// Object the payload must contain (JSONB `@>` semantics)
    pub contains: Option<Value>,
    /// Order by `created_at` descending when true
    pub newest_first: bool,
    pub offset: usize,
    pub limit: usize,
}

impl SelectQuery {
    /// First `limit` rows, newest first
    pub fn newest(limit: usize) -> Self {
        Self {
            contains: None,
            newest_first: true,
            offset: 0,
            limit,
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_contains(mut self, needle: Value) -> Self {
        self.contains = Some(needle);
        self
    }
}

/// Row-level CRUD over named tables
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Insert a payload and return the stored row
    async fn insert(&self, table: &str, data: Map<String, Value>) -> StorageResult<Record>;

    /// Return one page of matching rows and the total match count
    async fn select(&self, table: &str, query: &SelectQuery) -> StorageResult<(Vec<Record>, usize)>;

    /// Fetch a single row by id
    async fn select_one(&self, table: &str, id: Uuid) -> StorageResult<Option<Record>>;

    /// Delete a row by id. Deleting an absent row is not an error.
    async fn delete(&self, table: &str, id: Uuid) -> StorageResult<()>;
}

/// PostgreSQL JSONB containment (`haystack @> needle`)
///
/// Objects contain objects whose every key is contained; arrays contain
/// arrays whose every element is contained by some element; a top-level
/// array also contains a bare scalar it holds.
pub fn json_contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Object(h), n) => map_contains(h, n),
        (Value::Array(h), Value::Array(n)) => n
            .iter()
            .all(|nv| h.iter().any(|hv| json_contains_nested(hv, nv))),
        (Value::Array(h), scalar) if !scalar.is_object() && !scalar.is_array() => {
            h.iter().any(|hv| hv == scalar)
        }
        (h, n) => h == n,
    }
}

/// [`json_contains`] with an object haystack, borrowed in place
///
/// Only an object needle can match.
pub fn map_contains(haystack: &Map<String, Value>, needle: &Value) -> bool {
    match needle {
        Value::Object(n) => n
            .iter()
            .all(|(k, nv)| haystack.get(k).is_some_and(|hv| json_contains_nested(hv, nv))),
        _ => false,
    }
}

// Below the top level a scalar never matches an array.
fn json_contains_nested(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)) => {
            json_contains(haystack, needle)
        }
        (h, n) => h == n,
    }
}
