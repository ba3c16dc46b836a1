//! # In-Memory Storage
//!
//! Process-local tables behind a lock. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{StorageError, StorageResult};
use super::{map_contains, Record, SelectQuery, StorageClient};

/// In-memory storage backend
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// table -> rows in insertion order
    tables: RwLock<HashMap<String, Vec<Record>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held in `table`
    pub fn len(&self, table: &str) -> StorageResult<usize> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.get(table).map_or(0, Vec::len))
    }

    pub fn is_empty(&self, table: &str) -> StorageResult<bool> {
        Ok(self.len(table)? == 0)
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("Lock poisoned".to_string())
    }
}

#[async_trait]
impl StorageClient for InMemoryStorage {
    async fn insert(&self, table: &str, data: Map<String, Value>) -> StorageResult<Record> {
        let record = Record {
            id: Uuid::new_v4(),
            data,
            created_at: Utc::now(),
        };

        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());

        Ok(record)
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> StorageResult<(Vec<Record>, usize)> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        let rows = match tables.get(table) {
            Some(rows) => rows,
            None => return Ok((Vec::new(), 0)),
        };

        // Newest insert wins ties on created_at.
        let mut matching: Vec<&Record> = rows
            .iter()
            .rev()
            .filter(|r| match &query.contains {
                Some(needle) => map_contains(&r.data, needle),
                None => true,
            })
            .collect();

        if query.newest_first {
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        } else {
            matching.reverse();
            matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }

        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn select_one(&self, table: &str, id: Uuid) -> StorageResult<Option<Record>> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| r.id == id))
            .cloned())
    }

    async fn delete(&self, table: &str, id: Uuid) -> StorageResult<()> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| r.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    const TABLE: &str = "user_data";

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_select_one() {
        let storage = InMemoryStorage::new();
        let record = storage
            .insert(TABLE, payload(json!({"title": "Test"})))
            .await
            .unwrap();

        let fetched = storage.select_one(TABLE, record.id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
        assert_eq!(fetched.data["title"], "Test");
    }

    #[tokio::test]
    async fn test_select_one_missing() {
        let storage = InMemoryStorage::new();
        assert!(storage.select_one(TABLE, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_select_newest_first_with_window() {
        let storage = InMemoryStorage::new();
        for i in 0..5 {
            storage.insert(TABLE, payload(json!({"n": i}))).await.unwrap();
        }

        let (rows, total) = storage
            .select(TABLE, &SelectQuery::newest(2).with_offset(1))
            .await
            .unwrap();

        assert_eq!(total, 5);
        let ns: Vec<_> = rows.iter().map(|r| r.data["n"].clone()).collect();
        assert_eq!(ns, vec![json!(3), json!(2)]);
    }

    #[tokio::test]
    async fn test_select_oldest_first() {
        let storage = InMemoryStorage::new();
        for i in 0..3 {
            storage.insert(TABLE, payload(json!({"n": i}))).await.unwrap();
        }

        let query = SelectQuery {
            newest_first: false,
            ..SelectQuery::newest(10)
        };
        let (rows, _) = storage.select(TABLE, &query).await.unwrap();
        let ns: Vec<_> = rows.iter().map(|r| r.data["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_select_with_containment() {
        let storage = InMemoryStorage::new();
        storage.insert(TABLE, payload(json!({"city": "Oslo"}))).await.unwrap();
        storage.insert(TABLE, payload(json!({"city": "Lima"}))).await.unwrap();
        storage.insert(TABLE, payload(json!({"city": "Oslo", "x": 1}))).await.unwrap();

        let query = SelectQuery::newest(1).with_contains(json!({"city": "Oslo"}));
        let (rows, total) = storage.select(TABLE, &query).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].data["city"], "Oslo");
    }

    #[tokio::test]
    async fn test_offset_past_end() {
        let storage = InMemoryStorage::new();
        storage.insert(TABLE, payload(json!({"a": 1}))).await.unwrap();

        let (rows, total) = storage
            .select(TABLE, &SelectQuery::newest(10).with_offset(5))
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_tables_are_isolated() {
        let storage = InMemoryStorage::new();
        storage.insert("a", payload(json!({"k": 1}))).await.unwrap();

        assert_eq!(storage.len("a").unwrap(), 1);
        assert!(storage.is_empty("b").unwrap());
        let (rows, total) = storage.select("b", &SelectQuery::newest(10)).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let storage = InMemoryStorage::new();
        let record = storage.insert(TABLE, payload(json!({"a": 1}))).await.unwrap();

        storage.delete(TABLE, record.id).await.unwrap();
        assert!(storage.select_one(TABLE, record.id).await.unwrap().is_none());

        storage.delete(TABLE, record.id).await.unwrap();
        storage.delete("missing_table", Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_reported() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.insert(TABLE, payload(json!({"a": 1}))).await.unwrap();

        let poisoner = Arc::clone(&storage);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.tables.write().unwrap();
            panic!("poison the table lock");
        })
        .join();

        assert!(matches!(storage.len(TABLE), Err(StorageError::Unavailable(_))));
        assert!(matches!(storage.is_empty(TABLE), Err(StorageError::Unavailable(_))));
        assert!(storage.select(TABLE, &SelectQuery::newest(10)).await.is_err());
    }
}
