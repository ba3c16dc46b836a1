//! # Data Handler
//!
//! Per-operation orchestration: validate, call storage, shape the result.
//! Validation always runs first, so a rejected request never reaches storage.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::store::{Record, SelectQuery, StorageClient};
use crate::validation::{validate_identifier, validate_payload, validate_query};

use super::errors::{ApiError, ApiResult, StorageAction};
use super::response::{CreateResponse, DeleteResponse, ListResponse};

/// Table used when none is configured
pub const DEFAULT_TABLE: &str = "user_data";

/// Handles the data endpoints against one table
#[derive(Clone)]
pub struct DataHandler {
    storage: Arc<dyn StorageClient>,
    table: String,
}

impl DataHandler {
    pub fn new(storage: Arc<dyn StorageClient>, table: impl Into<String>) -> Self {
        Self {
            storage,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Store a new record
    pub async fn create(&self, body: Value) -> ApiResult<CreateResponse> {
        let payload = validate_payload(body).map_err(|e| ApiError::InvalidPayload(Some(e)))?;

        let record = self
            .storage
            .insert(&self.table, payload.into_inner())
            .await
            .map_err(|e| ApiError::storage(StorageAction::Save, e))?;

        tracing::info!(id = %record.id, table = %self.table, "record created");
        Ok(CreateResponse::new(record.id))
    }

    /// List records, newest first
    pub async fn list(&self, raw: &HashMap<String, String>) -> ApiResult<ListResponse<Record>> {
        let query = validate_query(raw).map_err(|e| ApiError::InvalidQuery(Some(e)))?;

        let mut select = SelectQuery::newest(query.limit).with_offset(query.offset);
        if let Some(filter) = &query.filter {
            select = select.with_contains(filter.as_containment());
        }

        let (rows, total) = self
            .storage
            .select(&self.table, &select)
            .await
            .map_err(|e| ApiError::storage(StorageAction::Fetch, e))?;

        Ok(ListResponse::new(rows, total, query.limit, query.offset))
    }

    /// Fetch one record
    pub async fn get(&self, raw_id: &str) -> ApiResult<Record> {
        let id = validate_identifier(raw_id).map_err(ApiError::InvalidId)?;

        self.storage
            .select_one(&self.table, id)
            .await
            .map_err(|e| ApiError::storage(StorageAction::Fetch, e))?
            .ok_or(ApiError::NotFound)
    }

    /// Delete one record; absent records still acknowledge
    pub async fn delete(&self, raw_id: &str) -> ApiResult<DeleteResponse> {
        let id = validate_identifier(raw_id).map_err(ApiError::InvalidId)?;

        self.storage
            .delete(&self.table, id)
            .await
            .map_err(|e| ApiError::storage(StorageAction::Delete, e))?;

        tracing::info!(id = %id, table = %self.table, "record deleted");
        Ok(DeleteResponse::success())
    }
}
