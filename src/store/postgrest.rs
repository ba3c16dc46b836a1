//! # PostgREST Storage
//!
//! Talks to a hosted table through its PostgREST endpoint
//! (`{url}/rest/v1/{table}`), as exposed by Supabase.
//!
//! Rows are expected to have the columns `id` (uuid, generated),
//! `data` (jsonb) and `created_at` (timestamptz, generated).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::errors::{StorageError, StorageResult};
use super::{Record, SelectQuery, StorageClient};

/// PostgREST-backed storage client
#[derive(Debug, Clone)]
pub struct PostgrestStorage {
    http: reqwest::Client,
    base_url: String,
}

impl PostgrestStorage {
    /// Build a client for the project at `url`, authenticating with `api_key`.
    pub fn new(url: &str, api_key: &str) -> StorageResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key))?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", url.trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    async fn send(request: RequestBuilder) -> StorageResult<Response> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StorageError::Backend {
            status: status.as_u16(),
            body,
        })
    }
}

fn header_value(value: &str) -> StorageResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| StorageError::Unavailable("API key is not a valid header value".to_string()))
}

/// Query pairs for a page of rows
fn select_params(query: &SelectQuery) -> StorageResult<Vec<(&'static str, String)>> {
    let order = if query.newest_first {
        "created_at.desc"
    } else {
        "created_at.asc"
    };

    let mut params = vec![
        ("select", "*".to_string()),
        ("order", order.to_string()),
        ("offset", query.offset.to_string()),
        ("limit", query.limit.to_string()),
    ];
    if let Some(needle) = &query.contains {
        params.push(("data", format!("cs.{}", serde_json::to_string(needle)?)));
    }
    Ok(params)
}

/// Total row count from a `Content-Range` header (`0-9/42`, `*/42`)
fn parse_content_range(header: &str) -> Option<usize> {
    let (_, total) = header.rsplit_once('/')?;
    total.trim().parse().ok()
}

fn total_from(headers: &HeaderMap) -> StorageResult<usize> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range)
        .ok_or_else(|| StorageError::Decode("missing or unreadable Content-Range".to_string()))
}

#[async_trait]
impl StorageClient for PostgrestStorage {
    async fn insert(&self, table: &str, data: Map<String, Value>) -> StorageResult<Record> {
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&json!([{ "data": data }]));

        let rows: Vec<Record> = Self::send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::Decode("insert returned no rows".to_string()))
    }

    async fn select(&self, table: &str, query: &SelectQuery) -> StorageResult<(Vec<Record>, usize)> {
        let resp = self
            .http
            .get(self.table_url(table))
            .header("Prefer", "count=exact")
            .query(&select_params(query)?)
            .send()
            .await?;

        // A window starting past the last row is answered with 416 and `*/N`.
        if resp.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            let total = total_from(resp.headers())?;
            return Ok((Vec::new(), total));
        }

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let total = total_from(resp.headers())?;
        let rows: Vec<Record> = resp.json().await?;
        Ok((rows, total))
    }

    async fn select_one(&self, table: &str, id: Uuid) -> StorageResult<Option<Record>> {
        let request = self.http.get(self.table_url(table)).query(&[
            ("select", "*".to_string()),
            ("id", format!("eq.{}", id)),
            ("limit", "1".to_string()),
        ]);

        let rows: Vec<Record> = Self::send(request).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, table: &str, id: Uuid) -> StorageResult<()> {
        let request = self
            .http
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{}", id))]);

        Self::send(request).await?;
        Ok(())
    }
}
