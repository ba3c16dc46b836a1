//! # REST API Routes
//!
//! Axum routes for the data endpoints.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::handler::DataHandler;
use super::response::{CreateResponse, DeleteResponse, ListResponse};
use crate::store::Record;
use crate::validation::ValidationError;

/// Build the data router: `/data` and `/data/:id`
pub fn data_routes(handler: DataHandler) -> Router {
    Router::new()
        .route(
            "/data",
            get(list_handler)
                .post(create_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/data/:id",
            get(get_handler)
                .delete(delete_handler)
                .fallback(method_not_allowed),
        )
        .with_state(handler)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Create record handler
///
/// The body is decoded here rather than through `Json` so that a missing
/// content type or unparsable body yields the same 400 envelope as an empty
/// object.
async fn create_handler(
    State(handler): State<DataHandler>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreateResponse>)> {
    let value: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidPayload(None))?;

    let result = handler.create(value).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// List records handler
async fn list_handler(
    State(handler): State<DataHandler>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ListResponse<Record>>> {
    let Query(raw) = query.map_err(|_| ApiError::InvalidQuery(None))?;

    let result = handler.list(&raw).await?;
    Ok(Json(result))
}

/// Id segment, or an invalid-id error when it cannot be decoded
fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::InvalidId(ValidationError::InvalidIdentifier(e.body_text())))
}

/// Get single record handler
async fn get_handler(
    State(handler): State<DataHandler>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Record>> {
    let id = path_id(path)?;
    let result = handler.get(&id).await?;
    Ok(Json(result))
}

/// Delete record handler
async fn delete_handler(
    State(handler): State<DataHandler>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = path_id(path)?;
    let result = handler.delete(&id).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_router_builds() {
        let handler = DataHandler::new(Arc::new(InMemoryStorage::new()), "user_data");
        let _router = data_routes(handler);
    }
}
