//! # REST API Module
//!
//! The `/data` endpoints: create, list, get by id, delete by id.
//! Requests are validated before any storage call and every failure is
//! returned as a `{success: false, error}` envelope.

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse, StorageAction};
pub use handler::{DataHandler, DEFAULT_TABLE};
pub use response::{CreateResponse, DeleteResponse, ListResponse};
pub use server::data_routes;
