//! datagate - a validated REST facade over a hosted record table
//!
//! Four endpoints (create, list, get by id, delete by id) validate their
//! input and forward to an injected storage client.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod store;
pub mod validation;
