//! Observability for datagate
//!
//! Structured logging through `tracing`. Request spans come from
//! `tower-http`'s trace layer; handlers add events for creates, deletes and
//! storage failures.

mod logging;

pub use logging::{env_filter, init_logging};
