//! Shared handler contract primitives.
//!
//! This crate owns the response shape returned by every function, the
//! invocation context model and event classification. It intentionally
//! excludes the Lambda runtime and logging concerns, which live in
//! `lambda_functions`.

pub mod context;
pub mod event;
pub mod response;

pub use context::InvocationContext;
pub use event::{normalize_event, EventError, NormalizedEvent};
pub use response::{json_response, text_response, ApiGatewayResponse};
