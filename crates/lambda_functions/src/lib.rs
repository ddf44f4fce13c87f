//! Lambda functions deployed from this workspace.
//!
//! Handlers are plain functions over a JSON event and an
//! [`InvocationContext`](lambda_contract::InvocationContext) so they can be
//! exercised without the Lambda runtime. The `runtime` module adapts them to
//! `lambda_runtime`, and each binary under `src/bin` is one deployable
//! function.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
