use serde::{Deserialize, Serialize};

/// Invocation metadata handed to a handler alongside the event.
///
/// Every field is optional so tests and local invocations can pass
/// `InvocationContext::default()` as an empty context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InvocationContext {
    pub request_id: Option<String>,
    pub function_name: Option<String>,
    pub function_version: Option<String>,
    pub invoked_function_arn: Option<String>,
    pub memory_limit_mb: Option<i32>,
    /// Wall-clock deadline in milliseconds since the unix epoch.
    pub deadline_ms: Option<u64>,
    pub xray_trace_id: Option<String>,
}

impl InvocationContext {
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    pub fn remaining_time_ms(&self, now_ms: u64) -> Option<u64> {
        self.deadline_ms.map(|deadline| deadline.saturating_sub(now_ms))
    }

    pub fn request_id_or_default(&self) -> &str {
        self.request_id.as_deref().unwrap_or("local")
    }
}
