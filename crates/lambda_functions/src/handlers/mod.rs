pub mod my_lambda;
pub mod my_second_lambda;

use std::fmt;
use std::str::FromStr;

use lambda_contract::{normalize_event, ApiGatewayResponse, InvocationContext};
use serde_json::Value;
use thiserror::Error;

/// Every function deployed from this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    MyLambda,
    MySecondLambda,
}

impl FunctionName {
    pub const ALL: [FunctionName; 2] = [FunctionName::MyLambda, FunctionName::MySecondLambda];

    /// Cargo binary (and zip artifact) name for the function.
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::MyLambda => my_lambda::FUNCTION_NAME,
            Self::MySecondLambda => my_second_lambda::FUNCTION_NAME,
        }
    }

    pub fn invoke(self, event: Value, context: &InvocationContext) -> ApiGatewayResponse {
        match self {
            Self::MyLambda => my_lambda::lambda_handler(event, context),
            Self::MySecondLambda => my_second_lambda::lambda_handler(event, context),
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown function '{0}' (expected my_lambda or my_second_lambda)")]
pub struct UnknownFunction(pub String);

impl FromStr for FunctionName {
    type Err = UnknownFunction;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        FunctionName::ALL
            .into_iter()
            .find(|name| name.binary_name() == normalized)
            .ok_or_else(|| UnknownFunction(raw.to_string()))
    }
}

fn log_invocation(function_name: &str, event: Value, context: &InvocationContext) {
    let request_id = context.request_id_or_default();
    match normalize_event(event) {
        Ok(normalized) => tracing::info!(
            function = function_name,
            request_id,
            event_kind = normalized.kind(),
            "handling invocation"
        ),
        Err(error) => tracing::warn!(
            function = function_name,
            request_id,
            %error,
            "handling invocation with unrecognised event"
        ),
    }
}
