use chrono::Utc;
use lambda_contract::{ApiGatewayResponse, InvocationContext};
use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::Value;

use crate::config::FunctionConfig;
use crate::handlers::FunctionName;
use crate::logging::init_logging;

pub fn context_from_lambda(context: &Context) -> InvocationContext {
    let env_config = &context.env_config;
    InvocationContext {
        request_id: non_empty(&context.request_id),
        function_name: non_empty(&env_config.function_name),
        function_version: non_empty(&env_config.version),
        invoked_function_arn: non_empty(&context.invoked_function_arn),
        memory_limit_mb: (env_config.memory > 0).then_some(env_config.memory),
        deadline_ms: (context.deadline > 0).then_some(context.deadline),
        xray_trace_id: context.xray_trace_id.clone(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Runs `function` inside the Lambda runtime loop until the process exits.
pub async fn run_function(function: FunctionName) -> Result<(), Error> {
    let config = FunctionConfig::from_env(function.binary_name())?;
    init_logging(&config)?;
    tracing::info!(
        function = %function,
        configured_name = %config.function_name,
        "starting lambda runtime"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_event(function, event)
    }))
    .await
}

async fn handle_event(
    function: FunctionName,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    let invocation_context = context_from_lambda(&context);

    if let Some(remaining_ms) = invocation_context.remaining_time_ms(now_ms()) {
        tracing::debug!(remaining_ms, "invocation deadline");
    }

    Ok(function.invoke(payload, &invocation_context))
}

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lambda_runtime::Config;
    use serde_json::json;

    use super::*;

    fn lambda_context() -> Context {
        let mut env_config = Config::default();
        env_config.function_name = "my-second-lambda-prod".to_string();
        env_config.version = "$LATEST".to_string();
        env_config.memory = 128;

        let mut context = Context::default();
        context.request_id = "req-42".to_string();
        context.deadline = 1_700_000_000_000;
        context.invoked_function_arn =
            "arn:aws:lambda:eu-west-1:123456789012:function:my-second-lambda-prod".to_string();
        context.env_config = Arc::new(env_config);
        context
    }

    #[test]
    fn converts_runtime_context() {
        let converted = context_from_lambda(&lambda_context());

        assert_eq!(converted.request_id.as_deref(), Some("req-42"));
        assert_eq!(converted.function_name.as_deref(), Some("my-second-lambda-prod"));
        assert_eq!(converted.function_version.as_deref(), Some("$LATEST"));
        assert_eq!(converted.memory_limit_mb, Some(128));
        assert_eq!(converted.deadline_ms, Some(1_700_000_000_000));
        assert_eq!(converted.xray_trace_id, None);
    }

    #[test]
    fn default_runtime_context_is_empty() {
        assert_eq!(
            context_from_lambda(&Context::default()),
            InvocationContext::default()
        );
    }

    #[tokio::test]
    async fn handles_runtime_event() {
        let event = LambdaEvent::new(json!({}), lambda_context());

        let response = handle_event(FunctionName::MySecondLambda, event)
            .await
            .expect("handler should not fail");

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "Hello from 2nd Lambda!");
    }
}
