use lambda_contract::{text_response, ApiGatewayResponse, InvocationContext};
use serde_json::Value;

use super::log_invocation;

pub const FUNCTION_NAME: &str = "my_second_lambda";
pub const RESPONSE_BODY: &str = "Hello from 2nd Lambda!";

pub fn lambda_handler(event: Value, context: &InvocationContext) -> ApiGatewayResponse {
    log_invocation(FUNCTION_NAME, event, context);
    text_response(200, RESPONSE_BODY)
}
