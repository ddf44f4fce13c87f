use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const CONTENT_TYPE_TEXT: &str = "text/plain";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Response shape understood by API Gateway proxy integrations.
///
/// `status_code` is serialized as `statusCode`, which is the key callers
/// (and the gateway) look up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default = "empty_headers")]
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type").and_then(Value::as_str)
    }

    /// Parses the body as JSON. Plain-text bodies come back as a JSON string.
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

fn empty_headers() -> Value {
    json!({})
}

pub fn text_response(status_code: u16, body: impl Into<String>) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": CONTENT_TYPE_TEXT}),
        body: body.into(),
    }
}

pub fn json_response(
    status_code: u16,
    payload: &impl Serialize,
) -> Result<ApiGatewayResponse, serde_json::Error> {
    Ok(ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": CONTENT_TYPE_JSON}),
        body: serde_json::to_string(payload)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_status_code_with_gateway_key() {
        let response = text_response(200, "ok");
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(value["statusCode"], Value::from(200));
        assert_eq!(value["body"], Value::from("ok"));
        assert!(value.get("status_code").is_none());
    }

    #[test]
    fn json_response_sets_content_type_and_body() {
        let response =
            json_response(201, &json!({"message": "created"})).expect("payload should serialize");

        assert_eq!(response.status_code, 201);
        assert_eq!(response.content_type(), Some(CONTENT_TYPE_JSON));
        assert_eq!(response.body_json()["message"], Value::from("created"));
    }

    #[test]
    fn body_json_falls_back_to_text() {
        let response = text_response(200, "Hello");
        assert_eq!(response.body_json(), Value::from("Hello"));
    }

    #[test]
    fn deserializes_without_headers() {
        let response: ApiGatewayResponse =
            serde_json::from_str(r#"{"statusCode": 404, "body": "missing"}"#)
                .expect("response should parse");

        assert_eq!(response.status_code, 404);
        assert!(!response.is_success());
        assert_eq!(response.headers, json!({}));
    }
}
