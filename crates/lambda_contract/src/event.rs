use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedEvent {
    /// `null` or an empty mapping.
    Empty,
    /// API Gateway proxy event; `body` is the decoded request body.
    ApiGateway { body: Value },
    /// Any other direct invocation payload.
    Direct(Value),
}

impl NormalizedEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::ApiGateway { .. } => "api_gateway",
            Self::Direct(_) => "direct",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("request body must be a JSON object or string, got {0}")]
    UnsupportedBody(&'static str),
}

pub fn normalize_event(event: Value) -> Result<NormalizedEvent, EventError> {
    let object = match event {
        Value::Null => return Ok(NormalizedEvent::Empty),
        Value::Object(object) => object,
        other => return Ok(NormalizedEvent::Direct(other)),
    };

    if object.is_empty() {
        return Ok(NormalizedEvent::Empty);
    }

    if !object.contains_key("body") {
        return Ok(NormalizedEvent::Direct(Value::Object(object)));
    }

    let raw_body = &object["body"];
    let body = match raw_body {
        Value::Null => json!({}),
        Value::Object(_) => raw_body.clone(),
        // Non-JSON text bodies are passed through untouched.
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| raw_body.clone()),
        other => return Err(EventError::UnsupportedBody(json_type_name(other))),
    };

    Ok(NormalizedEvent::ApiGateway { body })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_and_null_are_empty() {
        assert_eq!(normalize_event(json!({})), Ok(NormalizedEvent::Empty));
        assert_eq!(normalize_event(Value::Null), Ok(NormalizedEvent::Empty));
    }

    #[test]
    fn decodes_string_body_from_gateway_event() {
        let event = json!({"httpMethod": "GET", "body": "{\"name\":\"lambda\"}"});

        let normalized = normalize_event(event).expect("event should normalize");
        assert_eq!(
            normalized,
            NormalizedEvent::ApiGateway {
                body: json!({"name": "lambda"})
            }
        );
    }

    #[test]
    fn keeps_plain_text_body() {
        let normalized =
            normalize_event(json!({"body": "not json"})).expect("event should normalize");
        assert_eq!(
            normalized,
            NormalizedEvent::ApiGateway {
                body: Value::from("not json")
            }
        );
    }

    #[test]
    fn null_body_becomes_empty_object() {
        let normalized = normalize_event(json!({"body": null})).expect("event should normalize");
        assert_eq!(normalized, NormalizedEvent::ApiGateway { body: json!({}) });
    }

    #[test]
    fn rejects_array_body() {
        let error = normalize_event(json!({"body": [1, 2]})).expect_err("array body should fail");
        assert_eq!(error, EventError::UnsupportedBody("array"));
        assert!(error.to_string().contains("got array"));
    }

    #[test]
    fn non_gateway_payloads_are_direct() {
        let normalized = normalize_event(json!({"source": "aws.events"}))
            .expect("event should normalize");
        assert_eq!(normalized.kind(), "direct");
        assert_eq!(
            normalize_event(json!([1])).expect("array event should normalize"),
            NormalizedEvent::Direct(json!([1]))
        );
    }
}
