//! Response classification.
//!
//! The API reports failures in the body, not the status line: any object
//! carrying a truthy `error` or `error_code` field is a failure. The body is
//! classified once into an [`ApiOutcome`] right after the transport returns.

use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// A response body decided as success or failure
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Success(Value),
    Failure { code: String, message: String },
}

impl ApiOutcome {
    pub fn classify(body: Value) -> Self {
        let code = body
            .get("error")
            .filter(|v| is_truthy(v))
            .or_else(|| body.get("error_code").filter(|v| is_truthy(v)))
            .map(text);

        match code {
            Some(code) => {
                let message = body
                    .get("message")
                    .filter(|v| is_truthy(v))
                    .or_else(|| body.get("error_description").filter(|v| is_truthy(v)))
                    .map(text)
                    .unwrap_or_default();
                ApiOutcome::Failure { code, message }
            }
            None => ApiOutcome::Success(body),
        }
    }

    pub fn into_result(self) -> Result<Value> {
        match self {
            ApiOutcome::Success(body) => Ok(body),
            ApiOutcome::Failure { code, message } => Err(Error::Api { code, message }),
        }
    }
}

/// Return the body unchanged, or the API error it carries
pub fn check(body: Value) -> Result<Value> {
    let outcome = ApiOutcome::classify(body);
    if let ApiOutcome::Failure { code, message } = &outcome {
        warn!(%code, %message, "Sendpulse API returned an error");
    }
    outcome.into_result()
}

/// Wire-format truthiness: `null`, `false`, `0` and `""` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings render raw, everything else as JSON text
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
