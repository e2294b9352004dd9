use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Message used when a failed response carries no explanation.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Body envelope shared by every endpoint: `{status, data, message, errors}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub status: Option<bool>,
    pub data: Option<Value>,
    pub message: Option<String>,
    pub errors: Option<Vec<Value>>,
}

impl Envelope {
    /// First usable explanation: `message`, then `errors[0]`.
    pub fn failure_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|m| !m.is_empty()) {
            return Some(message.clone());
        }
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|first| match first {
                Value::String(s) => s.clone(),
                other => other
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            })
    }
}

/// Outcome of a call that reached the server and got a 2xx answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApiResponse<T> {
    Success { data: T, message: Option<String> },
    Failure { message: String, code: Option<u16> },
}

impl ApiResponse<Value> {
    /// Interpret a raw body. Only an explicit `status: false` is a failure.
    /// When the envelope has no `data`, the whole body is used as data so
    /// endpoints that answer with bare fields stay readable.
    pub fn from_body(body: Value) -> Self {
        let envelope = match &body {
            Value::Object(_) => {
                serde_json::from_value::<Envelope>(body.clone()).unwrap_or_default()
            }
            _ => Envelope::default(),
        };

        if envelope.status == Some(false) {
            return Self::Failure {
                message: envelope
                    .failure_message()
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                code: None,
            };
        }

        let message = envelope.message.clone();
        let data = match envelope.data {
            Some(data) => data,
            None => body,
        };
        Self::Success { data, message }
    }

    /// Decode the success payload into a model.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        match self {
            Self::Success { data, message } => Ok(ApiResponse::Success {
                data: serde_json::from_value(data)?,
                message,
            }),
            Self::Failure { message, code } => Ok(ApiResponse::Failure { message, code }),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure { message, .. } => Some(message),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success { data, message } => ApiResponse::Success {
                data: f(data),
                message,
            },
            Self::Failure { message, code } => ApiResponse::Failure { message, code },
        }
    }

    /// Success data, or the failure message.
    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { message, .. } => Err(message),
        }
    }
}
