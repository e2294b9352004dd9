use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Attach the session token; reject locally when none is stored.
    pub requires_auth: bool,
    /// Drive the notifier's loading hooks around the call.
    pub show_spinner: bool,
    /// Report failures through the notifier.
    pub toast: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            requires_auth: true,
            show_spinner: true,
            toast: true,
        }
    }
}

impl RequestOptions {
    pub fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    pub fn with_spinner(mut self, show_spinner: bool) -> Self {
        self.show_spinner = show_spinner;
        self
    }

    pub fn with_toast(mut self, toast: bool) -> Self {
        self.toast = toast;
        self
    }
}

/// A JSON call against the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub payload: Value,
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            payload: Value::Object(Map::new()),
            options: RequestOptions::default(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Endpoint that does not need a session.
    pub fn public(mut self) -> Self {
        self.options.requires_auth = false;
        self
    }

    /// No spinner and no failure toast; the caller reports on its own.
    pub fn quiet(mut self) -> Self {
        self.options.show_spinner = false;
        self.options.toast = false;
        self
    }

    /// Payload flattened to query pairs. Nulls are skipped and non-string
    /// scalars use their JSON text.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match &self.payload {
            Value::Object(map) => map
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| {
                    let text = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), text)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Multipart upload of one local file plus text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub endpoint: String,
    pub file_path: PathBuf,
    pub field: String,
    pub form: BTreeMap<String, String>,
    pub options: RequestOptions,
}

impl UploadRequest {
    pub fn new(
        endpoint: impl Into<String>,
        file_path: impl Into<PathBuf>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            file_path: file_path.into(),
            field: field.into(),
            form: BTreeMap::new(),
            options: RequestOptions::default(),
        }
    }

    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(key.into(), value.into());
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}
