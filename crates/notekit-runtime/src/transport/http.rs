use super::{
    ApiRequest, Method, RequestOptions, SESSION_EXPIRED, SIGN_IN_PROMPT, Transport,
    TransportError, TransportResult, UploadRequest,
};
use crate::config::Config;
use crate::notify::{NoticeKind, Notifier};
use crate::session::Session;
use crate::{Error, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use notekit_types::ApiResponse;
use notekit_types::api::GENERIC_FAILURE;
use reqwest::{Client, StatusCode, multipart};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// reqwest-backed transport. Owns the token header, the sign-in gate and the
/// 401 handling so callers only see `ApiResponse` or `TransportError`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session: Session,
    notifier: Arc<dyn Notifier>,
    unauthorized_redirect_delay: Duration,
}

impl HttpTransport {
    pub fn new(config: &Config, session: Session, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            notifier,
            unauthorized_redirect_delay: config.unauthorized_redirect_delay(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through; anything else is joined onto the base.
    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    fn authorize(
        &self,
        options: &RequestOptions,
    ) -> std::result::Result<Option<String>, TransportError> {
        if !options.requires_auth {
            return Ok(None);
        }

        match self.session.token() {
            Some(token) => Ok(Some(token)),
            None => {
                tracing::debug!("authenticated request without a session");
                if options.toast {
                    self.notifier.show(SIGN_IN_PROMPT, NoticeKind::Neutral);
                }
                self.session
                    .redirect_to_sign_in(self.unauthorized_redirect_delay);
                Err(TransportError::SignInRequired)
            }
        }
    }

    fn fail(&self, err: TransportError, options: &RequestOptions) -> TransportError {
        tracing::warn!(error = %err, "request failed");
        if options.toast {
            self.notifier.show(&err.user_message(), NoticeKind::Neutral);
        }
        err
    }

    async fn execute(&self, request: ApiRequest) -> TransportResult {
        let token = self.authorize(&request.options)?;
        let url = self.url_for(&request.endpoint);
        tracing::debug!(method = %request.method, url = %url, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url).query(&request.query_pairs()),
            Method::Post => self.client.post(&url).json(&request.payload),
            Method::Put => self.client.put(&url).json(&request.payload),
            Method::Delete => self.client.delete(&url).json(&request.payload),
        };
        if let Some(token) = token {
            builder = builder.header("token", token);
        }

        let spinner = Spinner::start(self.notifier.as_ref(), request.options.show_spinner, None);
        let outcome = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        }
        .await;
        drop(spinner);

        let (status, body) = outcome.map_err(|err| self.fail(err.into(), &request.options))?;
        self.interpret(status, read_body(&body), &request.options)
    }

    async fn execute_upload(&self, request: UploadRequest) -> TransportResult {
        let UploadRequest {
            endpoint,
            file_path,
            field,
            form,
            options,
        } = request;

        if file_path.as_os_str().is_empty() {
            return Err(TransportError::InvalidRequest("Missing file path".to_string()));
        }
        let token = self.authorize(&options)?;

        let bytes = tokio::fs::read(&file_path).await.map_err(|err| {
            self.fail(
                TransportError::InvalidRequest(format!(
                    "Cannot read {}: {}",
                    file_path.display(),
                    err
                )),
                &options,
            )
        })?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| field.clone());

        let mut multipart_form = multipart::Form::new();
        for (key, value) in form {
            multipart_form = multipart_form.text(key, value);
        }
        let part = multipart::Part::bytes(bytes).file_name(file_name);
        multipart_form = multipart_form.part(field, part);

        let url = self.url_for(&endpoint);
        tracing::debug!(url = %url, file = %file_path.display(), "uploading file");

        let mut builder = self.client.post(&url).multipart(multipart_form);
        if let Some(token) = token {
            builder = builder.bearer_auth(&token).header("token", token);
        }

        let spinner = Spinner::start(
            self.notifier.as_ref(),
            options.show_spinner,
            Some("Uploading..."),
        );
        let outcome = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        }
        .await;
        drop(spinner);

        let (status, body) = outcome.map_err(|err| self.fail(err.into(), &options))?;
        self.interpret(status, read_body(&body), &options)
    }

    fn interpret(
        &self,
        status: StatusCode,
        body: Value,
        options: &RequestOptions,
    ) -> TransportResult {
        if status.is_success() {
            let response = ApiResponse::from_body(body);
            if let ApiResponse::Failure { message, .. } = &response {
                tracing::warn!(
                    status = status.as_u16(),
                    message = %message,
                    "server reported failure"
                );
                if options.toast {
                    self.notifier.show(message, NoticeKind::Neutral);
                }
            }
            return Ok(response);
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("session rejected by server, clearing credentials");
            if let Err(err) = self.session.clear() {
                tracing::warn!(error = %err, "failed to clear credentials");
            }
            let message = message.unwrap_or_else(|| SESSION_EXPIRED.to_string());
            if options.toast {
                self.notifier.show(&message, NoticeKind::Neutral);
            }
            self.session
                .redirect_to_sign_in(self.unauthorized_redirect_delay);
            return Err(TransportError::Unauthorized { message });
        }

        Err(self.fail(
            TransportError::Status {
                code: status.as_u16(),
                message: message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            },
            options,
        ))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, TransportResult> {
        self.execute(request).boxed()
    }

    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, TransportResult> {
        self.execute_upload(request).boxed()
    }
}

/// Ends the loading indicator when the call finishes or is dropped.
struct Spinner<'a> {
    notifier: &'a dyn Notifier,
    active: bool,
}

impl<'a> Spinner<'a> {
    fn start(notifier: &'a dyn Notifier, active: bool, label: Option<&str>) -> Self {
        if active {
            notifier.loading(label);
        }
        Self { notifier, active }
    }
}

impl Drop for Spinner<'_> {
    fn drop(&mut self) {
        if self.active {
            self.notifier.loaded();
        }
    }
}

/// JSON when it parses, the raw text otherwise, `null` for an empty body.
fn read_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
