mod error;
mod http;
mod request;

pub use error::{NETWORK_FAILURE, SESSION_EXPIRED, SIGN_IN_PROMPT, TIMED_OUT, TransportError};
pub use http::HttpTransport;
pub use request::{ApiRequest, Method, RequestOptions, UploadRequest};

use futures::future::BoxFuture;
use notekit_types::ApiResponse;
use serde_json::Value;

pub type TransportResult = Result<ApiResponse<Value>, TransportError>;

/// Request/response channel to the API.
///
/// A 2xx answer is `Ok`, with `ApiResponse::Failure` when the body carries
/// `status: false`. Anything else is a `TransportError`.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, TransportResult>;

    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, TransportResult>;
}
