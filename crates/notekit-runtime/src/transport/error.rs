use std::fmt;

pub const SIGN_IN_PROMPT: &str = "Please sign in";
pub const SESSION_EXPIRED: &str = "Session expired, please sign in again";
pub const NETWORK_FAILURE: &str = "Network request failed";
pub const TIMED_OUT: &str = "Request timed out";

/// Why a call produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Authenticated call attempted without a stored token; nothing was sent
    SignInRequired,

    /// Server answered 401; cached credentials were dropped
    Unauthorized { message: String },

    /// Any other non-2xx status
    Status { code: u16, message: String },

    /// Connection could not be made or was interrupted
    Network(String),

    Timeout,

    /// Body could not be interpreted
    Decode(String),

    /// The request could not be built (bad URL, unreadable upload file)
    InvalidRequest(String),
}

impl TransportError {
    pub fn user_message(&self) -> String {
        match self {
            TransportError::SignInRequired => SIGN_IN_PROMPT.to_string(),
            TransportError::Unauthorized { message } | TransportError::Status { message, .. } => {
                message.clone()
            }
            TransportError::Network(_) => NETWORK_FAILURE.to_string(),
            TransportError::Timeout => TIMED_OUT.to_string(),
            TransportError::Decode(_) => "Unexpected response from server".to_string(),
            TransportError::InvalidRequest(msg) => msg.clone(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Unauthorized { .. } => Some(401),
            TransportError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::SignInRequired => write!(f, "not signed in"),
            TransportError::Unauthorized { message } => write!(f, "unauthorized: {}", message),
            TransportError::Status { code, message } => write!(f, "HTTP {}: {}", code, message),
            TransportError::Network(msg) => write!(f, "network error: {}", msg),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Decode(msg) => write!(f, "invalid response body: {}", msg),
            TransportError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
