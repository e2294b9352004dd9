use std::fmt;

use crate::transport::TransportError;

/// Result type for notekit-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// The request never produced a usable answer
    Transport(TransportError),

    /// The server answered 2xx but flagged the operation as failed
    Api { message: String },

    /// Caller supplied missing or malformed input; nothing was sent
    InvalidInput(String),

    /// A signed-in session is required; nothing was sent
    SignInRequired,

    /// Response body did not match the expected model
    Decode(notekit_types::Error),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),

    /// Local JSON (credential file) could not be read or written
    Json(serde_json::Error),
}

impl Error {
    /// Text suitable for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            Error::Transport(err) => err.user_message(),
            Error::Api { message } => message.clone(),
            Error::InvalidInput(msg) => msg.clone(),
            Error::SignInRequired => "Please sign in".to_string(),
            Error::Decode(_) => "Unexpected response from server".to_string(),
            Error::Config(msg) => msg.clone(),
            Error::Io(_) | Error::Json(_) => "Local storage error".to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Transport error: {}", err),
            Error::Api { message } => write!(f, "API error: {}", message),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::SignInRequired => write!(f, "Sign-in required"),
            Error::Decode(err) => write!(f, "{}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Api { .. }
            | Error::InvalidInput(_)
            | Error::SignInRequired
            | Error::Config(_) => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::SignInRequired => Error::SignInRequired,
            other => Error::Transport(other),
        }
    }
}

impl From<notekit_types::Error> for Error {
    fn from(err: notekit_types::Error) -> Self {
        Error::Decode(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
