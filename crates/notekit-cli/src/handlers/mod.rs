pub mod auth;
pub mod comments;
pub mod config;
pub mod feed;
pub mod note;
pub mod profile;
pub mod publish;
pub mod search;

use notekit_runtime::Error;
use std::fmt;

/// A failure the notifier has already shown; the binary exits non-zero
/// without printing it again.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command failed")
    }
}

impl std::error::Error for Reported {}

pub(crate) fn reported(err: Error) -> anyhow::Error {
    match err {
        Error::Api { .. }
        | Error::InvalidInput(_)
        | Error::SignInRequired
        | Error::Transport(_) => {
            tracing::debug!(error = %err, "already reported");
            Reported.into()
        }
        other => other.into(),
    }
}
