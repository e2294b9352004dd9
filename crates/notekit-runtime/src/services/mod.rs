//! Page-level operations: load data into view state and report through the
//! notifier.

mod auth;
mod comments;
mod feed;
mod notes;
mod profile;
mod publish;
mod search;

pub use auth::{AuthService, LoginForm};
pub use comments::{CommentDraft, CommentService};
pub use feed::{FeedService, default_categories};
pub use notes::{FollowStatus, InteractionStatus, NoteService};
pub use profile::{ProfileService, ProfileUpdate};
pub use publish::{
    IMAGE_LIMIT, IMAGE_MAX_BYTES, Media, MediaFile, PublishDraft, PublishService, VIDEO_MAX_BYTES,
};
pub use search::{RECOMMENDED_KEYWORDS, SearchService};

use crate::config::Config;
use crate::notify::{NoticeKind, Notifier};
use crate::session::Session;
use crate::transport::{ApiRequest, SIGN_IN_PROMPT, Transport, UploadRequest};
use crate::{Error, Result};
use notekit_types::ApiResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Collaborators shared by every service.
#[derive(Clone)]
pub struct ServiceContext {
    pub session: Session,
    pub transport: Arc<dyn Transport>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<Config>,
}

impl ServiceContext {
    pub fn new(
        session: Session,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            session,
            transport,
            notifier,
            config,
        }
    }

    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse<Value>> {
        Ok(self.transport.send(request).await?)
    }

    pub(crate) async fn upload(&self, request: UploadRequest) -> Result<ApiResponse<Value>> {
        Ok(self.transport.upload(request).await?)
    }

    pub(crate) fn notify(&self, message: &str) {
        self.notifier.show(message, NoticeKind::Neutral);
    }

    pub(crate) fn success(&self, message: &str) {
        self.notifier.show(message, NoticeKind::Success);
    }

    /// Gate for screens that only make sense signed in.
    pub(crate) fn require_sign_in(&self) -> Result<()> {
        if self.session.is_signed_in() {
            return Ok(());
        }
        self.notify(SIGN_IN_PROMPT);
        self.session
            .redirect_to_sign_in(self.config.sign_in_redirect_delay());
        Err(Error::SignInRequired)
    }
}

/// Success data, or the server's failure message as `Error::Api`.
pub(crate) fn expect_data(response: ApiResponse<Value>) -> Result<Value> {
    response
        .into_result()
        .map_err(|message| Error::Api { message })
}

pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|err| Error::Decode(err.into()))
}
