use super::{ServiceContext, decode, expect_data};
use crate::format::format_comment_time_now;
use crate::interaction::BusyRegistry;
use crate::transport::{ApiRequest, RequestOptions};
use crate::{Error, Result};
use notekit_types::{ApiResponse, Comment, CommentThread, SubjectId, build_threads};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize, Default)]
#[serde(default)]
struct CommentPage {
    comments: Vec<Comment>,
}

/// Text typed into the comment box, optionally answering another comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub note_id: SubjectId,
    pub content: String,
    pub reply_to: Option<SubjectId>,
}

impl CommentDraft {
    pub fn new(note_id: impl Into<SubjectId>, content: impl Into<String>) -> Self {
        Self {
            note_id: note_id.into(),
            content: content.into(),
            reply_to: None,
        }
    }

    pub fn replying_to(mut self, comment_id: impl Into<SubjectId>) -> Self {
        self.reply_to = Some(comment_id.into());
        self
    }
}

pub struct CommentService {
    ctx: ServiceContext,
    submitting: BusyRegistry<SubjectId>,
}

impl CommentService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            submitting: BusyRegistry::new(),
        }
    }

    /// Comments of a note grouped into threads, with display times filled in.
    pub async fn list(&self, note_id: &SubjectId) -> Result<Vec<CommentThread>> {
        let request = ApiRequest::get("/comments")
            .payload(json!({ "noteId": note_id }))
            .options(RequestOptions::default().with_spinner(false));
        let page: CommentPage = decode(expect_data(self.ctx.send(request).await?)?)?;

        let comments = page
            .comments
            .into_iter()
            .map(|mut comment| {
                comment.display_time = format_comment_time_now(&comment.created_at);
                comment
            })
            .collect();
        Ok(build_threads(comments))
    }

    /// Post a comment. Returns `Ok(None)` when a submission for the same
    /// note is still in flight.
    pub async fn submit(&self, draft: &CommentDraft) -> Result<Option<Comment>> {
        let content = draft.content.trim();
        if content.is_empty() {
            return Err(self.reject("Please enter a comment"));
        }
        if draft.note_id.is_empty() {
            return Err(self.reject("Note id is required"));
        }

        let Some(_busy) = self.submitting.try_acquire(draft.note_id.clone()) else {
            tracing::debug!(note = %draft.note_id, "comment already being sent");
            return Ok(None);
        };

        let mut payload = json!({ "noteId": draft.note_id, "content": content });
        if let Some(reply_to) = draft.reply_to.as_ref().filter(|id| !id.is_empty()) {
            payload["replyToId"] = json!(reply_to);
        }
        let request = ApiRequest::post("/comments/create")
            .payload(payload)
            .options(RequestOptions::default().with_toast(false));

        let outcome = match self.ctx.send(request).await {
            Ok(ApiResponse::Success { data, .. }) if !data.is_null() => Ok(data),
            Ok(ApiResponse::Success { message, .. }) => Err(Error::Api {
                message: message.unwrap_or_else(|| "Failed to send".to_string()),
            }),
            Ok(ApiResponse::Failure { message, .. }) => Err(Error::Api { message }),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(data) => {
                self.ctx.success("Sent");
                Ok(Some(decode_comment(data)))
            }
            Err(err) => {
                tracing::warn!(note = %draft.note_id, error = %err, "failed to send comment");
                self.ctx.notify(&err.user_message());
                Err(err)
            }
        }
    }

    fn reject(&self, message: &str) -> Error {
        self.ctx.notify(message);
        Error::InvalidInput(message.to_string())
    }
}

/// The created comment as echoed by the server; a bare acknowledgement
/// decodes to an empty comment.
fn decode_comment(data: Value) -> Comment {
    let mut comment: Comment = serde_json::from_value(data).unwrap_or_default();
    comment.display_time = format_comment_time_now(&comment.created_at);
    comment
}
