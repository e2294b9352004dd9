use super::{ServiceContext, decode, expect_data};
use crate::Result;
use crate::transport::ApiRequest;
use notekit_types::{NoteDetail, SubjectId};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionStatus {
    pub is_liked: bool,
    pub is_collected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FollowStatus {
    pub is_following: bool,
    pub author_id: Option<SubjectId>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct DetailEnvelope {
    note_detail: Option<NoteDetail>,
}

pub struct NoteService {
    ctx: ServiceContext,
}

impl NoteService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn detail(&self, id: &SubjectId) -> Result<NoteDetail> {
        let request = ApiRequest::get(format!("/note/noteDetail/{}", id));
        let data = expect_data(self.ctx.send(request).await?)?;
        let envelope: DetailEnvelope = decode(data)?;
        Ok(envelope.note_detail.unwrap_or_default())
    }

    /// Viewer's like/collect flags. Signed out means neither, without a call.
    pub async fn interaction_status(&self, id: &SubjectId) -> Result<InteractionStatus> {
        if !self.ctx.session.is_signed_in() {
            return Ok(InteractionStatus::default());
        }
        let request = ApiRequest::get("/likesAndCollect/check")
            .payload(json!({ "noteId": id }))
            .quiet();
        decode(expect_data(self.ctx.send(request).await?)?)
    }

    pub async fn follow_status(&self, note_id: &SubjectId) -> Result<FollowStatus> {
        let request = ApiRequest::get("/follow/status")
            .payload(json!({ "noteId": note_id }))
            .quiet();
        decode(expect_data(self.ctx.send(request).await?)?)
    }

    /// Detail merged with the viewer's interaction and follow state. Status
    /// lookups are best effort.
    pub async fn load(&self, id: &SubjectId) -> Result<NoteDetail> {
        let mut detail = match self.detail(id).await {
            Ok(detail) => detail,
            Err(err) => {
                tracing::warn!(note = %id, error = %err, "failed to load note detail");
                self.ctx.notify("Failed to load note");
                return Err(err);
            }
        };
        if detail.id.is_empty() {
            detail.id = id.clone();
        }

        match self.interaction_status(id).await {
            Ok(status) => {
                detail.is_liked = status.is_liked;
                detail.is_collected = status.is_collected;
            }
            Err(err) => tracing::warn!(note = %id, error = %err, "interaction status unavailable"),
        }

        if self.ctx.session.is_signed_in() {
            match self.follow_status(id).await {
                Ok(status) => {
                    detail.author.is_following = status.is_following;
                    if let Some(author_id) = status.author_id.filter(|a| !a.is_empty()) {
                        detail.author.id = author_id;
                    }
                }
                Err(err) => tracing::warn!(note = %id, error = %err, "follow status unavailable"),
            }
        }

        Ok(detail)
    }
}
