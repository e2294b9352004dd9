use serde::{Deserialize, Serialize};

use super::ANONYMOUS_NICKNAME;
use super::interaction::{InteractionKind, InteractionState, Interactive};
use super::subject::SubjectId;

/// Author summary attached to notes in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: SubjectId,
    pub username: String,
    pub nickname: String,
    pub avatar: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            id: SubjectId::default(),
            username: String::new(),
            nickname: ANONYMOUS_NICKNAME.to_string(),
            avatar: String::new(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct AuthorWire {
    id: SubjectId,
    username: Option<String>,
    nickname: Option<String>,
    avatar: Option<String>,
}

impl From<AuthorWire> for Author {
    fn from(wire: AuthorWire) -> Self {
        Self {
            id: wire.id,
            username: wire.username.unwrap_or_default(),
            nickname: wire
                .nickname
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| ANONYMOUS_NICKNAME.to_string()),
            avatar: wire.avatar.unwrap_or_default(),
        }
    }
}

impl<'de> Deserialize<'de> for Author {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<AuthorWire>::deserialize(deserializer)
            .map(|wire| wire.unwrap_or_default().into())
    }
}

/// A note as rendered in feed, search and profile lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NoteCardWire")]
pub struct NoteCard {
    pub id: SubjectId,
    pub title: String,
    pub content: String,
    pub is_video: bool,
    pub author: Author,
    pub like_count: u64,
    pub comment_count: u64,
    pub collect_count: u64,
    pub view_count: u64,
    pub images: Vec<String>,
    pub cover_image_url: String,
    pub created_at: String,
    pub is_liked: bool,
    pub is_collected: bool,
}

/// Payload shape for list endpoints. `author` is sometimes sent as `user`,
/// and counters are sometimes `null`.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct NoteCardWire {
    id: SubjectId,
    title: Option<String>,
    content: Option<String>,
    is_video: Option<bool>,
    author: Option<Author>,
    user: Option<Author>,
    like_count: Option<u64>,
    comment_count: Option<u64>,
    collect_count: Option<u64>,
    view_count: Option<u64>,
    images: Option<Vec<String>>,
    cover_image_url: Option<String>,
    created_at: Option<String>,
    is_liked: Option<bool>,
    is_collected: Option<bool>,
}

impl From<NoteCardWire> for NoteCard {
    fn from(wire: NoteCardWire) -> Self {
        let content = wire.content.unwrap_or_default();
        let title = wire
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| content.clone());
        Self {
            id: wire.id,
            title,
            content,
            is_video: wire.is_video.unwrap_or(false),
            author: wire.author.or(wire.user).unwrap_or_default(),
            like_count: wire.like_count.unwrap_or(0),
            comment_count: wire.comment_count.unwrap_or(0),
            collect_count: wire.collect_count.unwrap_or(0),
            view_count: wire.view_count.unwrap_or(0),
            images: wire.images.unwrap_or_default(),
            cover_image_url: wire.cover_image_url.unwrap_or_default(),
            created_at: wire.created_at.unwrap_or_default(),
            is_liked: wire.is_liked.unwrap_or(false),
            is_collected: wire.is_collected.unwrap_or(false),
        }
    }
}

impl Interactive for NoteCard {
    fn subject_id(&self, _kind: InteractionKind) -> &SubjectId {
        &self.id
    }

    fn interaction(&self, kind: InteractionKind) -> Option<InteractionState> {
        match kind {
            InteractionKind::Like => {
                Some(InteractionState::counted(self.is_liked, self.like_count))
            }
            InteractionKind::Collect => Some(InteractionState::counted(
                self.is_collected,
                self.collect_count,
            )),
            InteractionKind::Follow => None,
        }
    }

    fn set_interaction(&mut self, kind: InteractionKind, state: InteractionState) {
        match kind {
            InteractionKind::Like => {
                self.is_liked = state.active;
                self.like_count = state.count.unwrap_or(self.like_count);
            }
            InteractionKind::Collect => {
                self.is_collected = state.active;
                self.collect_count = state.count.unwrap_or(self.collect_count);
            }
            InteractionKind::Follow => {}
        }
    }
}

/// Full note as shown on the detail screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteDetail {
    pub id: SubjectId,
    #[serde(deserialize_with = "super::nullable")]
    pub title: String,
    #[serde(deserialize_with = "super::nullable")]
    pub content: String,
    #[serde(deserialize_with = "super::nullable")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "super::nullable")]
    pub video_url: String,
    #[serde(deserialize_with = "super::nullable")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "super::nullable")]
    pub location_name: String,
    #[serde(deserialize_with = "super::nullable")]
    pub created_at: String,
    #[serde(deserialize_with = "super::nullable")]
    pub like_count: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub collect_count: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub comment_count: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub author: DetailAuthor,
    #[serde(deserialize_with = "super::nullable")]
    pub is_liked: bool,
    #[serde(deserialize_with = "super::nullable")]
    pub is_collected: bool,
}

/// Author block of a note detail, including the viewer's follow state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailAuthor {
    pub id: SubjectId,
    #[serde(deserialize_with = "super::nullable")]
    pub avatar: String,
    #[serde(deserialize_with = "super::nullable")]
    pub nickname: String,
    #[serde(deserialize_with = "super::nullable")]
    pub signature: String,
    #[serde(deserialize_with = "super::nullable")]
    pub is_following: bool,
}

impl NoteDetail {
    pub fn is_video(&self) -> bool {
        !self.video_url.is_empty()
    }
}

impl Interactive for NoteDetail {
    fn subject_id(&self, kind: InteractionKind) -> &SubjectId {
        match kind {
            InteractionKind::Follow => &self.author.id,
            _ => &self.id,
        }
    }

    fn interaction(&self, kind: InteractionKind) -> Option<InteractionState> {
        Some(match kind {
            InteractionKind::Like => InteractionState::counted(self.is_liked, self.like_count),
            InteractionKind::Collect => {
                InteractionState::counted(self.is_collected, self.collect_count)
            }
            InteractionKind::Follow => InteractionState::flag(self.author.is_following),
        })
    }

    fn set_interaction(&mut self, kind: InteractionKind, state: InteractionState) {
        match kind {
            InteractionKind::Like => {
                self.is_liked = state.active;
                self.like_count = state.count.unwrap_or(self.like_count);
            }
            InteractionKind::Collect => {
                self.is_collected = state.active;
                self.collect_count = state.count.unwrap_or(self.collect_count);
            }
            InteractionKind::Follow => self.author.is_following = state.active,
        }
    }
}

/// Feed category. Id 0 is the client-side "Recommended" tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: SubjectId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<SubjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn recommended() -> Self {
        Self::new("0", "Recommended")
    }

    pub fn is_recommended(&self) -> bool {
        self.id.as_str() == "0"
    }
}
