mod comment;
mod interaction;
mod note;
mod page;
mod subject;
mod user;

pub use comment::{Comment, CommentThread, ReplyTo, build_threads};
pub use interaction::{
    FollowTarget, InteractionEvent, InteractionKind, InteractionState, Interactive,
    SubjectSnapshot, reconcile,
};
pub use note::{Author, Category, DetailAuthor, NoteCard, NoteDetail};
pub use page::{Page, PageInfo};
pub use subject::SubjectId;
pub use user::{UserProfile, UserStats};

/// Nickname shown when the API omits one.
pub const ANONYMOUS_NICKNAME: &str = "Anonymous";

/// Treat an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
