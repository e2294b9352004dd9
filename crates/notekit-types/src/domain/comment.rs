use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::note::Author;
use super::subject::SubjectId;

/// Comment on a note. `display_time` is filled in client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub id: SubjectId,
    #[serde(deserialize_with = "super::nullable")]
    pub content: String,
    #[serde(deserialize_with = "super::nullable")]
    pub created_at: String,
    #[serde(deserialize_with = "super::nullable")]
    pub like_count: u64,
    pub author: Author,
    pub reply_to: Option<ReplyTo>,
    #[serde(skip_deserializing)]
    pub display_time: String,
}

/// The comment a reply answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplyTo {
    pub id: SubjectId,
    #[serde(deserialize_with = "super::nullable")]
    pub content: String,
    pub author: Author,
}

/// A top-level comment and the replies addressed to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Group a flat comment list into two-level threads.
///
/// Primary comments keep their order. Replies are attached, in order, under
/// the primary comment they answer; replies whose target is not a primary
/// comment in this list are not shown.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let mut primaries = Vec::new();
    let mut replies: HashMap<SubjectId, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match &comment.reply_to {
            None => primaries.push(comment),
            Some(target) => replies.entry(target.id.clone()).or_default().push(comment),
        }
    }

    primaries
        .into_iter()
        .map(|comment| CommentThread {
            replies: replies.remove(&comment.id).unwrap_or_default(),
            comment,
        })
        .collect()
}
