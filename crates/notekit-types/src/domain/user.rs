use serde::{Deserialize, Serialize};

use super::subject::SubjectId;

/// Signed-in user (or profile owner) as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: SubjectId,
    #[serde(deserialize_with = "super::nullable")]
    pub username: String,
    #[serde(deserialize_with = "super::nullable")]
    pub nickname: String,
    #[serde(deserialize_with = "super::nullable")]
    pub avatar: String,
    #[serde(deserialize_with = "super::nullable")]
    pub signature: String,
    #[serde(deserialize_with = "super::nullable")]
    pub phone: String,
    pub stats: UserStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    #[serde(deserialize_with = "super::nullable")]
    pub follow_count: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub fans_count: u64,
    #[serde(deserialize_with = "super::nullable")]
    pub like_collect_count: u64,
}
