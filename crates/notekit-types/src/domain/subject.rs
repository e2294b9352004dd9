use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a note or user as issued by the API.
///
/// The API is not consistent about id shapes: some endpoints return strings,
/// others integers. Both deserialize into the same string form, and `null`
/// becomes the empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty (or whitespace-only) id cannot be sent to the API.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SubjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Option::<RawId>::deserialize(deserializer)? {
            Some(RawId::Text(s)) => Self(s),
            Some(RawId::Signed(n)) => Self(n.to_string()),
            Some(RawId::Unsigned(n)) => Self(n.to_string()),
            None => Self::default(),
        })
    }
}
