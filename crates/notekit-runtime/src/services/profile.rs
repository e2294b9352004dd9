use super::{ServiceContext, decode};
use crate::interaction::BusyRegistry;
use crate::state::{ProfileTab, ProfileView};
use crate::transport::{ApiRequest, RequestOptions, UploadRequest};
use crate::{Error, Result};
use notekit_types::{ApiResponse, Author, NoteCard, Page, PageInfo, UserProfile};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|webp)$").unwrap());

pub(crate) fn is_image_path(path: &Path) -> bool {
    IMAGE_EXTENSION.is_match(&path.to_string_lossy())
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct Pagination {
    current: Option<u32>,
    total_pages: Option<u32>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ProfilePage {
    user: Option<UserProfile>,
    notes: Vec<NoteCard>,
    pagination: Pagination,
}

/// Edits from the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub nickname: String,
    pub signature: String,
    /// Local image to upload as the new avatar.
    pub avatar: Option<PathBuf>,
}

pub struct ProfileService {
    ctx: ServiceContext,
    saving: BusyRegistry<()>,
}

impl ProfileService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            ctx,
            saving: BusyRegistry::new(),
        }
    }

    /// Load one tab. `reset` starts over from page 1; otherwise the next page
    /// is appended. Reloading the Notes tab also refreshes the header.
    pub async fn load_tab(
        &self,
        view: &mut ProfileView,
        tab: ProfileTab,
        reset: bool,
    ) -> Result<()> {
        self.ctx.require_sign_in()?;
        if view.tab(tab).loading {
            return Ok(());
        }

        let next_page = view.tab(tab).next_page(reset);
        let page_size = view.tab(tab).page_size;
        let request = ApiRequest::get(tab.endpoint())
            .payload(json!({ "page": next_page, "pageSize": page_size }));

        view.tab_mut(tab).loading = true;
        let result = self.ctx.send(request).await;
        view.tab_mut(tab).loading = false;

        let data = match result {
            Ok(ApiResponse::Success { data, .. }) => data,
            Ok(ApiResponse::Failure { message, .. }) => {
                self.ctx.notify(&message);
                return Err(Error::Api { message });
            }
            Err(err) => {
                tracing::warn!(%tab, error = %err, "failed to load profile tab");
                self.ctx.notify("Failed to load data");
                return Err(err);
            }
        };

        let page: ProfilePage = decode(data)?;
        let owner = page.user.unwrap_or_default();
        let items = page
            .notes
            .into_iter()
            .map(|note| with_owner(note, &owner))
            .collect();

        if tab == ProfileTab::Notes && reset {
            if let Err(err) = self.ctx.session.store_user(&owner) {
                tracing::warn!(error = %err, "failed to cache user info");
            }
            view.user = Some(owner);
        }

        view.tab_mut(tab).apply_page(
            Page {
                items,
                info: PageInfo::resolve(
                    page.pagination.current,
                    page.pagination.total_pages,
                    next_page,
                ),
            },
            reset,
        );
        Ok(())
    }

    /// Save nickname, signature and optionally a new avatar. Returns
    /// `Ok(None)` when a save is still in flight.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<Option<UserProfile>> {
        let nickname = update.nickname.trim();
        if nickname.is_empty() {
            return Err(self.reject("Please enter a nickname"));
        }
        if let Some(avatar) = &update.avatar
            && !is_image_path(avatar)
        {
            return Err(self.reject("Only image files can be uploaded"));
        }
        let Some(_saving) = self.saving.try_acquire(()) else {
            tracing::debug!("profile save already pending");
            return Ok(None);
        };

        let options = RequestOptions::default().with_toast(false);
        let result = match &update.avatar {
            Some(avatar) => {
                let request = UploadRequest::new("/users/updateUserInfo", avatar, "avatar")
                    .form_field("nickname", nickname)
                    .form_field("signature", update.signature.as_str())
                    .options(options);
                self.ctx.upload(request).await
            }
            None => {
                let request = ApiRequest::post("/users/updateUserInfo")
                    .payload(json!({ "nickname": nickname, "signature": update.signature }))
                    .options(options);
                self.ctx.send(request).await
            }
        };

        let data = match result {
            Ok(ApiResponse::Success { data, .. }) => data,
            Ok(ApiResponse::Failure { message, .. }) => {
                self.ctx.notify(&message);
                return Err(Error::Api { message });
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save profile");
                self.ctx.notify(&err.user_message());
                return Err(err);
            }
        };

        let cached = self.ctx.session.user().unwrap_or_default();
        let user = saved_user(data, cached, nickname, &update.signature);
        self.ctx.session.store_user(&user)?;
        self.ctx.success("Saved");
        Ok(Some(user))
    }

    fn reject(&self, message: &str) -> Error {
        self.ctx.notify(message);
        Error::InvalidInput(message.to_string())
    }
}

/// Lists on the own profile page may omit the author; it is the owner.
fn with_owner(mut note: NoteCard, owner: &UserProfile) -> NoteCard {
    if note.author.id.is_empty() {
        let nickname = if owner.nickname.is_empty() {
            note.author.nickname.clone()
        } else {
            owner.nickname.clone()
        };
        note.author = Author {
            id: owner.id.clone(),
            username: owner.username.clone(),
            nickname,
            avatar: owner.avatar.clone(),
        };
    }
    note
}

/// User returned by the update call. A body without one keeps the cached
/// user with the submitted fields on top.
fn saved_user(data: Value, cached: UserProfile, nickname: &str, signature: &str) -> UserProfile {
    match serde_json::from_value::<UserProfile>(data) {
        Ok(user) if !user.id.is_empty() => user,
        _ => UserProfile {
            nickname: nickname.to_string(),
            signature: signature.to_string(),
            ..cached
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekit_types::SubjectId;

    #[test]
    fn test_image_extension_check() {
        assert!(is_image_path(Path::new("/tmp/me.JPG")));
        assert!(is_image_path(Path::new("avatar.webp")));
        assert!(!is_image_path(Path::new("clip.mp4")));
        assert!(!is_image_path(Path::new("png")));
    }

    #[test]
    fn test_owner_fills_missing_author() {
        let owner = UserProfile {
            id: SubjectId::new("u1"),
            nickname: "kai".to_string(),
            ..Default::default()
        };
        let note = with_owner(NoteCard::default(), &owner);
        assert_eq!(note.author.id.as_str(), "u1");
        assert_eq!(note.author.nickname, "kai");
    }

    #[test]
    fn test_saved_user_without_body_keeps_cached_identity() {
        let cached = UserProfile {
            id: SubjectId::new("u1"),
            nickname: "old".to_string(),
            avatar: "https://cdn.test/a.png".to_string(),
            phone: "13800000000".to_string(),
            ..Default::default()
        };

        let user = saved_user(Value::Null, cached, "new", "hi");

        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.nickname, "new");
        assert_eq!(user.signature, "hi");
        assert_eq!(user.avatar, "https://cdn.test/a.png");
        assert_eq!(user.phone, "13800000000");
    }
}
