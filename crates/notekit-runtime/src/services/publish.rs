use super::{ServiceContext, decode, default_categories, expect_data};
use crate::navigation::Route;
use crate::notify::{NoticeKind, Notifier};
use crate::transport::{ApiRequest, RequestOptions, UploadRequest};
use crate::{Error, Result};
use notekit_types::{ApiResponse, Category, SubjectId};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

pub const IMAGE_LIMIT: usize = 5;
pub const IMAGE_MAX_BYTES: u64 = 10 * 1024 * 1024;
pub const VIDEO_MAX_BYTES: u64 = 100 * 1024 * 1024;

const TOO_MANY_IMAGES: &str = "You can select up to 5 images";

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub size: u64,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Size taken from the file system.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        Ok(Self::new(path, metadata.len()))
    }
}

/// A note carries either images or a single video, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Media {
    #[default]
    None,
    Images(Vec<MediaFile>),
    Video(MediaFile),
}

impl Media {
    pub fn is_empty(&self) -> bool {
        match self {
            Media::None => true,
            Media::Images(images) => images.is_empty(),
            Media::Video(_) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishDraft {
    pub title: String,
    pub content: String,
    pub category_id: Option<SubjectId>,
    pub location_name: String,
    pub media: Media,
}

impl PublishDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn can_publish(&self) -> bool {
        !self.media.is_empty() && !self.title.trim().is_empty()
    }

    /// Add images, skipping oversized ones and anything past the limit.
    /// Returns how many were added.
    pub fn add_images(&mut self, files: Vec<MediaFile>, notifier: &dyn Notifier) -> usize {
        if matches!(self.media, Media::Video(_)) {
            notifier.show("A video is already selected", NoticeKind::Neutral);
            return 0;
        }

        let mut images = match std::mem::take(&mut self.media) {
            Media::Images(images) => images,
            _ => Vec::new(),
        };
        if images.len() >= IMAGE_LIMIT {
            notifier.show(TOO_MANY_IMAGES, NoticeKind::Neutral);
            self.media = Media::Images(images);
            return 0;
        }

        let before = images.len();
        for file in files {
            if file.size > IMAGE_MAX_BYTES {
                notifier.show("Images must be 10 MB or smaller", NoticeKind::Neutral);
                continue;
            }
            if images.len() == IMAGE_LIMIT {
                notifier.show(TOO_MANY_IMAGES, NoticeKind::Neutral);
                break;
            }
            images.push(file);
        }

        let added = images.len() - before;
        self.media = if images.is_empty() {
            Media::None
        } else {
            Media::Images(images)
        };
        added
    }

    /// Select a video, replacing any images. Oversized files are refused.
    pub fn set_video(&mut self, file: MediaFile, notifier: &dyn Notifier) -> bool {
        if file.size > VIDEO_MAX_BYTES {
            notifier.show("Videos must be 100 MB or smaller", NoticeKind::Neutral);
            return false;
        }
        self.media = Media::Video(file);
        true
    }

    pub fn remove_image(&mut self, index: usize) {
        if let Media::Images(images) = &mut self.media
            && index < images.len()
        {
            images.remove(index);
            if images.is_empty() {
                self.media = Media::None;
            }
        }
    }

    pub fn clear_media(&mut self) {
        self.media = Media::None;
    }

    fn category_text(&self) -> String {
        self.category_id
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }
}

pub struct PublishService {
    ctx: ServiceContext,
}

impl PublishService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Categories for the picker; falls back to a built-in list.
    pub async fn categories(&self) -> Vec<Category> {
        let request = ApiRequest::get("/categories").public().quiet();
        let fetched = match self.ctx.send(request).await.and_then(expect_data) {
            Ok(data) => decode::<Vec<Category>>(data),
            Err(err) => Err(err),
        };
        match fetched {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => default_categories(),
            Err(err) => {
                tracing::warn!(error = %err, "using default categories");
                default_categories()
            }
        }
    }

    pub async fn publish(&self, draft: &PublishDraft) -> Result<()> {
        if !draft.can_publish() {
            let message = "Add a title and at least one image or video";
            self.ctx.notify(message);
            return Err(Error::InvalidInput(message.to_string()));
        }
        self.ctx.require_sign_in()?;

        let result = match &draft.media {
            Media::Images(images) => self.publish_images(draft, images).await,
            Media::Video(video) => self.publish_video(draft, video).await,
            Media::None => Err(Error::InvalidInput(
                "Please choose images or a video".to_string(),
            )),
        };

        match result {
            Ok(()) => {
                tracing::info!(title = %draft.title.trim(), "note published");
                self.ctx.success("Published");
                self.ctx.session.go_to(Route::Home);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "publish failed");
                let message = match &err {
                    Error::Api { message } if !message.is_empty() => message.clone(),
                    Error::Transport(transport) => transport.user_message(),
                    Error::InvalidInput(message) => message.clone(),
                    _ => "Failed to publish, please try again".to_string(),
                };
                self.ctx.notify(&message);
                Err(err)
            }
        }
    }

    async fn publish_images(&self, draft: &PublishDraft, images: &[MediaFile]) -> Result<()> {
        let mut image_urls = Vec::with_capacity(images.len());
        let total = images.len();

        for (index, image) in images.iter().enumerate() {
            let label = format!("Uploading image {}/{}...", index + 1, total);
            self.ctx.notifier.loading(Some(&label));
            let request = UploadRequest::new("/note/upload-single-image", &image.path, "image")
                .options(RequestOptions::default().with_spinner(false).with_toast(false));
            let result = self.ctx.upload(request).await;
            self.ctx.notifier.loaded();

            let url = result
                .and_then(expect_data)
                .and_then(|data| image_url(&data).ok_or_else(|| Error::Api {
                    message: "No image URL returned".to_string(),
                }))
                .map_err(|err| Error::Api {
                    message: format!(
                        "Image {} failed to upload: {}",
                        index + 1,
                        err.user_message()
                    ),
                })?;
            image_urls.push(url);
        }

        let request = ApiRequest::post("/note/create-image-note")
            .payload(json!({
                "title": draft.title.trim(),
                "content": draft.content,
                "categoryId": draft.category_text(),
                "locationName": draft.location_name,
                "imageUrls": image_urls,
            }))
            .options(RequestOptions::default().with_toast(false));
        expect_data(self.ctx.send(request).await?)?;
        Ok(())
    }

    async fn publish_video(&self, draft: &PublishDraft, video: &MediaFile) -> Result<()> {
        let request = UploadRequest::new("/note/upload-video", &video.path, "video")
            .form_field("title", draft.title.trim())
            .form_field("content", draft.content.as_str())
            .form_field("categoryId", draft.category_text())
            .form_field("locationName", draft.location_name.as_str())
            .options(RequestOptions::default().with_toast(false));

        match self.ctx.upload(request).await? {
            ApiResponse::Success { .. } => Ok(()),
            ApiResponse::Failure { message, .. } => Err(Error::Api { message }),
        }
    }
}

/// URL of an uploaded image, nested under `data` or at the top level.
fn image_url(data: &Value) -> Option<String> {
    data.get("imageUrl")
        .or_else(|| data.get("data").and_then(|inner| inner.get("imageUrl")))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}
