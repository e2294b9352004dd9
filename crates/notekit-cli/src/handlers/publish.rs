use super::{Reported, reported};
use crate::context::ExecutionContext;
use anyhow::Result;
use notekit_runtime::services::{MediaFile, PublishDraft};
use notekit_types::Category;
use std::path::PathBuf;

pub struct PublishArgs {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub location: String,
    pub images: Vec<PathBuf>,
    pub video: Option<PathBuf>,
}

/// Category by id or, case-insensitively, by name.
fn find_category<'a>(categories: &'a [Category], wanted: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|category| category.id.as_str() == wanted)
        .or_else(|| {
            categories
                .iter()
                .find(|category| category.name.eq_ignore_ascii_case(wanted))
        })
}

pub async fn handle(ctx: &ExecutionContext, args: PublishArgs) -> Result<()> {
    let client = ctx.client()?;
    let notifier = client.notifier().as_ref();
    let publish = client.publish();

    let mut draft = PublishDraft::new(args.title);
    draft.content = args.content;
    draft.location_name = args.location;

    if let Some(wanted) = args.category {
        let categories = publish.categories().await;
        let Some(category) = find_category(&categories, &wanted) else {
            let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
            anyhow::bail!("Unknown category '{}' (choose from: {})", wanted, names.join(", "));
        };
        draft.category_id = Some(category.id.clone());
    }

    if let Some(video) = args.video {
        if !draft.set_video(MediaFile::from_path(&video)?, notifier) {
            return Err(Reported.into());
        }
    } else if !args.images.is_empty() {
        let files = args
            .images
            .iter()
            .map(MediaFile::from_path)
            .collect::<notekit_runtime::Result<Vec<_>>>()?;
        let requested = files.len();
        let added = draft.add_images(files, notifier);
        tracing::debug!(requested, added, "images attached");
    }

    publish.publish(&draft).await.map_err(reported)
}
