use super::reported;
use crate::context::ExecutionContext;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::services::ProfileUpdate;
use notekit_runtime::state::{ProfileTab, ProfileView};
use std::path::PathBuf;

pub async fn show(ctx: &ExecutionContext, tab: ProfileTab, pages: u32) -> Result<()> {
    let client = ctx.client()?;
    let profile = client.profile();
    let mut view = ProfileView::new(client.config().page_size);
    view.current_tab = tab;

    // The header only comes with the first page of the Notes tab.
    profile
        .load_tab(&mut view, ProfileTab::Notes, true)
        .await
        .map_err(reported)?;
    if tab != ProfileTab::Notes {
        profile
            .load_tab(&mut view, tab, true)
            .await
            .map_err(reported)?;
    }

    for _ in 1..pages.max(1) {
        if !view.tab(tab).has_more {
            break;
        }
        profile
            .load_tab(&mut view, tab, false)
            .await
            .map_err(reported)?;
    }

    render::print_profile(&view, tab, ctx.format)
}

pub async fn edit(
    ctx: &ExecutionContext,
    nickname: String,
    signature: String,
    avatar: Option<PathBuf>,
) -> Result<()> {
    let update = ProfileUpdate {
        nickname,
        signature,
        avatar,
    };
    let saved = ctx
        .client()?
        .profile()
        .update(&update)
        .await
        .map_err(reported)?;
    match saved {
        Some(user) => render::print_user(&user, ctx.format),
        None => Ok(()),
    }
}
