use super::reported;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::state::FeedView;

pub async fn handle(ctx: &ExecutionContext, tab: usize, pages: u32) -> Result<()> {
    let client = ctx.client()?;
    let feed = client.feed();
    let mut view = FeedView::new(client.config().page_size);

    if tab == 0 {
        feed.load_initial(&mut view).await.map_err(reported)?;
    } else {
        feed.load_categories(&mut view).await;
        if tab >= view.categories.len() {
            anyhow::bail!(
                "No category tab {} (run `notekit categories` to list them)",
                tab
            );
        }
        feed.switch_tab(&mut view, tab).await.map_err(reported)?;
    }

    for _ in 1..pages.max(1) {
        if !view.has_more {
            break;
        }
        feed.load_more(&mut view).await.map_err(reported)?;
    }

    render::print_waterfall(&view.notes, ctx.format)?;
    if ctx.format == OutputFormat::Plain && !view.has_more && !view.notes.is_empty() {
        println!("(end of feed)");
    }
    Ok(())
}

pub async fn categories(ctx: &ExecutionContext) -> Result<()> {
    let categories = ctx.client()?.feed().categories().await;
    render::print_categories(&categories, ctx.format)
}
