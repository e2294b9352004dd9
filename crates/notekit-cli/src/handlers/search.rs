use super::reported;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::services::RECOMMENDED_KEYWORDS;

pub async fn handle(ctx: &ExecutionContext, keyword: &str) -> Result<()> {
    if keyword.trim().is_empty() && ctx.format == OutputFormat::Plain {
        println!("Try one of:");
        for suggestion in RECOMMENDED_KEYWORDS {
            println!("  notekit search {}", suggestion);
        }
        return Ok(());
    }

    let results = ctx
        .client()?
        .search()
        .search(keyword)
        .await
        .map_err(reported)?;
    render::print_search(&results, ctx.format)
}
