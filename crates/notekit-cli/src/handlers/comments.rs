use super::reported;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::services::CommentDraft;
use notekit_types::SubjectId;

pub async fn list(ctx: &ExecutionContext, note_id: &str) -> Result<()> {
    let threads = ctx
        .client()?
        .comments()
        .list(&SubjectId::new(note_id))
        .await
        .map_err(reported)?;
    render::print_threads(&threads, ctx.format)
}

pub async fn submit(
    ctx: &ExecutionContext,
    note_id: String,
    text: String,
    reply_to: Option<String>,
) -> Result<()> {
    let mut draft = CommentDraft::new(note_id, text);
    if let Some(target) = reply_to {
        draft = draft.replying_to(target);
    }

    let created = ctx
        .client()?
        .comments()
        .submit(&draft)
        .await
        .map_err(reported)?;

    if let (Some(comment), OutputFormat::Json) = (created, ctx.format) {
        render::print_json(&comment)?;
    }
    Ok(())
}
