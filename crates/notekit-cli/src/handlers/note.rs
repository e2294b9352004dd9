use super::{Reported, reported};
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::ToggleOutcome;
use notekit_types::{InteractionKind, InteractionState, NoteDetail, SubjectId};
use serde_json::json;

pub async fn show(ctx: &ExecutionContext, note_id: &str) -> Result<()> {
    let client = ctx.client()?;
    let detail = client
        .notes()
        .load(&SubjectId::new(note_id))
        .await
        .map_err(reported)?;
    render::print_detail(&detail, ctx.format)
}

pub async fn toggle(ctx: &ExecutionContext, note_id: &str, kind: InteractionKind) -> Result<()> {
    let client = ctx.client()?;
    let id = SubjectId::new(note_id);

    // Signed out, the controller refuses before anything is fetched.
    let mut detail = if client.session().is_signed_in() {
        client.notes().load(&id).await.map_err(reported)?
    } else {
        NoteDetail {
            id,
            ..Default::default()
        }
    };

    match client.interactions().toggle(&mut detail, kind).await {
        ToggleOutcome::Confirmed(state) => print_state(ctx, &detail, kind, state),
        ToggleOutcome::Suppressed => Ok(()),
        ToggleOutcome::RolledBack { .. } | ToggleOutcome::Rejected(_) => Err(Reported.into()),
    }
}

fn print_state(
    ctx: &ExecutionContext,
    detail: &NoteDetail,
    kind: InteractionKind,
    state: InteractionState,
) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return render::print_json(&json!({
            "noteId": detail.id,
            "authorId": detail.author.id,
            "kind": kind,
            "active": state.active,
            "count": state.count,
        }));
    }

    let status = if state.active { "on" } else { "off" };
    match state.count {
        Some(count) => println!("{} {}: {} ({})", kind, detail.id, status, count),
        None => println!("{} {}: {}", kind, detail.author.nickname, status),
    }
    Ok(())
}
