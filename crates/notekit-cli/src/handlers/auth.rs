use super::reported;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::services::LoginForm;

pub async fn login(
    ctx: &ExecutionContext,
    phone: String,
    password: String,
    agree: bool,
) -> Result<()> {
    let form = LoginForm::new(phone, password, agree);
    let client = ctx.client()?;
    let user = client.auth().login(&form).await.map_err(reported)?;

    match (user, ctx.format) {
        (Some(user), _) => render::print_user(&user, ctx.format),
        (None, OutputFormat::Json) => render::print_json(&serde_json::json!({ "signedIn": true })),
        (None, OutputFormat::Plain) => Ok(()),
    }
}

pub fn logout(ctx: &ExecutionContext) -> Result<()> {
    ctx.client()?.auth().logout().map_err(reported)
}

pub fn whoami(ctx: &ExecutionContext) -> Result<()> {
    let session = ctx.client()?.session();
    if !session.is_signed_in() {
        anyhow::bail!("Not signed in");
    }
    match session.user() {
        Some(user) => render::print_user(&user, ctx.format),
        None => {
            println!("Signed in (no cached profile; run `notekit profile`)");
            Ok(())
        }
    }
}
