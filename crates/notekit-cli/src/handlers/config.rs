use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::ui::render;
use anyhow::Result;
use notekit_runtime::Config;

pub fn init(ctx: &ExecutionContext, base_url: Option<String>, force: bool) -> Result<()> {
    let path = ctx.config_path();
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    config.validate()?;
    config.save_to(&path)?;

    println!("Wrote {}", path.display());
    Ok(())
}

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config()?;
    match ctx.format {
        OutputFormat::Json => render::print_json(config),
        OutputFormat::Plain => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}
