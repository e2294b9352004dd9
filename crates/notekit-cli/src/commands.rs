use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::context::ExecutionContext;
use crate::types::LogLevel;
use anyhow::Result;
use notekit_runtime::resolve_data_dir;
use notekit_types::InteractionKind;
use tracing_subscriber::EnvFilter;

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("notekit={level},notekit_runtime={level}"))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = ExecutionContext::new(data_dir, cli.format);

    let Some(command) = cli.command else {
        show_guidance(&ctx);
        return Ok(());
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(&ctx, command))
}

async fn dispatch(ctx: &ExecutionContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login {
            phone,
            password,
            agree,
        } => handlers::auth::login(ctx, phone, password, agree).await,
        Commands::Logout => handlers::auth::logout(ctx),
        Commands::Whoami => handlers::auth::whoami(ctx),

        Commands::Feed { tab, pages } => handlers::feed::handle(ctx, tab, pages).await,
        Commands::Categories => handlers::feed::categories(ctx).await,

        Commands::Show { note_id } => handlers::note::show(ctx, &note_id).await,
        Commands::Like { note_id } => {
            handlers::note::toggle(ctx, &note_id, InteractionKind::Like).await
        }
        Commands::Collect { note_id } => {
            handlers::note::toggle(ctx, &note_id, InteractionKind::Collect).await
        }
        Commands::Follow { note_id } => {
            handlers::note::toggle(ctx, &note_id, InteractionKind::Follow).await
        }

        Commands::Search { keyword } => handlers::search::handle(ctx, &keyword.join(" ")).await,

        Commands::Comments { note_id } => handlers::comments::list(ctx, &note_id).await,
        Commands::Comment {
            note_id,
            text,
            reply_to,
        } => handlers::comments::submit(ctx, note_id, text, reply_to).await,

        Commands::Profile { tab, pages } => {
            handlers::profile::show(ctx, tab.into(), pages).await
        }
        Commands::EditProfile {
            nickname,
            signature,
            avatar,
        } => handlers::profile::edit(ctx, nickname, signature, avatar).await,

        Commands::Publish {
            title,
            content,
            category,
            location,
            images,
            video,
        } => {
            let request = handlers::publish::PublishArgs {
                title,
                content,
                category,
                location,
                images,
                video,
            };
            handlers::publish::handle(ctx, request).await
        }

        Commands::Config { command } => match command {
            ConfigCommand::Init { base_url, force } => {
                handlers::config::init(ctx, base_url, force)
            }
            ConfigCommand::Show => handlers::config::show(ctx),
        },
    }
}

fn show_guidance(ctx: &ExecutionContext) {
    println!("notekit - notes from the terminal\n");
    if !ctx.config_path().exists() {
        println!("Get started:");
        println!("  notekit config init --base-url <URL>\n");
    }
    println!("Quick commands:");
    println!("  notekit login --phone <PHONE> --password <PASSWORD> --agree");
    println!("  notekit feed                      # Browse the home feed");
    println!("  notekit show <NOTE_ID>            # Open a note");
    println!("  notekit like <NOTE_ID>            # Toggle like");
    println!("  notekit search <KEYWORD>          # Search notes\n");
    println!("For more commands:");
    println!("  notekit --help");
}
