use crate::types::ProfileTabArg;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in with phone number and password")]
    Login {
        #[arg(long)]
        phone: String,

        #[arg(long)]
        password: String,

        #[arg(long, help = "Accept the user agreement")]
        agree: bool,
    },

    #[command(about = "Sign out and forget the session token")]
    Logout,

    #[command(about = "Show the signed-in user")]
    Whoami,

    #[command(about = "Browse the home feed")]
    Feed {
        #[arg(long, help = "Category tab index (0 = Recommended)", default_value = "0")]
        tab: usize,

        #[arg(long, default_value = "1")]
        pages: u32,
    },

    #[command(about = "List note categories")]
    Categories,

    #[command(about = "Show one note with your like, collect and follow state")]
    Show { note_id: String },

    #[command(about = "Like or unlike a note")]
    Like { note_id: String },

    #[command(about = "Collect or uncollect a note")]
    Collect { note_id: String },

    #[command(about = "Follow or unfollow the author of a note")]
    Follow { note_id: String },

    #[command(about = "Search notes by keyword")]
    Search {
        #[arg(required = false)]
        keyword: Vec<String>,
    },

    #[command(about = "List the comments on a note")]
    Comments { note_id: String },

    #[command(about = "Comment on a note")]
    Comment {
        note_id: String,

        text: String,

        #[arg(long, help = "Reply to this comment id")]
        reply_to: Option<String>,
    },

    #[command(about = "Show your profile and one of its lists")]
    Profile {
        #[arg(long, default_value = "notes")]
        tab: ProfileTabArg,

        #[arg(long, default_value = "1")]
        pages: u32,
    },

    #[command(about = "Change nickname, bio or avatar")]
    EditProfile {
        #[arg(long)]
        nickname: String,

        #[arg(long, default_value = "")]
        signature: String,

        #[arg(long)]
        avatar: Option<PathBuf>,
    },

    #[command(about = "Publish an image or video note")]
    Publish {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long = "image", conflicts_with = "video")]
        images: Vec<PathBuf>,

        #[arg(long)]
        video: Option<PathBuf>,
    },

    #[command(about = "Manage the configuration file")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Write a default config.toml")]
    Init {
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },

    #[command(about = "Print the effective configuration")]
    Show,
}
