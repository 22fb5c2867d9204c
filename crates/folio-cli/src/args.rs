use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Manage blog posts and portfolio projects of a folio backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (token, config.toml). Defaults to $FOLIO_PATH, then the XDG data dir
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Backend base URL, e.g. http://localhost:3000/api (overrides $FOLIO_API_URL and config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the bearer token used for admin requests
    Login {
        #[arg(long)]
        token: String,
    },

    /// Forget the stored token
    Logout,

    /// Show data dir, backend URL and sign-in state
    Status,

    /// Resolve an admin screen path (e.g. /blogs/edit/42) through the sign-in gate
    Route { path: String },

    /// Blog posts
    Blog {
        #[command(subcommand)]
        command: BlogCommand,
    },

    /// Portfolio projects
    Portfolio {
        #[command(subcommand)]
        command: PortfolioCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = "1")]
    pub page: u32,

    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PublishArgs {
    #[arg(long, conflicts_with = "draft")]
    pub publish: bool,

    #[arg(long)]
    pub draft: bool,
}

impl PublishArgs {
    /// Requested publish state; `None` keeps the current one.
    pub fn state(&self) -> Option<bool> {
        match (self.publish, self.draft) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct BlogFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Markdown body
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Cover image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,

    #[command(flatten)]
    pub publish: PublishArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PortfolioFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Markdown description
    #[arg(long, conflicts_with = "description_file")]
    pub description: Option<String>,

    #[arg(long)]
    pub description_file: Option<PathBuf>,

    #[arg(long)]
    pub live_url: Option<String>,

    #[arg(long)]
    pub github_url: Option<String>,

    /// Comma-separated, e.g. "React, Node.js"
    #[arg(long)]
    pub technologies: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub image: Option<PathBuf>,

    #[command(flatten)]
    pub publish: PublishArgs,
}

#[derive(Subcommand)]
pub enum BlogCommand {
    List(ListArgs),

    Show { id: String },

    Delete(DeleteArgs),

    Create(BlogFields),

    Edit {
        id: String,

        #[command(flatten)]
        fields: BlogFields,
    },

    /// Generate blog content from a prompt
    Generate {
        #[arg(long)]
        context: String,
    },

    /// Interactive list: /text search, n/p page, g N goto, d N delete, r refresh, q quit
    Browse,
}

#[derive(Subcommand)]
pub enum PortfolioCommand {
    List(ListArgs),

    Show { id: String },

    Delete(DeleteArgs),

    Create(PortfolioFields),

    Edit {
        id: String,

        #[command(flatten)]
        fields: PortfolioFields,
    },

    /// Interactive list: /text search, n/p page, g N goto, d N delete, r refresh, q quit
    Browse,
}
