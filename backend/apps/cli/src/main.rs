//! Extensions CLI
//!
//! Signs in against the extensions backend and browses or edits the
//! catalog. The session lives in two JSON files under `--state-dir`, so
//! it survives between runs the same way a browser keeps it between page
//! loads.

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "extensions-cli", about = "Extensions portal command-line client")]
pub struct Cli {
    #[arg(long, env = "EXTENSIONS_BASE_URL", default_value = "http://localhost:5000")]
    pub base_url: String,

    #[arg(long, env = "EXTENSIONS_STATE_DIR", default_value = ".extensions")]
    pub state_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and keep the session
    Login {
        username: String,
        #[arg(long, env = "EXTENSIONS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it
    Register {
        username: String,
        #[arg(long, env = "EXTENSIONS_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Ask the backend instead of reading the stored session
        #[arg(long, default_value_t = false)]
        remote: bool,
    },
    Extensions(ExtensionsCommand),
    Versions(VersionsCommand),
    /// List tags
    Tags {
        #[arg(long, default_value_t = false)]
        with_count: bool,
    },
}

#[derive(Args, Debug)]
pub struct ExtensionsCommand {
    #[command(subcommand)]
    pub command: ExtensionsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ExtensionsSubcommand {
    List(ListArgs),
    Show {
        id: String,
    },
    Create(FormArgs),
    Update {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    Delete {
        id: String,
    },
    Flag {
        id: String,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub uploader: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long)]
    pub descending: Option<bool>,
    #[arg(long, default_value_t = catalog::domain::filter::DEFAULT_PAGE_NUMBER)]
    pub page: u32,
    #[arg(long, default_value_t = catalog::domain::filter::DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

#[derive(Args, Debug)]
pub struct FormArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VersionsCommand {
    #[command(subcommand)]
    pub command: VersionsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VersionsSubcommand {
    List {
        extension_id: String,
    },
    Create {
        extension_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        descriptor: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        history: Option<String>,
        #[arg(long)]
        dependencies: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extensions_cli=warn,auth=warn,catalog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    commands::run(cli).await?;
    Ok(())
}
