mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigOverrides};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::openrouter::OpenRouterClient;
use crate::infra::terminal::TerminalSink;

#[derive(Parser)]
#[command(
    name = "commit-genie",
    author,
    version,
    about = "Generate a Conventional Commit message from staged changes"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a commit message from staged changes and copy it (default).
    Generate,
    /// Show the effective configuration (secrets masked).
    Config,
}

#[derive(Args)]
struct GlobalArgs {
    /// Repository to read staged changes from.
    #[arg(long, global = true, value_name = "PATH")]
    repo: Option<PathBuf>,
    /// Model identifier sent to the completion endpoint.
    #[arg(long, global = true)]
    model: Option<String>,
    /// Chat-completion endpoint URL.
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,
    /// Truncate diffs longer than this many characters (0 disables).
    #[arg(long, global = true, value_name = "N")]
    max_diff_chars: Option<usize>,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the invocation ended without a failure.
async fn run() -> AppResult<bool> {
    let cli = Cli::parse();

    let workspace_root = match cli.global.repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let overrides = ConfigOverrides {
        model: cli.global.model,
        endpoint: cli.global.endpoint,
        max_diff_chars: cli.global.max_diff_chars,
    };
    let config = AppConfig::load(&workspace_root, overrides)?;

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Config => {
            cmd::config::run(&config)?;
            Ok(true)
        }
        Commands::Generate => {
            let context = build_context(config);
            let outcome = cmd::generate::run(&context).await;
            Ok(!outcome.is_failure())
        }
    }
}

fn build_context(config: AppConfig) -> AppContext {
    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let language_model = Arc::new(OpenRouterClient::new(
        config.endpoint.clone(),
        config.model.clone(),
        config.api_key.clone(),
    ));
    let result_sink = Arc::new(TerminalSink::new());

    AppContext::new(config, git, language_model, result_sink)
}
