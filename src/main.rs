use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::{Path, PathBuf};

use ghcomment::utils::{EnvProvider, StdEnvProvider};
use ghcomment::{
    ActionContext, ActionsReporter, CommentManager, DEFAULT_COMMENT_TAG, GitHubClient, Reporter,
    get_token,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    thread: ThreadArgs,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Args)]
struct ThreadArgs {
    /// Tag identifying the managed comment. Comments with different tags are independent
    #[arg(long, default_value = DEFAULT_COMMENT_TAG, global = true)]
    comment_tag: String,

    /// Pull request or issue number (defaults to the one in the triggering event)
    #[arg(long, global = true)]
    pr_number: Option<u64>,

    /// Repository as owner/repo (defaults to GITHUB_REPOSITORY)
    #[arg(long, global = true)]
    repository: Option<String>,

    /// Access token (defaults to GITHUB_TOKEN, then GH_TOKEN)
    #[arg(long, global = true)]
    github_token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the tagged comment
    Post {
        /// Comment text
        #[arg(short, long)]
        message: Option<String>,

        /// Read the comment text from a file. Takes precedence over --message
        #[arg(short, long)]
        file_path: Option<PathBuf>,

        /// Comma separated reactions: +1, -1, laugh, confused, heart, hooray, rocket, eyes
        #[arg(short, long, default_value = "")]
        reactions: String,

        /// What to do with an existing comment: upsert or recreate
        #[arg(long, default_value = "upsert")]
        mode: String,
    },
    /// Delete the tagged comment if present
    Delete,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = cli.verbose.log_level_filter();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Off) // Turn off all logs by default
        .filter(Some("ghcomment"), log_level)
        .filter(Some("octocrab"), log_level)
        .init();

    let reporter = ActionsReporter::new();
    if let Err(e) = run(cli, &StdEnvProvider, &reporter).await {
        reporter.failed(&e.to_string());
    }

    if reporter.has_failed() {
        std::process::exit(1);
    }
}

async fn run(cli: Cli, env: &impl EnvProvider, reporter: &impl Reporter) -> Result<()> {
    let context = ActionContext::from_env(env, cli.thread.repository.as_deref())?
        .with_issue_number(cli.thread.pr_number);
    let token = get_token(cli.thread.github_token, env)?;
    let client = GitHubClient::new(&context, token)?;
    let manager = CommentManager::new(
        &client,
        reporter,
        context.issue_number,
        &cli.thread.comment_tag,
    );

    match cli.command {
        Commands::Post {
            message,
            file_path,
            reactions,
            mode,
        } => {
            let message = resolve_message(message, file_path.as_deref())?;
            manager.post_message(&message, &reactions, &mode).await;
        }
        Commands::Delete => manager.delete_message().await?,
    }

    Ok(())
}

fn resolve_message(message: Option<String>, file_path: Option<&Path>) -> Result<String> {
    let Some(path) = file_path else {
        return Ok(message.unwrap_or_default());
    };

    if message.is_some() {
        log::warn!("Both --message and --file-path provided. Using {:?}", path);
    }

    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read message file {:?}: {e}", path))
}
