//! gai - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use gitaissist::actions::{ActionOutcome, Assistant};
use gitaissist::config::{self, GaiConfig};
use gitaissist::git::GitCli;
use gitaissist::github::GhCli;
use gitaissist::llm::OpenAiClient;
use gitaissist::preflight::{self, Requirement};
use gitaissist::review::EditorReviewer;
use gitaissist::ui;

/// Automate Git operations with AI assistance.
#[derive(Parser, Debug)]
#[command(name = "gai")]
#[command(about = "Git AI Assistant")]
#[command(long_about = "Automate Git operations with AI assistance.")]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'V', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Action(ActionCommand),

    /// Print the version of gai
    #[command(visible_alias = "v")]
    Version,

    /// Show the prompt templates in use and where they come from
    Instructions,
}

/// Commands that generate text, ask for review and change the repository.
#[derive(Subcommand, Debug)]
enum ActionCommand {
    /// Generate an AI-powered commit message
    #[command(visible_alias = "c")]
    Commit {
        /// Amend the last commit instead of creating a new one
        #[arg(long)]
        amend: bool,

        /// Extra flags passed to `git commit` (after `--`)
        #[arg(last = true)]
        extra: Vec<String>,
    },

    /// Push changes and create/update a PR
    #[command(visible_alias = "p")]
    Push {
        /// Extra flags passed to `git push` (after `--`)
        #[arg(last = true)]
        extra: Vec<String>,
    },

    /// Stash changes with an AI-generated message
    #[command(visible_alias = "s")]
    Stash {
        /// Extra flags passed to `git stash push` (after `--`)
        #[arg(last = true)]
        extra: Vec<String>,
    },
}

impl ActionCommand {
    fn requirement(&self) -> Requirement {
        match self {
            ActionCommand::Push { .. } => Requirement::GitHub,
            ActionCommand::Commit { .. } | ActionCommand::Stash { .. } => Requirement::Local,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose || config::verbose_from_env());

    ui::print_banner();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Set up logging/tracing to stderr.
///
/// `RUST_LOG` wins; otherwise debug output for this crate when verbose.
fn setup_logging(verbose: bool) {
    let fallback = if verbose { "gitaissist=debug,warn" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();

    if verbose {
        tracing::debug!("Debug logging enabled");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Version => {
            println!("{}", format!("gai version {}", env!("CARGO_PKG_VERSION")).green());
        }
        Command::Instructions => {
            let config = GaiConfig::from_env().context("Failed to load configuration")?;
            print_instructions(&config);
        }
        Command::Action(action) => {
            let config = GaiConfig::from_env().context("Failed to load configuration")?;
            let outcome = run_action(&config, action).await?;
            tracing::debug!("Action finished: {:?}", outcome);
        }
    }
    Ok(())
}

/// Check prerequisites, wire the production components and run `action`.
async fn run_action(config: &GaiConfig, action: ActionCommand) -> Result<ActionOutcome> {
    preflight::check(config, action.requirement())
        .await
        .context("Prerequisites not met")?;

    let api_key = config.require_api_key()?;
    let git = GitCli::new(config.remote.clone(), config.main_branch.clone());
    let generator = OpenAiClient::new(api_key, config.model.clone());
    let reviewer = EditorReviewer::new(config.editor.clone());
    let host = GhCli::new();
    let assistant = Assistant::new(config, &git, &git, &generator, &reviewer, &host);

    let outcome = match action {
        ActionCommand::Commit { amend, extra } => assistant.commit(amend, &extra).await?,
        ActionCommand::Stash { extra } => assistant.stash(&extra).await?,
        ActionCommand::Push { extra } => assistant.push(&extra).await?,
    };
    Ok(outcome)
}

fn print_instructions(config: &GaiConfig) {
    println!("Prompt directory: {}", config.prompt_dir.display());
    for (name, template) in config.prompts.entries() {
        println!();
        println!("{}", format!("== {} ({})", name, template.source).bold());
        println!("{}", template.content.trim());
    }
}
