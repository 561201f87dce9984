//! Quantum Search CLI - web results with AI summaries in the terminal
//!
//! Talks to a running `quantum-search-server` and keeps the search history in
//! a local key-value file.

mod api;
mod config;
mod prompt;
mod render;
mod store;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use quantum_search::{CycleOutcome, CyclePhase, Orchestrator, Query};

use api::ApiClient;
use config::Config;
use prompt::{PromptInput, SessionCommand};
use store::FileStore;

/// Suggestions shown on the landing view
const TRENDING_QUERIES: &[&str] = &[
    "quantum computing applications",
    "AI breakthroughs 2024",
    "machine learning trends",
    "neural networks explained",
    "artificial intelligence ethics",
];

#[derive(Parser)]
#[command(name = "qsearch")]
#[command(about = "Quantum Search - web results with AI summaries", long_about = None)]
#[command(version)]
struct Cli {
    /// Server base URL (overrides config)
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Print the final result bundle as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive search session (default)
    Interactive,

    /// Show recent searches
    History {
        /// Forget all recent searches
        #[arg(long)]
        clear: bool,
    },

    /// Show trending queries
    Trending,

    /// Show or update configuration
    Config {
        /// Set the server base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Search { query, json } => {
            let (_, orchestrator) = open_orchestrator(cli.server.as_deref()).await?;
            cmd_search(&orchestrator, &query.join(" "), json).await
        }
        Commands::Interactive => {
            let (client, orchestrator) = open_orchestrator(cli.server.as_deref()).await?;
            cmd_interactive(&client, &orchestrator).await
        }
        Commands::History { clear } => {
            let (_, orchestrator) = open_orchestrator(cli.server.as_deref()).await?;
            cmd_history(&orchestrator, clear).await
        }
        Commands::Trending => {
            render::trending(TRENDING_QUERIES);
            Ok(())
        }
        Commands::Config { base_url } => cmd_config(base_url),
    }
}

async fn open_orchestrator(server: Option<&str>) -> Result<(Arc<ApiClient>, Arc<Orchestrator>)> {
    let config = Config::load()?;
    let base_url = server.unwrap_or(&config.base_url);

    let client = Arc::new(ApiClient::new(base_url));
    let store = Arc::new(FileStore::new(Config::storage_path()?));

    tracing::debug!("Using Quantum Search API at {}", client.base_url());

    let orchestrator =
        Orchestrator::open(client.clone(), store, config.orchestrator_config()).await;
    Ok((client, Arc::new(orchestrator)))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_search(orchestrator: &Arc<Orchestrator>, raw: &str, json: bool) -> Result<()> {
    if Query::parse(raw).is_err() {
        bail!("Query must not be empty");
    }

    if json {
        return match orchestrator.submit(raw).await {
            CycleOutcome::Full(bundle) | CycleOutcome::Partial(bundle) => {
                println!("{}", serde_json::to_string_pretty(&bundle)?);
                Ok(())
            }
            CycleOutcome::SearchFailed(e) | CycleOutcome::Rejected(e) => bail!("Search failed: {}", e),
            CycleOutcome::Superseded => Ok(()),
        };
    }

    run_search(orchestrator, raw).await
}

/// Run one cycle, printing results as soon as search resolves and the summary
/// once it arrives.
async fn run_search(orchestrator: &Arc<Orchestrator>, raw: &str) -> Result<()> {
    let mut rx = orchestrator.subscribe();
    let start = rx.borrow().cycle;

    let task = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let raw = raw.to_string();
        async move { orchestrator.submit(&raw).await }
    });

    println!("{}", "Searching...".dimmed());

    let first = {
        let state = rx
            .wait_for(|s| s.cycle > start && s.phase != CyclePhase::Searching)
            .await
            .context("Search session closed")?;
        state.clone()
    };

    let mut results_shown = false;
    if first.summary_pending() {
        if let Some(bundle) = &first.bundle {
            render::results(bundle);
            render::summary_pending();
            results_shown = true;
        }
    }

    match task.await.context("Search task failed")? {
        CycleOutcome::Full(bundle) => {
            if !results_shown {
                render::results(&bundle);
            }
            if let Some(summary) = &bundle.summary {
                render::summary(summary);
            }
        }
        CycleOutcome::Partial(bundle) => {
            if !results_shown {
                render::results(&bundle);
            }
            render::summary_unavailable();
        }
        CycleOutcome::SearchFailed(e) => {
            println!("{} {}", "✗ Search failed:".red(), e);
        }
        CycleOutcome::Rejected(e) => {
            println!("{} {}", "✗".red(), e);
        }
        CycleOutcome::Superseded => {}
    }

    Ok(())
}

async fn cmd_interactive(client: &ApiClient, orchestrator: &Arc<Orchestrator>) -> Result<()> {
    if !client.health().await.unwrap_or(false) {
        println!(
            "{} Could not reach {} (start quantum-search-server or run 'qsearch config --base-url <URL>')",
            "!".yellow(),
            client.base_url()
        );
    }

    render::landing(&orchestrator.history(), TRENDING_QUERIES);
    println!(
        "\n{}",
        "Type a query, #N to repeat a recent search, or :new :history :trending :clear :quit".dimmed()
    );

    loop {
        let line: String = Input::new()
            .with_prompt("search")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        match PromptInput::parse(&line) {
            PromptInput::Empty => continue,
            PromptInput::Command(SessionCommand::Quit) => break,
            PromptInput::Command(SessionCommand::New) => {
                orchestrator.new_search();
                render::landing(&orchestrator.history(), TRENDING_QUERIES);
            }
            PromptInput::Command(SessionCommand::History) => render::history(&orchestrator.history()),
            PromptInput::Command(SessionCommand::Trending) => render::trending(TRENDING_QUERIES),
            PromptInput::Command(SessionCommand::Clear) => {
                orchestrator.clear_history().await;
                println!("{} History cleared", "✓".green());
            }
            PromptInput::Unknown(line) => {
                println!("{} Unknown command '{}'", "?".yellow(), line);
            }
            PromptInput::Recall(n) => {
                let history = orchestrator.history();
                let Some(query) = n.checked_sub(1).and_then(|i| history.get(i)).map(str::to_string) else {
                    println!("{} No recent search #{}", "?".yellow(), n);
                    continue;
                };
                run_search(orchestrator, &query).await?;
                println!();
            }
            PromptInput::Query(query) => {
                run_search(orchestrator, &query).await?;
                println!();
            }
        }
    }

    Ok(())
}

async fn cmd_history(orchestrator: &Arc<Orchestrator>, clear: bool) -> Result<()> {
    if clear {
        orchestrator.clear_history().await;
        println!("{} History cleared", "✓".green());
        return Ok(());
    }

    render::history(&orchestrator.history());
    Ok(())
}

fn cmd_config(base_url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = base_url {
        config.set_base_url(&url);
        config.save()?;
        println!("{} Base URL set to {}", "✓".green(), config.base_url);
        return Ok(());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Storage: {:?}", Config::storage_path()?);
    println!("  Base URL: {}", config.base_url);
    println!("  Search timeout: {}s", config.search_timeout_secs);
    println!("  Summary timeout: {}s", config.summary_timeout_secs);

    Ok(())
}
