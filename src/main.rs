// gh-projects command line front end.
// Drives the plugin the way a launcher would: query, refresh, configure, open.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use gh_projects::cache::paths;
use gh_projects::{Item, NoticeLevel, Plugin, RefreshOutcome, SystemBrowser, UrlOpener};

#[derive(Debug, Parser)]
#[command(name = "gh-projects", version, about = "Open your GitHub projects quickly")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding gh_cache.json
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List items matching the text typed after the trigger
    Query {
        #[arg(default_value = "")]
        text: String,
    },
    /// Re-fetch repositories for all configured accounts
    Refresh {
        /// Only fetch when no cache file exists yet
        #[arg(long)]
        if_missing: bool,
    },
    /// Set the comma-separated accounts to index, then refresh
    SetAccounts { value: String },
    /// Open a cached repository in the browser
    Open {
        /// Repository as account/name
        repo: String,
        #[arg(long, conflicts_with = "issues")]
        pulls: bool,
        #[arg(long)]
        issues: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("gh-projects error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = match paths::log_dir() {
        Some(dir) => Some(logging_guard(&dir)?),
        None => None,
    };

    let cache_dir = cli
        .cache_dir
        .or_else(paths::cache_dir)
        .context("cannot determine cache directory")?;
    let config_path = cli
        .config
        .or_else(paths::config_path)
        .context("cannot determine config directory")?;

    let mut plugin = Plugin::open(&config_path, &cache_dir)?;

    let result = match cli.command {
        Commands::Query { text } => {
            for item in plugin.handle_query(&text) {
                print_item(&item);
            }
            Ok(())
        }
        Commands::Refresh { if_missing } => refresh(&mut plugin, !if_missing).await,
        Commands::SetAccounts { value } => {
            plugin.set_accounts(&value)?;
            refresh(&mut plugin, true).await
        }
        Commands::Open {
            repo,
            pulls,
            issues,
        } => {
            let Some(record) = plugin.find(&repo) else {
                bail!("{} is not in the cache; try `gh-projects refresh`", repo);
            };
            let url = if pulls {
                record.pulls_url()
            } else if issues {
                record.issues_url()
            } else {
                record.url.clone()
            };
            SystemBrowser.open_url(&url)?;
            Ok(())
        }
    };

    for notice in plugin.take_notices() {
        let label = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warn => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{}] {}: {}", notice.timestamp.format("%H:%M:%S"), label, notice.message);
    }

    result
}

fn logging_guard(dir: &std::path::Path) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    gh_projects::logging::init(dir).context("failed to initialise logging")
}

async fn refresh(plugin: &mut Plugin, overwrite: bool) -> anyhow::Result<()> {
    match plugin.refresh_if_needed(overwrite).await? {
        RefreshOutcome::Refreshed { count } => println!("Cached {} repositories", count),
        RefreshOutcome::Skipped => println!("Cache already present, nothing to do"),
    }
    Ok(())
}

fn print_item(item: &Item) {
    println!("{}\t{}", item.text, item.subtext);
    for action in &item.actions {
        match action.url() {
            Some(url) => println!("  {}: {}", action.text, url),
            None => println!("  {}", action.text),
        }
    }
}
