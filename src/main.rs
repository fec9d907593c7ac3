//! # Marketplace Checker CLI (`mkt`)
//!
//! Loads every configured marketplace export once, then either searches it
//! from the console or serves it over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! mkt --config ./config/mkt.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mkt search [term]` | Find the best deal and print a comparison table |
//! | `mkt sources` | Show which exports loaded and how many listings each kept |
//! | `mkt serve web` | Start the browser UI and JSON API |
//! | `mkt completions <shell>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! # Search, prompting for the term
//! mkt search
//!
//! # Second page of results for "speaker"
//! mkt search speaker --page 2
//!
//! # Ad-hoc exports without a config file
//! mkt --source "Lazada - Products.json" --source "Shopee - products.json" search earbuds
//!
//! # Start the web UI
//! mkt serve web
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use marketplace_checker::catalog::Catalog;
use marketplace_checker::{config, loader, logging, search, server, sources};

/// Marketplace Checker: compare listings across marketplace exports and
/// find the best deal.
#[derive(Parser)]
#[command(
    name = "mkt",
    about = "Marketplace Checker: compare product listings across marketplace exports",
    version,
    long_about = "Marketplace Checker loads product listings exported from several e-commerce \
    marketplaces, drops listings without a usable price, and ranks keyword matches by rating \
    and then by final price. Results are available from the console or a small web UI."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/mkt.toml")]
    config: PathBuf,

    /// Load this export instead of the configured sources. Repeatable;
    /// order is preserved.
    #[arg(long = "source", global = true)]
    sources: Vec<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the catalog for the best deal.
    ///
    /// Prints the top recommendation and one page of the comparison table.
    /// Without a term, prompts for one on stdin.
    Search {
        /// Product keyword (case-insensitive substring of the title).
        term: Option<String>,

        /// Page of the comparison table to show (clamped to the valid range).
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Print the result page as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List configured sources with their load status.
    Sources,

    /// Start a server.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Serve the search page and JSON API on `[server].bind`.
    Web,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "mkt", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::resolve_config(&cli.config, &cli.sources)?;
    logging::init(&cfg.logging, cli.verbose)?;

    let paths = loader::resolve_source_paths(&cfg.sources)?;
    let catalog = Catalog::load(&paths);

    match cli.command {
        Commands::Search { term, page, json } => {
            search::run_search(&cfg, &catalog, term, page, json)?;
        }
        Commands::Sources => {
            sources::list_sources(&catalog)?;
        }
        Commands::Serve { service } => match service {
            ServeService::Web => {
                server::run_server(cfg, catalog).await?;
            }
        },
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
