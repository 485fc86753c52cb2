use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk::config::Config;
use newsdesk::storage::CollectionStore;
use newsdesk::utils::ArticleRef;

mod commands;

use commands::{EditFields, ManualEntry};

#[derive(Parser)]
#[command(
    name = "newsdesk",
    version,
    about = "Collect, screen and curate news articles for a digest",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Collection file, overrides storage.path
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to logging.format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an article by URL and add it to the collection
    Add {
        /// Article URL
        url: String,

        /// Search keyword that led to this article
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Add an article entered by hand
    Manual {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        source: String,

        #[arg(long)]
        lead: Option<String>,

        /// Author name (repeatable)
        #[arg(long = "author")]
        authors: Vec<String>,

        #[arg(long)]
        url: Option<String>,
    },

    /// List the collection in display order
    List {
        /// Print JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show one article
    Show {
        /// 1-based position or article id
        reference: ArticleRef,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Change fields of a stored article
    Edit {
        /// 1-based position or article id
        reference: ArticleRef,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        lead: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        url: Option<String>,
    },

    /// Remove an article
    Remove {
        /// 1-based position or article id
        reference: ArticleRef,
    },

    /// Put the collection in a new order
    Reorder {
        /// Every article exactly once, in the new order
        #[arg(required = true)]
        order: Vec<ArticleRef>,
    },

    /// Run the search-result filter on a URL and title
    Check {
        url: String,

        #[arg(short, long)]
        title: String,

        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.store {
        config.storage.path = path;
    }

    let log_format = cli
        .log_format
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::debug!(store = %config.storage.path.display(), "newsdesk starting");

    match cli.command {
        Commands::Add { url, keyword } => {
            tracing::info!(url = %url, keyword = ?keyword, "Starting add command");
            let mut store = CollectionStore::open(&config.storage.path);
            commands::add(&config, &mut store, &url, keyword.as_deref()).await?;
        }

        Commands::Manual {
            title,
            content,
            source,
            lead,
            authors,
            url,
        } => {
            tracing::info!(title = %title, source = %source, "Starting manual command");
            let mut store = CollectionStore::open(&config.storage.path);
            commands::manual(
                &mut store,
                ManualEntry {
                    title,
                    content,
                    source,
                    lead,
                    authors,
                    url,
                },
            )?;
        }

        Commands::List { json } => {
            let store = CollectionStore::open(&config.storage.path);
            commands::list(&store, json)?;
        }

        Commands::Show { reference, json } => {
            let store = CollectionStore::open(&config.storage.path);
            commands::show(&store, reference, json)?;
        }

        Commands::Edit {
            reference,
            title,
            lead,
            content,
            source,
            url,
        } => {
            tracing::info!(reference = %reference, "Starting edit command");
            let mut store = CollectionStore::open(&config.storage.path);
            commands::edit(
                &mut store,
                reference,
                EditFields {
                    title,
                    lead,
                    content,
                    source,
                    url,
                },
            )?;
        }

        Commands::Remove { reference } => {
            tracing::info!(reference = %reference, "Starting remove command");
            let mut store = CollectionStore::open(&config.storage.path);
            commands::remove(&mut store, reference)?;
        }

        Commands::Reorder { order } => {
            tracing::info!(count = order.len(), "Starting reorder command");
            let mut store = CollectionStore::open(&config.storage.path);
            commands::reorder(&mut store, &order)?;
        }

        Commands::Check { url, title, json } => {
            commands::check(&config, &url, &title, json)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => tracing_subscriber::EnvFilter::new("newsdesk=debug,info"),
        Err(_) => tracing_subscriber::EnvFilter::try_new(format!("newsdesk={level},warn"))?,
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
