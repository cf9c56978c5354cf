use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use threatlens::config::Config;
use threatlens::db;
use threatlens::feeds::{self, HttpFetcher};
use threatlens::output::terminal;
use threatlens::pipeline::{self, ThreatFilter};

/// ThreatLens: rule-based threat analytics over collected news headlines.
///
/// Collects headlines from RSS feeds and derives threat type, severity,
/// urgency, maturity, location and impact estimates from them.
#[derive(Parser)]
#[command(name = "threatlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Fetch headlines from the configured RSS feeds
    Collect {
        /// Keep collecting on the configured interval
        #[arg(long)]
        watch: bool,
    },

    /// List derived threats
    Threats {
        /// Exact threat type (e.g. "Armed Conflict")
        #[arg(long)]
        threat_type: Option<String>,

        /// Location scope: Country | Region | Global
        #[arg(long)]
        scope: Option<String>,

        /// Exact location name (e.g. "Middle East")
        #[arg(long)]
        location: Option<String>,

        /// Urgency: Low | Medium | High
        #[arg(long)]
        emergency: Option<String>,

        /// Maturity: Emerging | Escalating | Critical
        #[arg(long)]
        maturity: Option<String>,

        #[arg(long, default_value = "50")]
        limit: usize,

        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Show the impact analysis for one record
    Analyze {
        /// Record id (see `threatlens threats`)
        id: i64,
    },

    /// Set a record's category and bias tags (omitted flags clear the tag)
    Classify {
        id: i64,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        bias: Option<String>,
    },

    /// Show category and bias counts with the current insights
    Stats,

    /// Show system status (DB size, record count, last collection)
    Status,

    /// Start the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        #[arg(long, default_value = "5000")]
        port: u16,

        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        /// Run the periodic collector alongside the server
        #[arg(long)]
        collect: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("threatlens=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing ThreatLens database...");
            let config = Config::load()?;
            let store = db::initialize_store(&config.db_path)?;
            let table_count = store.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nThen run: threatlens collect");
        }

        Commands::Collect { watch } => {
            let config = Config::load()?;
            let store = db::initialize_store(&config.db_path)?;
            let feeds = config.feeds()?;
            let fetcher = Arc::new(HttpFetcher::new()?);

            if watch {
                println!(
                    "Collecting from {} feeds every {} min (Ctrl-C to stop)",
                    feeds.len(),
                    config.fetch_interval_mins.max(1)
                );
                feeds::run_periodic(
                    store,
                    fetcher,
                    feeds,
                    config.entries_per_feed,
                    config.fetch_interval(),
                )
                .await;
            } else {
                let summary = feeds::collect_once(
                    store.as_ref(),
                    fetcher.as_ref(),
                    &feeds,
                    config.entries_per_feed,
                )
                .await?;
                terminal::display_collect_summary(&summary);
            }
        }

        Commands::Threats {
            threat_type,
            scope,
            location,
            emergency,
            maturity,
            limit,
            offset,
        } => {
            let config = Config::load()?;
            let store = db::open_store(&config.db_path)?;
            let filter = ThreatFilter {
                threat_type,
                location_scope: scope,
                location_name: location,
                emergency,
                maturity,
            };
            let page = pipeline::compute_threats(store.as_ref(), &filter, limit, offset).await?;
            terminal::display_threat_page(&page, offset);
        }

        Commands::Analyze { id } => {
            let config = Config::load()?;
            let store = db::open_store(&config.db_path)?;
            let analysis = pipeline::compute_analysis(store.as_ref(), id).await?;
            terminal::display_analysis(&analysis);
        }

        Commands::Classify { id, category, bias } => {
            let config = Config::load()?;
            let store = db::open_store(&config.db_path)?;
            pipeline::classify_record(store.as_ref(), id, category.as_deref(), bias.as_deref())
                .await?;
            println!("{} Record #{id} classified", "✓".green());
        }

        Commands::Stats => {
            let config = Config::load()?;
            let store = db::open_store(&config.db_path)?;
            let stats = pipeline::compute_stats(store.as_ref()).await?;
            let insights = pipeline::compute_insights(store.as_ref()).await?;
            terminal::display_stats(&stats, &insights);
        }

        Commands::Status => {
            let config = Config::load()?;
            threatlens::status::show(&config.db_path).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve {
            port,
            bind,
            collect,
        } => {
            let config = Config::load()?;
            let store = db::initialize_store(&config.db_path)?;

            if collect {
                let feeds = config.feeds()?;
                let fetcher = Arc::new(HttpFetcher::new()?);
                tokio::spawn(feeds::run_periodic(
                    Arc::clone(&store),
                    fetcher,
                    feeds,
                    config.entries_per_feed,
                    config.fetch_interval(),
                ));
            }

            threatlens::web::run_server(config, store, port, &bind).await?;
        }
    }

    Ok(())
}
