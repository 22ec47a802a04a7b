mod place;

use clap::{Parser, Subcommand};
use fitfeed_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fitfeed-cli")]
#[command(about = "Operator tooling for finding and checking the Google Place ID")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pull a place identifier out of a full Google Maps URL (offline)
    Extract {
        /// Full Google Maps URL
        url: String,
    },
    /// Expand a share link (maps.app.goo.gl, goo.gl) to the URL it redirects to
    Resolve {
        /// Share link to expand
        short_url: String,
    },
    /// Run text searches in order and stop at the first with results
    Search {
        /// Queries to try, most specific first
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Expand, extract, and fall back to text search when the URL has no id
    Locate {
        /// Full URL or share link
        url: String,
        /// Fallback search query; may be repeated
        #[arg(long = "query", short = 'q')]
        queries: Vec<String>,
    },
    /// Fetch a place's details and print its name, rating and review count
    Verify {
        /// Place to check; defaults to GOOGLE_PLACE_ID
        #[arg(long)]
        place_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { url } => {
            init_tracing(None);
            place::run_extract(&url)
        }
        Commands::Resolve { short_url } => place::run_resolve(&load_config()?, &short_url).await,
        Commands::Search { queries } => place::run_search(&load_config()?, &queries).await,
        Commands::Locate { url, queries } => {
            place::run_locate(&load_config()?, &url, &queries).await
        }
        Commands::Verify { place_id } => {
            place::run_verify(&load_config()?, place_id.as_deref()).await
        }
    }
}

/// Loads configuration for the commands that talk to Google. `extract` is
/// offline and never reads it.
fn load_config() -> anyhow::Result<AppConfig> {
    let config = fitfeed_core::load_app_config()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;
    init_tracing(Some(config.log_level.as_str()));
    Ok(config)
}

/// Diagnostics go to stderr so stdout stays parseable JSON.
fn init_tracing(log_level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
