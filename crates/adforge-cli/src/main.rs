mod commands;
mod download;
mod render;
mod wizard;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adforge-cli")]
#[command(about = "Discover top-performing Meta ads and generate new creatives from them")]
struct Cli {
    /// Discovery webhook URL (overrides `ADFORGE_DISCOVERY_URL`)
    #[arg(long, global = true)]
    discovery_url: Option<String>,
    /// Generation webhook URL (overrides `ADFORGE_GENERATION_URL`)
    #[arg(long, global = true)]
    generation_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the interactive campaign wizard (the default)
    Run,
    /// Run a single discovery call and print the renderable ads as JSON
    Discover {
        /// Product or brand to search for
        #[arg(long)]
        product: String,
        /// Country code (e.g., US)
        #[arg(long)]
        country: String,
        /// Target audience (e.g., "Sports Fans")
        #[arg(long)]
        audience: String,
        /// Ad status filter: Active, Inactive or Both
        #[arg(long, default_value = "Active")]
        status: String,
        /// Comma-separated media types (e.g., "Video, Image"); empty for any
        #[arg(long, default_value = "")]
        media: String,
        /// First day of the search window (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day of the search window (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Maximum number of ads to request
        #[arg(long, default_value_t = adforge_core::DEFAULT_MAX_ITEMS)]
        max_items: u32,
    },
    /// Print the renderable subset of a JSON array of ad records
    Validate {
        /// Path to a JSON file holding an array of ad records
        file: PathBuf,
    },
}

impl Cli {
    /// Config keys supplied on the command line.
    fn url_overrides(&self) -> HashMap<&'static str, String> {
        let mut overrides = HashMap::new();
        if let Some(url) = &self.discovery_url {
            overrides.insert("ADFORGE_DISCOVERY_URL", url.clone());
        }
        if let Some(url) = &self.generation_url {
            overrides.insert("ADFORGE_GENERATION_URL", url.clone());
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let overrides = cli.url_overrides();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Validate { file } => {
            let level = std::env::var("ADFORGE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            init_tracing(&level)?;
            commands::run_validate(&file)
        }
        command => {
            let config = adforge_core::load_app_config_with_overrides(&overrides)?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");

            match command {
                Commands::Discover {
                    product,
                    country,
                    audience,
                    status,
                    media,
                    start,
                    end,
                    max_items,
                } => {
                    let args = commands::DiscoverArgs {
                        product,
                        country,
                        audience,
                        status,
                        media,
                        start,
                        end,
                        max_items,
                    };
                    commands::run_discover(&config, &args).await
                }
                _ => wizard::run_wizard(&config).await,
            }
        }
    }
}

/// Logs go to stderr so they never interleave with the wizard's screens.
/// `RUST_LOG` wins over `default_level` when set.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests;
