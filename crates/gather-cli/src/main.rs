use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod draft;
mod location;
mod publish;

#[derive(Debug, Parser)]
#[command(name = "gather")]
#[command(about = "Create and manage gather listings from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search places and print suggestions
    Search {
        /// Free text, e.g. "zilker park"
        query: String,
    },
    /// Resolve a place id from `search` into a location payload
    Place {
        place_id: String,
    },
    /// Reverse-geocode a dropped pin into a location payload
    Pin {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Walk a YAML draft through the wizard and publish it
    Submit {
        /// Path to the draft file
        #[arg(long)]
        draft: PathBuf,
        /// Identity of the publishing user
        #[arg(long)]
        actor: String,
        /// Print the assembled payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete a listing you created
    Delete {
        #[arg(long)]
        id: String,
        #[arg(long)]
        actor: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = gather_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search { query } => location::run_search(&config, &query).await,
        Commands::Place { place_id } => location::run_place(&config, &place_id).await,
        Commands::Pin { lat, lng } => location::run_pin(&config, lat, lng).await,
        Commands::Submit {
            draft,
            actor,
            dry_run,
        } => publish::run_submit(&config, &draft, &actor, dry_run).await,
        Commands::Delete { id, actor } => publish::run_delete(&config, &id, &actor).await,
    }
}
