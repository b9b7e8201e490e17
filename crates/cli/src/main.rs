use crate::{commands::Commands, error::CliError};
use clap::Parser;
use engine::{catalog, config::ExtractorConfig};
use model::extraction::state::StateId;
use std::collections::HashMap;
use tracing::{Level, info};

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "techint",
    version = "0.1.0",
    about = "Extraction state tracker for the techint data lake"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let vars: HashMap<String, String> = std::env::vars().collect();
    let config = ExtractorConfig::from_env_map(&vars)?;

    match cli.command {
        Commands::Status { source, output } => {
            let store = config.state_backend.connect().await?;

            let states = match source {
                Some(source) => store.list(&source).await?,
                None => {
                    let mut all = Vec::new();
                    for spec in catalog::sources() {
                        all.extend(store.list(spec.name).await?);
                    }
                    all
                }
            };

            info!(rows = states.len(), "loaded extraction states");
            match output {
                Some(path) => output::write_states(&states, path).await?,
                None => output::print_states(&states)?,
            }
        }
        Commands::State { state_id } => {
            let state_id: StateId = state_id.parse()?;
            let store = config.state_backend.connect().await?;

            match store.get(&state_id).await? {
                Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
                None => println!("no state recorded for {state_id}"),
            }
        }
        Commands::Catalog => {
            println!("{}", serde_json::to_string_pretty(&catalog::sources())?);
        }
    }

    Ok(())
}
