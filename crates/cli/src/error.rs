use engine::config::ConfigError;
use model::extraction::state::StateIdError;
use state_store::error::StateStoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("State store error: {0}")]
    Store(#[from] StateStoreError),

    #[error("Invalid state id: {0}")]
    StateId(#[from] StateIdError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
