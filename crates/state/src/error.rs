use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateStoreError {
    /// The backing store could not be reached or an operation failed midway.
    /// Fatal for the current run; the driver cannot safely determine or
    /// record a resume position without the store.
    #[error("state store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to encode extraction state: {0}")]
    Encode(String),

    #[error("failed to decode extraction state: {0}")]
    Decode(String),
}

impl From<sled::Error> for StateStoreError {
    fn from(err: sled::Error) -> Self {
        StateStoreError::Unavailable(err.to_string())
    }
}

impl From<tokio_postgres::Error> for StateStoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        StateStoreError::Unavailable(err.to_string())
    }
}
