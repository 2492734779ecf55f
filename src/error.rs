//! Error type shared by the catalog loader, the engine build and queries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No catalog row carries this exact name.
    #[error("no such game: {0:?}")]
    NotFound(String),
    /// The catalog has no rows and the config rejects empty builds.
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("cbor: {0}")]
    Cbor(#[from] serde_cbor::Error),
    /// A decoded snapshot whose parts disagree on the catalog size.
    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Recoverable query miss, the caller shows "no match" and carries on.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound(_))
    }
}
