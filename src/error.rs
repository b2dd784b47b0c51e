use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid label size: {0}")]
    InvalidSize(String),

    #[error("{0} cannot be empty")]
    MissingField(&'static str),

    #[error("material name cannot be empty")]
    EmptyMaterial,

    #[error("material already exists: {0}")]
    DuplicateMaterial(String),

    #[error("material not found: {0}")]
    MissingMaterial(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not print: {0}")]
    Print(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
