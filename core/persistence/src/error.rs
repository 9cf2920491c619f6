//! FILENAME: core/persistence/src/error.rs

use engine::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is empty")]
    EmptyFile,

    #[error("Invalid file header: {0:?}")]
    InvalidHeader(String),

    #[error("Invalid grid: {0}")]
    Engine(#[from] ConfigError),
}
