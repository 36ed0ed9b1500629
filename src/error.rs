// ABOUTME: Application-wide error types for limani.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "the container engine is needed to push and remove images\n\
         make sure it is installed and running, and that the \"{engine}\" \
         command is available in your environment\n\
         see: https://docs.docker.com/engine/install/"
    )]
    EngineUnavailable { engine: String },

    #[error(transparent)]
    Parse(#[from] crate::types::ParseTaggedImageError),

    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),

    #[error(transparent)]
    Exec(#[from] crate::executor::ExecError),

    #[error(transparent)]
    Remove(#[from] crate::remove::RemoveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
