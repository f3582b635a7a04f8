//! Crate-level error type.

use crate::compression::CompressionError;
use crate::config::ConfigError;
use crate::loader::LoadError;
use crate::writer::WriteError;

/// Any failure of a compression run, from configuration to output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
