use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the rendering core: configuration and input I/O.
///
/// Rendering itself never fails; malformed trees degrade to a fallback.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file at {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
