//! Error types for eapsim

use thiserror::Error;

/// Error types for configuration loading and shared utilities.
#[derive(Debug, Error)]
pub enum Error {
    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
