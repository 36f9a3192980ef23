use thiserror::Error;

/// Top-level error type for the Vitals workspace.
///
/// Collaborator crates define their own error types for their domain and
/// convert into this one at crate boundaries where `?` needs it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VitalsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for VitalsError {
    fn from(err: toml::de::Error) -> Self {
        VitalsError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VitalsError {
    fn from(err: toml::ser::Error) -> Self {
        VitalsError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Vitals operations.
pub type Result<T> = std::result::Result<T, VitalsError>;
