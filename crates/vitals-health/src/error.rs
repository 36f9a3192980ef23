//! Error types for the health data store.

/// Failures reported by a [`HealthStore`](crate::HealthStore).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HealthStoreError {
    #[error("health data access not authorized: {0}")]
    Authorization(String),
    #[error("no health data in the requested range")]
    NoData,
    #[error("health store error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for HealthStoreError {
    fn from(err: std::io::Error) -> Self {
        HealthStoreError::Unknown(err.to_string())
    }
}

impl From<serde_json::Error> for HealthStoreError {
    fn from(err: serde_json::Error) -> Self {
        HealthStoreError::Unknown(err.to_string())
    }
}
