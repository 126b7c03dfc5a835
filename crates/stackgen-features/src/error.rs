//! Error types for feature resolution

use thiserror::Error;

/// Result type for feature resolution
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors raised while resolving feature toggles
#[derive(Debug, Error)]
pub enum FeatureError {
    /// One or more requested keys are not registered
    #[error("Unknown feature(s): {keys}. Known features: {known}")]
    UnknownFeature { keys: String, known: String },
}
