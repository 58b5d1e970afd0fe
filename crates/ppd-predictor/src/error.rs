use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("risk model unavailable at {}: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("encoded label {encoded} outside the model's {classes} classes")]
    EncodedOutOfRange { encoded: u8, classes: usize },

    #[error("model returned an unrecognized label: {0}")]
    UnrecognizedLabel(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
