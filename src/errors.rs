use std::io;

use thiserror::Error;

/// Error type for collaborator failures, configuration, and I/O.
///
/// Extraction, assembly, and validation never fail; only the seams that talk
/// to something outside the crate return this type.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The context store holds no text.
    #[error("no source text available; upload or store a document first")]
    NoSourceText,
    /// The seed question source failed.
    #[error("seed question source is unavailable: {reason}")]
    SeedSourceUnavailable { reason: String },
    /// The similarity model failed or returned malformed output.
    #[error("embedding model is unavailable: {reason}")]
    EmbeddingUnavailable { reason: String },
    /// No source produced a question after a seed failure.
    #[error("question generation failed: {reason}")]
    GenerationFailed { reason: String },
    /// A question type string that is not recognized.
    #[error("unsupported question type '{0}'")]
    UnsupportedQuestionType(String),
    /// Rejected configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
