//! Request-scoped store of source text.
//!
//! A store is created per request or session and passed explicitly to
//! whatever needs it; nothing is cached globally.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::QuizError;
use crate::transport::fs::Document;
use crate::types::SourceText;

/// One stored piece of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextChunk {
    /// The stored text.
    pub text: SourceText,
    /// Where the text came from, e.g. a file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// When the chunk was stored.
    pub added_at: DateTime<Utc>,
}

/// Ordered collection of source text chunks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextStore {
    chunks: Vec<ContextChunk>,
}

impl ContextStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text`; blank text is ignored.
    pub fn store(&mut self, text: impl Into<SourceText>) {
        self.push(text.into(), None);
    }

    /// Append `text` recording where it came from.
    pub fn store_from(&mut self, origin: impl Into<String>, text: impl Into<SourceText>) {
        self.push(text.into(), Some(origin.into()));
    }

    /// Append every loaded document, keyed by its path.
    pub fn ingest(&mut self, documents: Vec<Document>) {
        for document in documents {
            let origin = document.path.display().to_string();
            self.push(document.text, Some(origin));
        }
    }

    /// Drop everything and keep only `text`.
    pub fn replace(&mut self, text: impl Into<SourceText>) {
        self.clear();
        self.store(text);
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Stored chunks, oldest first.
    pub fn chunks(&self) -> &[ContextChunk] {
        &self.chunks
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks joined by a single space.
    pub fn context(&self) -> SourceText {
        self.chunks
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Like [`context`](Self::context), but an empty store is an error.
    pub fn require_context(&self) -> Result<SourceText, QuizError> {
        if self.is_empty() {
            return Err(QuizError::NoSourceText);
        }
        Ok(self.context())
    }

    /// Write the store as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), QuizError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!(
            "[quizgen:context] saved {} chunks to {}",
            self.chunks.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a store written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn push(&mut self, text: SourceText, origin: Option<String>) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.chunks.push(ContextChunk {
            text: text.to_string(),
            origin,
            added_at: Utc::now(),
        });
    }
}
