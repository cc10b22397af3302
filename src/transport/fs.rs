use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::QuizError;
use crate::types::SourceText;

/// A text document read from disk.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Path of the source file.
    pub path: PathBuf,
    /// Full UTF-8 contents.
    pub text: SourceText,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Filesystem loader for `.txt` and `.md` documents under a root.
pub struct DocumentLoader {
    root: PathBuf,
    follow_links: bool,
}

impl DocumentLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Read every supported document, in path order.
    ///
    /// A root that is itself a file is loaded directly. Files that are not
    /// valid UTF-8 are skipped with a warning.
    pub fn load(&self) -> Result<Vec<Document>, QuizError> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        let mut walker = WalkDir::new(&self.root);
        if self.follow_links {
            walker = walker.follow_links(true);
        }
        for entry in walker {
            let entry = entry.map_err(|err| QuizError::Io(err.into()))?;
            if entry.file_type().is_file() && is_text_file(entry.path()) {
                candidates.push(entry.path().to_path_buf());
            }
        }
        candidates.sort();

        let mut documents = Vec::with_capacity(candidates.len());
        for path in candidates {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                    warn!("[quizgen:fs] skipping non-UTF-8 file {}", path.display());
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let modified = file_mtime(&path).unwrap_or_else(Utc::now);
            documents.push(Document {
                path,
                text,
                modified,
            });
        }
        debug!(
            "[quizgen:fs] loaded {} documents from {}",
            documents.len(),
            self.root.display()
        );
        Ok(documents)
    }
}

/// Load every `.txt`/`.md` document under `root`, in stable path order.
pub fn load_documents(root: impl AsRef<Path>) -> Result<Vec<Document>, QuizError> {
    DocumentLoader::new(root.as_ref()).load()
}

/// True if the path has a `.txt` or `.md` extension (case-insensitive).
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Best-effort file modified time.
pub fn file_mtime(path: &Path) -> Option<DateTime<Utc>> {
    let metadata = fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    Some(DateTime::<Utc>::from(modified))
}
