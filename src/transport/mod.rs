//! Loading source documents from outside the process.

/// Filesystem document loading.
pub mod fs;
