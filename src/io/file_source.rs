use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::IoError;

/// Trait for fetching whole files by name from a serving root.
///
/// This abstraction keeps the slice service independent of the local
/// filesystem so it can be exercised against in-memory sources.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Read the complete contents of `filename`.
    ///
    /// Returns [`IoError::NotFound`] when the name does not resolve to a
    /// regular file inside the source.
    async fn read(&self, filename: &str) -> Result<Bytes, IoError>;

    /// List readable file names, sorted.
    async fn list(&self) -> Result<Vec<String>, IoError>;
}

// =============================================================================
// LocalFileSource
// =============================================================================

/// File source backed by a directory on the local filesystem.
///
/// Requested names are joined onto the root, canonicalized, and rejected
/// unless the result is still below the canonical root. This covers `..`
/// segments, absolute names, and symlinks pointing elsewhere.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    root: PathBuf,
}

impl LocalFileSource {
    /// Create a source for `root`.
    ///
    /// The root must exist and be a directory; it is canonicalized once here.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, IoError> {
        let root = root.as_ref();
        let canonical = std::fs::canonicalize(root).map_err(|e| IoError::Read {
            path: root.display().to_string(),
            message: e.to_string(),
        })?;

        if !canonical.is_dir() {
            return Err(IoError::Read {
                path: canonical.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        Ok(Self { root: canonical })
    }

    /// The canonical serving root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `filename` to a canonical path inside the root.
    pub async fn resolve(&self, filename: &str) -> Result<PathBuf, IoError> {
        let not_found = || IoError::NotFound(filename.to_string());

        if filename.is_empty() {
            return Err(not_found());
        }

        // Cheap lexical rejection before touching the filesystem
        let relative = Path::new(filename);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            debug!(filename, "Rejected non-relative file name");
            return Err(not_found());
        }

        let candidate = self.root.join(relative);
        let canonical = match tokio::fs::canonicalize(&candidate).await {
            Ok(path) => path,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(IoError::Read {
                    path: candidate.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        if !canonical.starts_with(&self.root) {
            debug!(filename, "Resolved path escapes serving root");
            return Err(not_found());
        }

        match tokio::fs::metadata(&canonical).await {
            Ok(meta) if meta.is_file() => Ok(canonical),
            Ok(_) => Err(not_found()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(IoError::Read {
                path: canonical.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl FileSource for LocalFileSource {
    async fn read(&self, filename: &str) -> Result<Bytes, IoError> {
        let path = self.resolve(filename).await?;

        let data = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::NotFound(filename.to_string()),
            _ => IoError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        debug!(filename, bytes = data.len(), "Read file from disk");
        Ok(Bytes::from(data))
    }

    async fn list(&self) -> Result<Vec<String>, IoError> {
        let read_err = |e: std::io::Error| IoError::Read {
            path: self.root.display().to_string(),
            message: e.to_string(),
        };

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(read_err)?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
