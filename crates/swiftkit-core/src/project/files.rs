//! Scoped file writes relative to the project root

use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Writes files under a fixed project root.
///
/// All paths are project-relative; absolute paths and `..` components are
/// rejected so nothing lands outside the root.
#[derive(Debug, Clone)]
pub struct ProjectFiles {
    root: PathBuf,
}

impl ProjectFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path against the root
    pub fn resolve(&self, relative_path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(relative_path).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::UnsafePath {
                        path: relative_path.to_string(),
                    });
                }
            }
        }
        Ok(resolved)
    }

    /// Normalize a user-supplied path to the `/`-separated project-relative form.
    ///
    /// Absolute paths are accepted when they point inside the root. The root
    /// itself normalizes to an empty string.
    pub fn relativize(&self, path: &str) -> Result<String> {
        let unsafe_path = || Error::UnsafePath {
            path: path.to_string(),
        };

        let candidate = Path::new(path);
        let relative = if candidate.is_absolute() {
            candidate
                .strip_prefix(&self.root)
                .map_err(|_| unsafe_path())?
        } else {
            candidate
        };

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str().ok_or_else(unsafe_path)?),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(unsafe_path());
                }
            }
        }
        Ok(parts.join("/"))
    }

    /// Write `content` to `relative_path`, replacing any existing file.
    ///
    /// The content goes to a sibling temporary file first and is renamed over
    /// the target, so a failed write never leaves a truncated file behind.
    pub async fn write(&self, content: &str, relative_path: &str) -> Result<PathBuf> {
        let target = self.resolve(relative_path)?;
        let (parent, file_name) = match (target.parent(), target.file_name()) {
            (Some(parent), Some(name)) if target != self.root => (parent, name),
            _ => {
                return Err(Error::UnsafePath {
                    path: relative_path.to_string(),
                })
            }
        };

        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;

        let temp_path = parent.join(format!(
            ".{}.{}.tmp",
            file_name.to_string_lossy(),
            std::process::id()
        ));

        if let Err(e) = fs::write(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(Error::io(&temp_path, e));
        }
        if let Err(e) = fs::rename(&temp_path, &target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(Error::io(&target, e));
        }

        Ok(target)
    }

    pub async fn exists(&self, relative_path: &str) -> Result<bool> {
        let path = self.resolve(relative_path)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| Error::io(&path, e))
    }

    /// Create the directory and its parents; no-op if it already exists
    pub async fn ensure_directory(&self, relative_path: &str) -> Result<PathBuf> {
        let path = self.resolve(relative_path)?;
        fs::create_dir_all(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Recursively remove a directory. Returns false if it did not exist.
    pub async fn remove_directory(&self, relative_path: &str) -> Result<bool> {
        let path = self.resolve(relative_path)?;
        if path == self.root {
            return Err(Error::UnsafePath {
                path: relative_path.to_string(),
            });
        }
        match fs::remove_dir_all(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io(&path, e)),
        }
    }

    /// Remove a single file. Returns false if it did not exist.
    pub async fn remove_file(&self, relative_path: &str) -> Result<bool> {
        let path = self.resolve(relative_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::io(&path, e)),
        }
    }
}
