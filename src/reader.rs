//! src/reader.rs
use std::path::{Component, Path, PathBuf};

use crate::configuration::ReaderSettings;

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("No file exists at {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Permission denied while reading {}", .path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read {}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Only produced when containment is enforced.
    #[error("`{name}` resolves outside of the base directory")]
    OutsideBase { name: String },
}

impl ReadError {
    fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ReadError::NotFound { path, source },
            std::io::ErrorKind::PermissionDenied => ReadError::AccessDenied { path, source },
            // Directories land here too (EISDIR on read).
            _ => ReadError::IoFailure { path, source },
        }
    }
}

/// Serves the text of files found under the importer's build output.
///
/// Shared read-only between workers; every call is a single independent read.
#[derive(Debug, Clone)]
pub struct FileContentReader {
    base_directory: PathBuf,
    enforce_containment: bool,
}

impl FileContentReader {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: normalize(&base_directory.into(), ""),
            enforce_containment: false,
        }
    }

    pub fn from_settings(settings: &ReaderSettings) -> Self {
        Self::new(settings.base_directory.clone()).with_containment(settings.enforce_containment)
    }

    /// Reject names whose resolved path leaves the base directory.
    pub fn with_containment(mut self, enforce: bool) -> Self {
        self.enforce_containment = enforce;
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Join `name` onto the base directory without touching the disk.
    ///
    /// `.` segments are dropped and `..` removes the previous segment, so the
    /// result can point above the base unless containment is enforced. A
    /// leading separator in `name` is joined like any other segment rather
    /// than replacing the base.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ReadError> {
        let resolved = normalize(&self.base_directory, name);
        if self.enforce_containment && !resolved.starts_with(&self.base_directory) {
            return Err(ReadError::OutsideBase {
                name: name.to_owned(),
            });
        }
        Ok(resolved)
    }

    /// Read the whole file at `name` and return it as text.
    ///
    /// Either the full content comes back or an error does; there is no
    /// partial result. Invalid UTF-8 sequences are replaced with U+FFFD.
    #[tracing::instrument(
        name = "Read file content",
        skip(self),
        fields(path = tracing::field::Empty)
    )]
    pub async fn read_file_content(&self, name: &str) -> Result<String, ReadError> {
        // Bails out before any I/O when containment rejects the name.
        let path = self.resolve(name)?;
        tracing::Span::current().record("path", tracing::field::display(path.display()));

        // Whole file in one go, the worker thread is free while we wait.
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) => return Err(ReadError::from_io(path, source)),
        };
        Ok(decode(bytes))
    }
}

fn decode(bytes: Vec<u8>) -> String {
    // Valid UTF-8 reuses the buffer, only bad bytes pay for a copy.
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Lexical join of `name` onto `base`, collapsing `.` and `..`.
fn normalize(base: &Path, name: &str) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in base.components() {
        push_component(&mut resolved, component, true);
    }
    for component in Path::new(name).components() {
        push_component(&mut resolved, component, false);
    }
    resolved
}

fn push_component(resolved: &mut PathBuf, component: Component<'_>, anchors_allowed: bool) {
    match component {
        Component::Prefix(_) | Component::RootDir => {
            if anchors_allowed {
                resolved.push(component.as_os_str());
            }
        }
        Component::CurDir => {}
        Component::ParentDir => match resolved.components().next_back() {
            Some(Component::Normal(_)) => {
                resolved.pop();
            }
            // Nothing above the root.
            Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
            _ => resolved.push(".."),
        },
        Component::Normal(segment) => resolved.push(segment),
    }
}
