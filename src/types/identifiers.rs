use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// A concrete file produced by resolution.
///
/// Identity is the normalised path, so `libs/./a.jar` and `libs/b/../a.jar`
/// are the same file. Deserialised paths are normalised the same way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "PathBuf", into = "PathBuf")]
pub struct ResolvedFile(PathBuf);

#[derive(Debug, Error)]
pub enum ResolvedFileError {
    #[error("Cannot canonicalize {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolvedFile {
    /// Lexical normalisation only, the file system is not consulted.
    pub fn new(path: impl AsRef<Path>) -> Self {
        ResolvedFile(normalize_path(path.as_ref()))
    }

    /// Resolve symlinks and relative segments against the file system.
    pub fn canonicalize(path: impl AsRef<Path>) -> Result<Self, ResolvedFileError> {
        let path = path.as_ref();
        let canonical =
            std::fs::canonicalize(path).map_err(|source| ResolvedFileError::Canonicalize {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(ResolvedFile(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for ResolvedFile {
    fn from(path: PathBuf) -> Self {
        ResolvedFile(normalize_path(&path))
    }
}

impl From<ResolvedFile> for PathBuf {
    fn from(file: ResolvedFile) -> Self {
        file.0
    }
}

impl fmt::Display for ResolvedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // "/.." is "/"
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }

    normalized
}

/// Identifies one artifact of a resolved component, e.g.
/// `guava-28.0.jar (com.google.guava:guava:28.0)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactId {
    pub component: String,
    pub file_name: String,
}

impl ArtifactId {
    pub fn new(component: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            file_name: file_name.into(),
        }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file_name, self.component)
    }
}

/// Display label of the variant an artifact was selected from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantName(String);

impl VariantName {
    pub fn new(name: impl Into<String>) -> Self {
        VariantName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
