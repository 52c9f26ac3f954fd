use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;

use crate::types::{ArtifactId, ResolvedFileError};

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Could not find {artifact}")]
    NotFound { artifact: ArtifactId },
    #[error("Could not download {artifact}: {message}")]
    Download { artifact: ArtifactId, message: String },
    #[error("Execution failed for transform {transform} on {artifact}: {message}")]
    TransformFailed {
        transform: String,
        artifact: ArtifactId,
        message: String,
    },
    #[error(transparent)]
    File(#[from] ResolvedFileError),
    #[error("{0}")]
    Other(String),
}

/// A recorded resolution failure.
///
/// Identity is the allocation, not the message: two failures with identical
/// text are distinct unless one is a clone of the other.
#[derive(Debug, Clone)]
pub struct Failure(Arc<ResolutionError>);

impl Failure {
    pub fn new(error: ResolutionError) -> Self {
        Failure(Arc::new(error))
    }

    pub fn error(&self) -> &ResolutionError {
        &self.0
    }

    pub fn same(a: &Failure, b: &Failure) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl From<ResolutionError> for Failure {
    fn from(error: ResolutionError) -> Self {
        Failure::new(error)
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        Failure::same(self, other)
    }
}

impl Eq for Failure {}

impl Hash for Failure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

/// Raised by a caller that refuses a partial result.
///
/// Causes are kept in the order they were recorded so diagnostics are
/// reproducible.
#[derive(Debug, Error)]
#[error("Could not resolve all files for {display_name}: {} failure(s)", .failures.len())]
pub struct ArtifactResolveError {
    pub display_name: String,
    pub failures: Vec<Failure>,
}

impl ArtifactResolveError {
    pub fn causes(&self) -> impl Iterator<Item = &ResolutionError> {
        self.failures.iter().map(Failure::error)
    }

    /// One line for the summary, then one numbered line per cause.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        for (i, cause) in self.causes().enumerate() {
            out.push_str(&format!("\n  {}. {}", i + 1, cause));
        }
        out
    }
}
