use std::fmt;
use std::sync::OnceLock;

use crate::resolution::failure::{Failure, ResolutionError};
use crate::types::{ArtifactId, ResolvedFile};

pub trait ResolvableArtifact {
    fn id(&self) -> &ArtifactId;

    /// Reduce the artifact to a concrete file.
    ///
    /// May trigger a download or a transform on first access. A failed
    /// resolution hands back the same `Failure` on every later call.
    fn file(&self) -> Result<ResolvedFile, Failure>;
}

/// An artifact whose file is already known.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    id: ArtifactId,
    file: ResolvedFile,
}

impl ResolvedArtifact {
    pub fn new(id: ArtifactId, file: ResolvedFile) -> Self {
        Self { id, file }
    }
}

impl ResolvableArtifact for ResolvedArtifact {
    fn id(&self) -> &ArtifactId {
        &self.id
    }

    fn file(&self) -> Result<ResolvedFile, Failure> {
        Ok(self.file.clone())
    }
}

/// An artifact resolved by a closure, at most once.
pub struct LazyArtifact<F> {
    id: ArtifactId,
    resolver: F,
    outcome: OnceLock<Result<ResolvedFile, Failure>>,
}

impl<F> LazyArtifact<F>
where
    F: Fn(&ArtifactId) -> Result<ResolvedFile, ResolutionError>,
{
    pub fn new(id: ArtifactId, resolver: F) -> Self {
        Self {
            id,
            resolver,
            outcome: OnceLock::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.get().is_some()
    }
}

impl<F> ResolvableArtifact for LazyArtifact<F>
where
    F: Fn(&ArtifactId) -> Result<ResolvedFile, ResolutionError>,
{
    fn id(&self) -> &ArtifactId {
        &self.id
    }

    fn file(&self) -> Result<ResolvedFile, Failure> {
        self.outcome
            .get_or_init(|| (self.resolver)(&self.id).map_err(Failure::new))
            .clone()
    }
}

impl<F> fmt::Debug for LazyArtifact<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArtifact")
            .field("id", &self.id)
            .field("outcome", &self.outcome.get())
            .finish_non_exhaustive()
    }
}
