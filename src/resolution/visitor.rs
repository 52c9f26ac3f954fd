use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::resolution::artifact::ResolvableArtifact;
use crate::resolution::failure::Failure;
use crate::types::{ArtifactId, ResolvedFile, VariantAttributes, VariantName};

/// Kind of sub-collection the traversal is about to enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Direct,
    /// Files that only exist once a scheduled transform has run.
    ScheduledTransformResult,
}

/// Receives the results of one traversal.
pub trait ArtifactVisitor {
    /// Whether the traversal should descend into a collection of this kind.
    fn start_collection(&self, kind: CollectionKind) -> bool;

    /// Whether artifacts must be reduced to files. Queried once, before the walk.
    fn requires_artifact_files(&self) -> bool;

    /// Whether already-resolved files are wanted. Queried once, before the walk.
    fn include_files(&self) -> bool;

    fn visit_artifact(
        &mut self,
        variant: &VariantName,
        attributes: &VariantAttributes,
        artifact: &dyn ResolvableArtifact,
    );

    fn visit_file(
        &mut self,
        artifact_id: &ArtifactId,
        variant: &VariantName,
        attributes: &VariantAttributes,
        file: &ResolvedFile,
    );

    fn visit_failure(&mut self, failure: Failure);
}

/// One step of a traversal as emitted by a resolution engine.
pub enum VisitEvent {
    EnterCollection(CollectionKind),
    ExitCollection,
    Artifact {
        variant: VariantName,
        attributes: VariantAttributes,
        artifact: Arc<dyn ResolvableArtifact>,
    },
    File {
        artifact_id: ArtifactId,
        variant: VariantName,
        attributes: VariantAttributes,
        file: ResolvedFile,
    },
    Failure(Failure),
}

impl VisitEvent {
    pub fn artifact(
        variant: VariantName,
        attributes: VariantAttributes,
        artifact: impl ResolvableArtifact + 'static,
    ) -> Self {
        VisitEvent::Artifact {
            variant,
            attributes,
            artifact: Arc::new(artifact),
        }
    }

    pub fn file(
        artifact_id: ArtifactId,
        variant: VariantName,
        attributes: VariantAttributes,
        file: ResolvedFile,
    ) -> Self {
        VisitEvent::File {
            artifact_id,
            variant,
            attributes,
            file,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub visited: usize,
    pub skipped: usize,
}

/// Replay `events` against `visitor`.
///
/// Everything between an `EnterCollection` the visitor declined and its
/// matching `ExitCollection` is skipped, nested collections included.
pub fn walk<V, I>(visitor: &mut V, events: I) -> WalkSummary
where
    V: ArtifactVisitor + ?Sized,
    I: IntoIterator<Item = VisitEvent>,
{
    let wants_artifacts = visitor.requires_artifact_files();
    let wants_files = visitor.include_files();

    // One entry per open collection: whether its contents are visited.
    let mut open: Vec<bool> = Vec::new();
    let mut summary = WalkSummary::default();

    for event in events {
        let descending = open.last().copied().unwrap_or(true);

        match event {
            VisitEvent::EnterCollection(kind) => {
                let enter = descending && visitor.start_collection(kind);
                if !enter {
                    trace!(?kind, "skipping collection");
                }
                open.push(enter);
            }
            VisitEvent::ExitCollection => {
                if open.pop().is_none() {
                    warn!("collection exit without a matching enter");
                }
            }
            _ if !descending => summary.skipped += 1,
            VisitEvent::Artifact {
                variant,
                attributes,
                artifact,
            } => {
                if wants_artifacts {
                    visitor.visit_artifact(&variant, &attributes, &*artifact);
                    summary.visited += 1;
                } else {
                    summary.skipped += 1;
                }
            }
            VisitEvent::File {
                artifact_id,
                variant,
                attributes,
                file,
            } => {
                if wants_files {
                    visitor.visit_file(&artifact_id, &variant, &attributes, &file);
                    summary.visited += 1;
                } else {
                    summary.skipped += 1;
                }
            }
            VisitEvent::Failure(failure) => {
                visitor.visit_failure(failure);
                summary.visited += 1;
            }
        }
    }

    if !open.is_empty() {
        warn!(unclosed = open.len(), "traversal ended inside a collection");
    }

    summary
}
