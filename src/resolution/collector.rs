use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resolution::artifact::ResolvableArtifact;
use crate::resolution::failure::{ArtifactResolveError, Failure};
use crate::resolution::sets::{FailureSet, ResolvedFileSet};
use crate::resolution::visitor::{ArtifactVisitor, CollectionKind};
use crate::types::{ArtifactId, ResolvedFile, VariantAttributes, VariantName};

/// Fixed for the lifetime of a collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Whether collections of scheduled (not yet executed) transform results
    /// are descended into at all.
    pub visit_scheduled_transforms: bool,
}

impl CollectorConfig {
    pub fn v0() -> Self {
        Self {
            visit_scheduled_transforms: true,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::v0()
    }
}

/// Collects the files and failures of one traversal.
///
/// A failing artifact is recorded and the traversal carries on, so the
/// result is always the full set of what could be resolved plus every
/// failure met along the way.
///
/// Single traversal, single owner. Engines visiting in parallel must hold a
/// lock around every visit call.
#[derive(Debug, Default)]
pub struct ResolvedFilesCollector {
    config: CollectorConfig,
    files: ResolvedFileSet,
    failures: FailureSet,
}

impl ResolvedFilesCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CollectorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> CollectorConfig {
        self.config
    }

    pub fn files(&self) -> &[ResolvedFile] {
        self.files.as_slice()
    }

    pub fn failures(&self) -> &[Failure] {
        self.failures.as_slice()
    }

    pub fn finish(self) -> ResolvedFiles {
        debug!(
            files = self.files.len(),
            failures = self.failures.len(),
            "collection finished"
        );
        ResolvedFiles {
            files: self.files.into_vec(),
            failures: self.failures.into_vec(),
        }
    }
}

impl ArtifactVisitor for ResolvedFilesCollector {
    fn start_collection(&self, kind: CollectionKind) -> bool {
        let visit = kind != CollectionKind::ScheduledTransformResult
            || self.config.visit_scheduled_transforms;
        if !visit {
            debug!(?kind, "not visiting scheduled transform results");
        }
        visit
    }

    fn requires_artifact_files(&self) -> bool {
        true
    }

    fn include_files(&self) -> bool {
        true
    }

    fn visit_artifact(
        &mut self,
        variant: &VariantName,
        _attributes: &VariantAttributes,
        artifact: &dyn ResolvableArtifact,
    ) {
        match artifact.file() {
            Ok(file) => {
                self.files.insert(file);
            }
            Err(failure) => {
                debug!(
                    artifact = %artifact.id(),
                    %variant,
                    error = %failure,
                    "artifact resolution failed, recording"
                );
                self.failures.insert(failure);
            }
        }
    }

    fn visit_file(
        &mut self,
        _artifact_id: &ArtifactId,
        _variant: &VariantName,
        _attributes: &VariantAttributes,
        file: &ResolvedFile,
    ) {
        self.files.insert(file.clone());
    }

    fn visit_failure(&mut self, failure: Failure) {
        self.failures.insert(failure);
    }
}

/// The finished, read-only outcome of a traversal.
#[derive(Debug, Clone)]
pub struct ResolvedFiles {
    files: Vec<ResolvedFile>,
    failures: Vec<Failure>,
}

impl ResolvedFiles {
    pub fn files(&self) -> &[ResolvedFile] {
        &self.files
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ResolvedFile>, Vec<Failure>) {
        (self.files, self.failures)
    }

    /// All files, or one error carrying every recorded failure.
    pub fn into_result(
        self,
        display_name: impl Into<String>,
    ) -> Result<Vec<ResolvedFile>, ArtifactResolveError> {
        if self.failures.is_empty() {
            Ok(self.files)
        } else {
            Err(ArtifactResolveError {
                display_name: display_name.into(),
                failures: self.failures,
            })
        }
    }
}
