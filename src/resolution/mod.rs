pub mod artifact;
pub mod collector;
pub mod failure;
pub mod sets;
pub mod visitor;

pub use artifact::{LazyArtifact, ResolvableArtifact, ResolvedArtifact};
pub use collector::{CollectorConfig, ResolvedFiles, ResolvedFilesCollector};
pub use failure::{ArtifactResolveError, Failure, ResolutionError};
pub use sets::{FailureSet, InsertionOrderedSet, ResolvedFileSet};
pub use visitor::{walk, ArtifactVisitor, CollectionKind, VisitEvent, WalkSummary};
