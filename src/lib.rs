//! Deterministic result collection and structural hashing for build caches.
//!
//! `resolution-core` provides the two contracts an incremental build leans
//! on: collecting the files of a dependency resolution into an ordered,
//! duplicate-free result that tolerates partial failure, and giving nested
//! build-state snapshots a structural identity whose hash is identical for
//! identical state across runs.

pub mod resolution;
pub mod snapshot;
pub mod types;
