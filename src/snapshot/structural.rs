use std::hash::{Hash, Hasher as StdHasher};

use serde::{Deserialize, Serialize};

use crate::snapshot::hasher::{Hashable, Hasher};

/// The closed set of structural snapshot kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    Managed,
    ImmutableManaged,
}

impl SnapshotKind {
    pub(crate) fn hash_tag(self) -> u8 {
        match self {
            SnapshotKind::Managed => 0,
            SnapshotKind::ImmutableManaged => 1,
        }
    }
}

/// An immutable, ordered sequence of child snapshots.
///
/// Two snapshots are equal only if they have the same kind and element-wise
/// equal children in the same order. Both the std hash and the content hash
/// are derived from the children alone; the kind only takes part in
/// equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralSnapshot<T> {
    kind: SnapshotKind,
    state: Vec<T>,
}

impl<T> StructuralSnapshot<T> {
    pub fn new(kind: SnapshotKind, state: impl Into<Vec<T>>) -> Self {
        Self {
            kind,
            state: state.into(),
        }
    }

    pub fn kind(&self) -> SnapshotKind {
        self.kind
    }

    pub fn state(&self) -> &[T] {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl<T: PartialEq> PartialEq for StructuralSnapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        // Slice equality checks length first, then stops at the first
        // differing element.
        self.kind == other.kind && self.state == other.state
    }
}

impl<T: Eq> Eq for StructuralSnapshot<T> {}

impl<T: Hash> Hash for StructuralSnapshot<T> {
    fn hash<H: StdHasher>(&self, hasher: &mut H) {
        self.state.hash(hasher);
    }
}

impl<T: Hashable> Hashable for StructuralSnapshot<T> {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        for element in &self.state {
            element.append_to_hasher(hasher);
        }
    }
}
