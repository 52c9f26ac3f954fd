pub mod hasher;
pub mod structural;
pub mod value;

pub use hasher::{HashCode, Hashable, Hasher};
pub use structural::{SnapshotKind, StructuralSnapshot};
pub use value::{ManagedValueSnapshot, SnapshotError, ValueSnapshot};
