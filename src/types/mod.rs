pub mod attributes;
pub mod identifiers;

pub use attributes::{AttributeValue, VariantAttributes};
pub use identifiers::{ArtifactId, ResolvedFile, ResolvedFileError, VariantName};
