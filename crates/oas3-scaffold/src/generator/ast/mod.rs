mod artifact;
mod names;
mod types;

#[cfg(test)]
mod tests;

pub use artifact::{Annotation, Artifact, ArtifactKind, BaseType, GetterPolicy, MethodDef, PropertyDef, Visibility};
pub use names::{Namespace, QualifiedName};
pub use types::{DefaultValue, ElementType, PropertyType, ScalarKind, TypeReference};
