use indexmap::IndexMap;

use super::{
  ast::{Artifact, QualifiedName},
  errors::{GenerationError, GenerationResult},
};

/// Insertion-ordered set of artifacts keyed by qualified name.
///
/// A qualified name maps to exactly one artifact for the collection's lifetime; the first
/// artifact placed under a name is never replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactCollection {
  artifacts: IndexMap<QualifiedName, Artifact>,
}

impl ArtifactCollection {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Strict insertion; a second artifact under the same name is a [`GenerationError::NameCollision`].
  pub fn add(&mut self, artifact: Artifact) -> GenerationResult<&mut Self> {
    let name = artifact.qualified_name();
    if self.artifacts.contains_key(&name) {
      return Err(GenerationError::NameCollision { name: name.to_string() });
    }
    self.artifacts.insert(name, artifact);
    Ok(self)
  }

  /// Inserts unless the name is taken; the first writer wins and later ones are dropped silently.
  pub fn add_if_absent(&mut self, artifact: Artifact) -> &mut Self {
    self.artifacts.entry(artifact.qualified_name()).or_insert(artifact);
    self
  }

  /// Unions `other` into `self` with [`Self::add_if_absent`] semantics, keeping `other`'s order for new names.
  pub fn merge_in(&mut self, other: ArtifactCollection) -> &mut Self {
    for (_, artifact) in other.artifacts {
      self.add_if_absent(artifact);
    }
    self
  }

  #[must_use]
  pub fn get(&self, name: &QualifiedName) -> Option<&Artifact> {
    self.artifacts.get(name)
  }

  #[must_use]
  pub fn contains(&self, name: &QualifiedName) -> bool {
    self.artifacts.contains_key(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.artifacts.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.artifacts.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
    self.artifacts.values()
  }
}

impl<'a> IntoIterator for &'a ArtifactCollection {
  type Item = &'a Artifact;
  type IntoIter = indexmap::map::Values<'a, QualifiedName, Artifact>;

  fn into_iter(self) -> Self::IntoIter {
    self.artifacts.values()
  }
}
