//! Maps artifacts to files and executes clean-up directives.

mod eraser;
mod writer;

#[cfg(test)]
mod tests;

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

pub use eraser::Eraser;
pub use writer::FileEmitter;

use crate::generator::{
  GenerationError,
  ast::{Artifact, ArtifactKind, Namespace},
  naming::identifiers::{to_module_name, to_snake},
};

pub(crate) const MOD_FILE: &str = "mod.rs";

/// Where one artifact kind lives: the namespace prefix that maps onto `directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
  pub prefix: Namespace,
  pub directory: PathBuf,
}

/// Artifact kind to [`Location`] mapping; kinds without an override use the default location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTable {
  default: Location,
  overrides: BTreeMap<ArtifactKind, Location>,
}

impl LocationTable {
  pub fn new(prefix: Namespace, directory: impl Into<PathBuf>) -> Self {
    Self {
      default: Location {
        prefix,
        directory: directory.into(),
      },
      overrides: BTreeMap::new(),
    }
  }

  /// Sends `kind` to `directory`, keeping the default namespace prefix.
  #[must_use]
  pub fn with_directory(mut self, kind: ArtifactKind, directory: impl Into<PathBuf>) -> Self {
    self.overrides.insert(
      kind,
      Location {
        prefix: self.default.prefix.clone(),
        directory: directory.into(),
      },
    );
    self
  }

  #[must_use]
  pub fn location(&self, kind: ArtifactKind) -> &Location {
    self.overrides.get(&kind).unwrap_or(&self.default)
  }

  /// Directory of `namespace` for artifacts of `kind`.
  ///
  /// # Errors
  ///
  /// [`GenerationError::NamespaceUnresolvable`] when `namespace` is outside the kind's prefix.
  pub fn directory_path(&self, kind: ArtifactKind, namespace: &Namespace) -> Result<PathBuf, GenerationError> {
    let location = self.location(kind);
    let segments = namespace
      .strip_prefix(&location.prefix)
      .ok_or_else(|| GenerationError::NamespaceUnresolvable {
        name: namespace.to_string(),
      })?;

    Ok(
      segments
        .iter()
        .fold(location.directory.clone(), |path, segment| path.join(module_name(segment))),
    )
  }

  /// `<dir>/items/models/item_model.rs` for `api::Items::models::ItemModel`.
  ///
  /// # Errors
  ///
  /// [`GenerationError::NamespaceUnresolvable`] when the artifact is outside its kind's prefix.
  pub fn file_path(&self, artifact: &Artifact) -> Result<PathBuf, GenerationError> {
    let directory = self.directory_path(artifact.kind, &artifact.namespace)?;
    Ok(directory.join(format!("{}.rs", module_name(&artifact.name))))
  }

  /// Output root of `kind`; `mod.rs` files are written up to and including this directory.
  pub(crate) fn root_for(&self, kind: ArtifactKind) -> &Path {
    &self.location(kind).directory
  }
}

pub(crate) fn module_name(segment: &str) -> String {
  to_module_name(&to_snake(segment))
}
