use std::collections::BTreeMap;

use strum::Display;

use crate::generator::{ast::ArtifactKind, collection::ArtifactCollection};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub operations_processed: usize,
  pub artifacts_generated: usize,
  pub artifacts_by_kind: BTreeMap<ArtifactKind, usize>,
  pub files_written: usize,
  pub files_skipped: usize,
  pub namespaces_erased: usize,
}

impl GenerationStats {
  pub fn record_operations(&mut self, count: usize) {
    self.operations_processed += count;
  }

  pub fn record_artifacts(&mut self, collection: &ArtifactCollection) {
    for artifact in collection {
      self.artifacts_generated += 1;
      *self.artifacts_by_kind.entry(artifact.kind).or_default() += 1;
    }
  }

  pub fn record_message(&mut self, message: &EmissionMessage) {
    match message {
      EmissionMessage::Written { .. } => self.files_written += 1,
      EmissionMessage::AlreadyExists { .. } => self.files_skipped += 1,
      EmissionMessage::Erased { .. } => self.namespaces_erased += 1,
    }
  }

  pub fn record_messages<'a>(&mut self, messages: impl IntoIterator<Item = &'a EmissionMessage>) {
    for message in messages {
      self.record_message(message);
    }
  }

  #[must_use]
  pub fn count(&self, kind: ArtifactKind) -> usize {
    self.artifacts_by_kind.get(&kind).copied().unwrap_or_default()
  }
}

/// Outcome of writing or erasing one location, reported after emission.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EmissionMessage {
  #[strum(to_string = "File: '{path}' written")]
  Written { path: String },
  #[strum(to_string = "File: '{path}' already exists, skipping.")]
  AlreadyExists { path: String },
  #[strum(to_string = "{namespace} deleted")]
  Erased { namespace: String },
}

impl EmissionMessage {
  /// Informational messages are printed even without `--verbose`.
  #[must_use]
  pub fn is_informational(&self) -> bool {
    !matches!(self, Self::Written { .. })
  }
}
