use std::path::Path;

use anyhow::Context;
use tokio::fs;

use super::{LocationTable, module_name};
use crate::generator::{CleanupDirective, metrics::EmissionMessage};

/// Deletes stale generated output ahead of emission.
pub struct Eraser<'a> {
  locations: &'a LocationTable,
}

impl<'a> Eraser<'a> {
  pub fn new(locations: &'a LocationTable) -> Self {
    Self { locations }
  }

  /// Removes `start/end` and every `start/<feature>/end`, as a directory or a single module file.
  pub async fn erase(&self, directive: &CleanupDirective) -> anyhow::Result<Vec<EmissionMessage>> {
    let start = self.locations.directory_path(directive.kind, &directive.start)?;
    let end = module_name(&directive.end);
    let mut messages = vec![];

    if let Some(message) = remove(&start.join(&end), format!("{}::{}", directive.start, directive.end)).await? {
      messages.push(message);
    }

    if !fs::try_exists(&start).await? {
      return Ok(messages);
    }

    let mut features = vec![];
    let mut entries = fs::read_dir(&start)
      .await
      .with_context(|| format!("failed to list {}", start.display()))?;
    while let Some(entry) = entries.next_entry().await? {
      let name = entry.file_name();
      if entry.file_type().await?.is_dir()
        && let Some(feature) = name.to_str()
      {
        features.push(feature.to_string());
      }
    }
    features.sort();

    for feature in features {
      let namespace = format!("{}::{feature}::{}", directive.start, directive.end);
      if let Some(message) = remove(&start.join(&feature).join(&end), namespace).await? {
        messages.push(message);
      }
    }

    Ok(messages)
  }
}

async fn remove(path: &Path, namespace: String) -> anyhow::Result<Option<EmissionMessage>> {
  if fs::try_exists(path).await? && fs::metadata(path).await?.is_dir() {
    fs::remove_dir_all(path)
      .await
      .with_context(|| format!("failed to delete {}", path.display()))?;
    return Ok(Some(EmissionMessage::Erased { namespace }));
  }

  let file = path.with_extension("rs");
  if fs::try_exists(&file).await? {
    fs::remove_file(&file)
      .await
      .with_context(|| format!("failed to delete {}", file.display()))?;
    return Ok(Some(EmissionMessage::Erased { namespace }));
  }

  Ok(None)
}
