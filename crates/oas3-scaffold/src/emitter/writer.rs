use std::{
  collections::BTreeSet,
  path::{Path, PathBuf},
};

use anyhow::Context;
use tokio::fs;

use super::{LocationTable, MOD_FILE};
use crate::generator::{
  codegen::{self, CodeMetadata},
  collection::ArtifactCollection,
  metrics::EmissionMessage,
  naming::identifiers::to_module_name,
};

/// Writes rendered artifacts to their locations. Existing files are never overwritten.
pub struct FileEmitter<'a> {
  locations: &'a LocationTable,
  metadata: &'a CodeMetadata,
}

impl<'a> FileEmitter<'a> {
  pub fn new(locations: &'a LocationTable, metadata: &'a CodeMetadata) -> Self {
    Self { locations, metadata }
  }

  /// Writes every artifact whose file does not exist yet, then refreshes the `mod.rs` of each
  /// directory between the written files and their output root.
  pub async fn emit(&self, artifacts: &ArtifactCollection) -> anyhow::Result<Vec<EmissionMessage>> {
    let mut messages = vec![];
    let mut module_dirs = BTreeSet::new();

    for artifact in artifacts {
      let path = self.locations.file_path(artifact)?;
      collect_module_dirs(&path, self.locations.root_for(artifact.kind), &mut module_dirs);

      if fs::try_exists(&path)
        .await
        .with_context(|| format!("failed to check {}", path.display()))?
      {
        messages.push(EmissionMessage::AlreadyExists {
          path: path.display().to_string(),
        });
        continue;
      }

      let source = codegen::render(artifact, self.metadata)
        .with_context(|| format!("failed to render {}", artifact.qualified_name()))?;
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
          .await
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      fs::write(&path, source)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

      messages.push(EmissionMessage::Written {
        path: path.display().to_string(),
      });
    }

    for dir in &module_dirs {
      self.write_mod_file(dir).await?;
    }

    Ok(messages)
  }

  /// Declares every sub-directory and `.rs` file of `dir` whose name is a module name, sorted by
  /// name. Entries such as `.git` or `my-notes` are left alone.
  async fn write_mod_file(&self, dir: &Path) -> anyhow::Result<()> {
    let mut modules = BTreeSet::new();
    let mut entries = fs::read_dir(dir)
      .await
      .with_context(|| format!("failed to list {}", dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if entry.file_type().await?.is_dir() {
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
          modules.insert(name.to_string());
        }
      } else if path.extension().is_some_and(|extension| extension == "rs")
        && path.file_name().is_some_and(|name| name != MOD_FILE)
        && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
      {
        modules.insert(stem.to_string());
      }
    }

    let modules = modules.into_iter().filter(|name| is_module_name(name)).collect::<Vec<_>>();
    let source = codegen::render_mod_file(&modules, self.metadata)?;
    let path = dir.join(MOD_FILE);
    fs::write(&path, source)
      .await
      .with_context(|| format!("failed to write {}", path.display()))
  }
}

fn is_module_name(name: &str) -> bool {
  to_module_name(name) == name
}

/// Every directory from `file`'s parent up to `root`, inclusive.
fn collect_module_dirs(file: &Path, root: &Path, dirs: &mut BTreeSet<PathBuf>) {
  let mut current = file.parent();
  while let Some(dir) = current.filter(|dir| dir.starts_with(root)) {
    dirs.insert(dir.to_path_buf());
    current = dir.parent();
  }
}
