use tempfile::TempDir;

use crate::{
  emitter::{FileEmitter, LocationTable},
  generator::{
    CodegenConfig,
    ast::Namespace,
    codegen::CodeMetadata,
    metrics::EmissionMessage,
    orchestrator::Orchestrator,
  },
  tests::common::items_contract,
};

fn metadata() -> CodeMetadata {
  CodeMetadata {
    title: "Test API".to_string(),
    version: "1.0.0".to_string(),
    source: "openapi.json".to_string(),
  }
}

#[tokio::test]
async fn test_emit_writes_files_and_mod_files() -> anyhow::Result<()> {
  let dir = TempDir::new()?;
  let output = Orchestrator::new(items_contract(), CodegenConfig::builder().build()).generate()?;
  let table = LocationTable::new(Namespace::parse("api"), dir.path());

  let metadata = metadata();
  let messages = FileEmitter::new(&table, &metadata).emit(&output.artifacts).await?;

  assert_eq!(messages.len(), 5);
  assert!(messages.iter().all(|message| matches!(message, EmissionMessage::Written { .. })));

  let model = dir.path().join("items/models/items_model.rs");
  let source = tokio::fs::read_to_string(&model).await?;
  assert!(source.contains("pub struct ItemsModel"));

  let root_mod = tokio::fs::read_to_string(dir.path().join("mod.rs")).await?;
  assert!(root_mod.contains("pub mod items;"));

  let feature_mod = tokio::fs::read_to_string(dir.path().join("items/mod.rs")).await?;
  for module in ["factories", "models", "queries", "requests", "responses"] {
    assert!(feature_mod.contains(&format!("pub mod {module};")), "missing {module}");
  }

  let models_mod = tokio::fs::read_to_string(dir.path().join("items/models/mod.rs")).await?;
  assert!(models_mod.contains("pub mod items_model;"));
  assert!(!models_mod.contains("pub mod mod;"));
  Ok(())
}

#[tokio::test]
async fn test_existing_files_are_skipped() -> anyhow::Result<()> {
  let dir = TempDir::new()?;
  let output = Orchestrator::new(items_contract(), CodegenConfig::builder().build()).generate()?;
  let table = LocationTable::new(Namespace::parse("api"), dir.path());
  let metadata = metadata();

  let factory = dir.path().join("items/factories/items_model_factory.rs");
  tokio::fs::create_dir_all(factory.parent().expect("parent")).await?;
  tokio::fs::write(&factory, "// hand edited\n").await?;

  let messages = FileEmitter::new(&table, &metadata).emit(&output.artifacts).await?;

  assert!(messages.contains(&EmissionMessage::AlreadyExists {
    path: factory.display().to_string()
  }));
  assert_eq!(tokio::fs::read_to_string(&factory).await?, "// hand edited\n");
  Ok(())
}

#[tokio::test]
async fn test_mod_file_ignores_entries_that_are_not_modules() -> anyhow::Result<()> {
  let dir = TempDir::new()?;
  let output = Orchestrator::new(items_contract(), CodegenConfig::builder().build()).generate()?;
  let table = LocationTable::new(Namespace::parse("api"), dir.path());
  let metadata = metadata();

  tokio::fs::create_dir_all(dir.path().join(".git")).await?;
  tokio::fs::create_dir_all(dir.path().join("my-notes")).await?;
  tokio::fs::write(dir.path().join("items-backup.rs"), "").await?;
  tokio::fs::create_dir_all(dir.path().join("legacy")).await?;

  FileEmitter::new(&table, &metadata).emit(&output.artifacts).await?;

  let root_mod = tokio::fs::read_to_string(dir.path().join("mod.rs")).await?;
  assert!(root_mod.contains("pub mod items;"));
  assert!(root_mod.contains("pub mod legacy;"));
  assert!(!root_mod.contains("git"));
  assert!(!root_mod.contains("notes"));
  assert!(!root_mod.contains("backup"));
  Ok(())
}
