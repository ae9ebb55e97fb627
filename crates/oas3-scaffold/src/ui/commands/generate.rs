use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
  emitter::{Eraser, FileEmitter, LocationTable},
  generator::{
    CodegenConfig,
    ast::ArtifactKind,
    collection::ArtifactCollection,
    metrics::{EmissionMessage, GenerationStats},
    orchestrator::Orchestrator,
  },
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub root: String,
  pub fixtures: bool,
  pub locations: Vec<(ArtifactKind, PathBuf)>,
  pub dry_run: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      root,
      fixtures,
      location,
      dry_run,
      verbose,
      quiet,
    } = command;

    if root.trim().is_empty() {
      anyhow::bail!("Namespace root (--root) must not be empty");
    }

    Ok(Self {
      input,
      output,
      root,
      fixtures,
      locations: parse_locations(&location)?,
      dry_run,
      verbose,
      quiet,
    })
  }

  fn codegen_config(&self) -> CodegenConfig {
    CodegenConfig::builder()
      .root(self.root.clone())
      .fixtures(self.fixtures)
      .build()
  }

  fn location_table(&self, config: &CodegenConfig) -> LocationTable {
    self
      .locations
      .iter()
      .fold(LocationTable::new(config.root_namespace(), &self.output), |table, (kind, dir)| {
        table.with_directory(*kind, dir)
      })
  }
}

fn parse_locations(entries: &[String]) -> anyhow::Result<Vec<(ArtifactKind, PathBuf)>> {
  entries
    .iter()
    .map(|entry| {
      let (name, dir) = entry.split_once('=').ok_or_else(|| {
        anyhow::anyhow!("Invalid location format '{entry}': expected KIND=DIR (e.g., fixture=tests/fixtures)")
      })?;
      let kind = name.trim().parse::<ArtifactKind>().map_err(|_| {
        anyhow::anyhow!(
          "Unknown artifact kind '{name}' in '{entry}', expected one of: {}",
          ArtifactKind::iter().join(", ")
        )
      })?;
      if dir.is_empty() {
        anyhow::bail!("Invalid location format '{entry}': directory is empty");
      }
      Ok((kind, PathBuf::from(dir)))
    })
    .collect()
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI contract from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating artifacts...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Operations processed:", stats.operations_processed.to_string());
    self.stat("Artifacts generated:", stats.artifacts_generated.to_string());
    for (kind, count) in &stats.artifacts_by_kind {
      self.stat("", format!("{count} {kind}"));
    }
  }

  fn print_artifacts(&self, artifacts: &ArtifactCollection, locations: &LocationTable) {
    if !self.config.verbose || self.config.quiet {
      return;
    }

    for artifact in artifacts {
      let target = locations
        .file_path(artifact)
        .map_or_else(|error| error.to_string(), |path| path.display().to_string());
      println!(
        "              {} {}",
        artifact.qualified_name().to_string().with(self.colors.info()),
        format!("-> {target}").with(self.colors.muted())
      );
    }
  }

  fn log_erasing(&self) {
    self.info(
      &format!("Erasing stale output under: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_file_stats(&self, stats: &GenerationStats) {
    self.stat("Files written:", stats.files_written.to_string());
    if stats.files_skipped > 0 {
      self.stat("Files skipped:", stats.files_skipped.to_string());
    }
    if stats.namespaces_erased > 0 {
      self.stat("Namespaces erased:", stats.namespaces_erased.to_string());
    }
  }

  /// Informational messages are always shown, written files only with `--verbose`.
  fn print_messages(&self, messages: &[EmissionMessage]) {
    if self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for message in messages {
      if !message.is_informational() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let color = if message.is_informational() {
        self.colors.muted()
      } else {
        self.colors.success()
      };
      println!("{}", message.to_string().with(color));
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      let message = if self.config.dry_run {
        "Dry run complete, nothing was written"
      } else {
        "Successfully generated scaffolding"
      };
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let contract = SpecLoader::open(&config.input).await?.parse()?;

  logger.log_generating();
  let orchestrator = Orchestrator::new(contract, config.codegen_config());
  let mut output = orchestrator.generate()?;
  let locations = config.location_table(orchestrator.config());
  let metadata = orchestrator.metadata(&config.input.display().to_string());

  logger.print_statistics(&output.stats);
  logger.print_artifacts(&output.artifacts, &locations);

  if config.dry_run {
    logger.log_success();
    return Ok(());
  }

  logger.log_erasing();
  let eraser = Eraser::new(&locations);
  let mut messages = vec![];
  for directive in &output.cleanup {
    messages.extend(eraser.erase(directive).await?);
  }

  logger.log_writing();
  messages.extend(FileEmitter::new(&locations, &metadata).emit(&output.artifacts).await?);

  output.stats.record_messages(&messages);
  logger.print_file_stats(&output.stats);
  logger.print_messages(&messages);
  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::{generator::ast::Namespace, tests::common::items_document, ui::colors::Theme};

  use super::*;

  fn command(input: PathBuf, output: PathBuf) -> GenerateCommand {
    GenerateCommand {
      input,
      output,
      root: "api".to_string(),
      fixtures: false,
      location: vec![],
      dry_run: false,
      verbose: false,
      quiet: true,
    }
  }

  #[test]
  fn test_parse_locations_empty() -> anyhow::Result<()> {
    assert!(parse_locations(&[])?.is_empty());
    Ok(())
  }

  #[test]
  fn test_parse_locations_kebab_case_kinds() -> anyhow::Result<()> {
    let locations = parse_locations(&["fixture=tests/fixtures".to_string(), "input-model=src/inputs".to_string()])?;
    assert_eq!(
      locations,
      [
        (ArtifactKind::Fixture, PathBuf::from("tests/fixtures")),
        (ArtifactKind::InputModel, PathBuf::from("src/inputs")),
      ]
    );
    Ok(())
  }

  #[test]
  fn test_parse_locations_keeps_equals_in_directory() -> anyhow::Result<()> {
    let locations = parse_locations(&["model=out/a=b".to_string()])?;
    assert_eq!(locations, [(ArtifactKind::Model, PathBuf::from("out/a=b"))]);
    Ok(())
  }

  #[test]
  fn test_parse_locations_rejects_missing_equals() {
    let err = parse_locations(&["fixture".to_string()]).unwrap_err();
    assert!(err.to_string().contains("Invalid location format"));
  }

  #[test]
  fn test_parse_locations_rejects_unknown_kind() {
    let err = parse_locations(&["widget=out".to_string()]).unwrap_err();
    assert!(err.to_string().contains("Unknown artifact kind 'widget'"));
    assert!(err.to_string().contains("input-model"));
  }

  #[test]
  fn test_from_command_rejects_empty_root() {
    let mut command = command(PathBuf::from("api.json"), PathBuf::from("out"));
    command.root = "  ".to_string();
    assert!(GenerateConfig::from_command(command).is_err());
  }

  #[test]
  fn test_location_table_applies_overrides() -> anyhow::Result<()> {
    let mut command = command(PathBuf::from("api.json"), PathBuf::from("out"));
    command.location = vec!["fixture=tests/fixtures".to_string()];
    let config = GenerateConfig::from_command(command)?;
    let table = config.location_table(&config.codegen_config());

    assert_eq!(table.location(ArtifactKind::Fixture).directory, PathBuf::from("tests/fixtures"));
    assert_eq!(table.location(ArtifactKind::Model).directory, PathBuf::from("out"));
    assert_eq!(table.location(ArtifactKind::Model).prefix, Namespace::parse("api"));
    Ok(())
  }

  #[tokio::test]
  async fn test_generate_writes_scaffolding() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("openapi.json");
    let output = dir.path().join("api");
    tokio::fs::write(&input, items_document().to_string()).await?;

    let config = GenerateConfig::from_command(command(input, output.clone()))?;
    generate_code(config, &Colors::new(false, Theme::Dark)).await?;

    assert!(output.join("mod.rs").exists());
    assert!(output.join("items/models/items_model.rs").exists());
    assert!(output.join("items/factories/items_model_factory.rs").exists());
    assert!(output.join("items/requests/list_items_request.rs").exists());
    assert!(output.join("items/queries/list_items_query.rs").exists());
    assert!(output.join("items/responses/list_items_response.rs").exists());
    Ok(())
  }

  #[tokio::test]
  async fn test_dry_run_writes_nothing() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("openapi.json");
    let output = dir.path().join("api");
    tokio::fs::write(&input, items_document().to_string()).await?;

    let mut command = command(input, output.clone());
    command.dry_run = true;
    generate_code(GenerateConfig::from_command(command)?, &Colors::new(false, Theme::Dark)).await?;

    assert!(!output.exists());
    Ok(())
  }
}
