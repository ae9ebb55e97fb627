//! Drives the per-operation generators over a loaded contract.
//!
//! The orchestrator is pure: it turns a [`Contract`] into an [`ArtifactCollection`] plus the
//! clean-up directives the emitter has to execute. File-system work is left to the caller.
//!
//! ```ignore
//! use crate::generator::{CodegenConfig, orchestrator::Orchestrator};
//!
//! # fn example(contract: crate::contract::Contract) -> anyhow::Result<()> {
//! let config = CodegenConfig::builder().fixtures(true).build();
//! let output = Orchestrator::new(contract, config).generate()?;
//! println!("{} artifacts", output.stats.artifacts_generated);
//! # Ok(())
//! # }
//! ```

use super::{
  CleanupDirective, CodegenConfig, OperationGenerator, codegen::CodeMetadata, collection::ArtifactCollection,
  errors::GenerationResult, metrics::GenerationStats,
};
use crate::contract::Contract;

pub struct Orchestrator {
  contract: Contract,
  config: CodegenConfig,
}

/// Everything one generation run produces.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
  pub artifacts: ArtifactCollection,
  pub cleanup: Vec<CleanupDirective>,
  pub stats: GenerationStats,
}

impl Orchestrator {
  #[must_use]
  pub fn new(contract: Contract, config: CodegenConfig) -> Self {
    Self { contract, config }
  }

  #[must_use]
  pub fn config(&self) -> &CodegenConfig {
    &self.config
  }

  #[must_use]
  pub fn contract(&self) -> &Contract {
    &self.contract
  }

  /// Header metadata for files rendered from this contract.
  #[must_use]
  pub fn metadata(&self, source: &str) -> CodeMetadata {
    CodeMetadata {
      title: self.contract.title.clone(),
      version: self.contract.version.clone(),
      source: source.to_string(),
    }
  }

  /// Runs every enabled generator over every operation, generator by generator, and merges the
  /// results with first-writer-wins semantics.
  ///
  /// # Errors
  ///
  /// The first fatal condition aborts the whole run.
  pub fn generate(&self) -> GenerationResult<GenerationOutput> {
    let generators = OperationGenerator::all(&self.config);
    let mut artifacts = ArtifactCollection::new();
    let mut stats = GenerationStats::default();

    for generator in &generators {
      for operation in &self.contract.operations {
        artifacts.merge_in(generator.generate(operation)?);
      }
    }

    stats.record_operations(self.contract.operations.len());
    stats.record_artifacts(&artifacts);

    let cleanup = generators
      .iter()
      .flat_map(OperationGenerator::cleanup_directives)
      .collect();

    Ok(GenerationOutput {
      artifacts,
      cleanup,
      stats,
    })
  }
}
