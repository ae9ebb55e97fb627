pub(crate) mod ast;
pub(crate) mod codegen;
pub(crate) mod collection;
pub(crate) mod errors;
pub(crate) mod fixtures;
pub(crate) mod flatten;
pub(crate) mod metrics;
pub(crate) mod models;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod requests;
pub(crate) mod responses;
pub(crate) mod structure;
pub(crate) mod type_resolver;

#[cfg(test)]
mod tests;

use ast::{ArtifactKind, Namespace};
use collection::ArtifactCollection;
pub use errors::GenerationError;
use errors::GenerationResult;
use fixtures::FixtureGenerator;
use naming::identifiers::to_type_name;
use requests::RequestGenerator;
use responses::ResponseGenerator;

use crate::contract::Operation;

/// Namespace segment names, one per artifact family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSegments {
  pub models: String,
  pub factories: String,
  pub requests: String,
  pub queries: String,
  pub responses: String,
  pub fixtures: String,
}

impl Default for NamespaceSegments {
  fn default() -> Self {
    Self {
      models: "models".to_string(),
      factories: "factories".to_string(),
      requests: "requests".to_string(),
      queries: "queries".to_string(),
      responses: "responses".to_string(),
      fixtures: "fixtures".to_string(),
    }
  }
}

/// Type name suffixes, one per artifact family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSuffixes {
  pub model: String,
  pub factory: String,
  pub request: String,
  pub query: String,
  pub response: String,
  pub fixture: String,
}

impl Default for NameSuffixes {
  fn default() -> Self {
    Self {
      model: "Model".to_string(),
      factory: "Factory".to_string(),
      request: "Request".to_string(),
      query: "Query".to_string(),
      response: "Response".to_string(),
      fixture: "Fixture".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct CodegenConfig {
  /// Application namespace root every artifact lives under.
  #[builder(into, default = "api".to_string())]
  pub root: String,
  #[builder(default)]
  pub segments: NamespaceSegments,
  #[builder(default)]
  pub suffixes: NameSuffixes,
  #[builder(into, default = "EmptyResponse".to_string())]
  pub empty_response: String,
  /// Feature used for operations without tags.
  #[builder(into, default = "Common".to_string())]
  pub fallback_feature: String,
  #[builder(default)]
  pub fixtures: bool,
}

impl CodegenConfig {
  #[must_use]
  pub fn root_namespace(&self) -> Namespace {
    Namespace::parse(&self.root)
  }

  /// `root::feature::segment`.
  #[must_use]
  pub fn namespace(&self, feature: &str, segment: &str) -> Namespace {
    self.root_namespace().child(feature).child(segment)
  }

  /// Pascal-cased feature of an operation: its first tag, or the fallback feature.
  #[must_use]
  pub fn feature_of(&self, operation: &Operation) -> String {
    to_type_name(operation.feature_tag().unwrap_or(&self.fallback_feature))
  }
}

/// Stale output to delete before emission: every `start/<feature>/end` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupDirective {
  pub kind: ArtifactKind,
  pub start: Namespace,
  pub end: String,
}

/// The closed set of per-operation generators run by the driver.
#[derive(Debug)]
pub enum OperationGenerator<'a> {
  Request(RequestGenerator<'a>),
  Response(ResponseGenerator<'a>),
  Fixture(FixtureGenerator<'a>),
}

impl<'a> OperationGenerator<'a> {
  /// Generators enabled by `config`, in run order.
  #[must_use]
  pub fn all(config: &'a CodegenConfig) -> Vec<Self> {
    let mut generators = vec![
      Self::Request(RequestGenerator::new(config)),
      Self::Response(ResponseGenerator::new(config)),
    ];
    if config.fixtures {
      generators.push(Self::Fixture(FixtureGenerator::new(config)));
    }
    generators
  }

  pub fn generate(&self, operation: &Operation) -> GenerationResult<ArtifactCollection> {
    match self {
      Self::Request(generator) => generator.generate(operation),
      Self::Response(generator) => generator.generate(operation),
      Self::Fixture(generator) => generator.generate(operation),
    }
  }

  #[must_use]
  pub fn cleanup_directives(&self) -> Vec<CleanupDirective> {
    match self {
      Self::Request(generator) => generator.cleanup_directives(),
      Self::Response(generator) => generator.cleanup_directives(),
      Self::Fixture(_) => vec![],
    }
  }
}
