use super::{
  CodegenConfig,
  ast::{Artifact, ArtifactKind, MethodDef},
  collection::ArtifactCollection,
  errors::GenerationResult,
  flatten::flatten,
  models::ModelGenerator,
  naming::identifiers::to_type_name,
  responses::DATA_PROPERTY,
  structure::{StructureWriter, extract},
};
use crate::contract::{Operation, SchemaType};

/// Builds fixture scaffolds whose `row()` constructs an operation's data model from the
/// contract's property examples.
#[derive(Debug, Clone, Copy)]
pub struct FixtureGenerator<'a> {
  config: &'a CodegenConfig,
  models: ModelGenerator<'a>,
}

impl<'a> FixtureGenerator<'a> {
  #[must_use]
  pub fn new(config: &'a CodegenConfig) -> Self {
    Self {
      config,
      models: ModelGenerator::new(config),
    }
  }

  /// Operations without an object (or array of objects) `data` payload produce nothing.
  pub fn generate(&self, operation: &Operation) -> GenerationResult<ArtifactCollection> {
    let mut collection = ArtifactCollection::new();

    let Some(schema) = operation
      .success_response()
      .and_then(|(_, response)| response.json_schema())
    else {
      return Ok(collection);
    };
    let schema = flatten(schema);
    let Some(data) = schema.properties.get(DATA_PROPERTY) else {
      return Ok(collection);
    };
    let data = if data.is_array_of_objects() {
      match data.items.as_deref() {
        Some(items) => items,
        None => return Ok(collection),
      }
    } else if data.is_type(SchemaType::Object) {
      data
    } else {
      return Ok(collection);
    };

    let feature = self.config.feature_of(operation);
    let mut models = ArtifactCollection::new();
    let model = self.models.generate(&feature, data, &mut models, false);
    let model_name = model.qualified_name();
    let model_feature = data
      .extensions
      .feature
      .as_deref()
      .map_or_else(|| feature.clone(), to_type_name);
    models.add_if_absent(model);

    let resolver = |feature: &str, object_name: &str| {
      self.config.namespace(feature, &self.config.segments.models).qualify(format!(
        "{}{}",
        to_type_name(object_name),
        self.config.suffixes.model
      ))
    };
    let expression =
      StructureWriter::new(&models, resolver).write(&extract(&data.properties), &model_name, &model_feature);

    let fixture = Artifact::builder()
      .namespace(self.config.namespace(&feature, &self.config.segments.fixtures))
      .name(format!(
        "{}{}",
        to_type_name(&operation.operation_id),
        self.config.suffixes.fixture
      ))
      .kind(ArtifactKind::Fixture)
      .methods(vec![MethodDef::FixtureRow {
        model: model_name,
        expression: expression.to_string(),
      }])
      .docs(vec![format!(
        "Sample row for `{} {}` built from the contract's examples.",
        operation.method, operation.url
      )])
      .build();
    collection.add(fixture)?;

    Ok(collection)
  }
}
