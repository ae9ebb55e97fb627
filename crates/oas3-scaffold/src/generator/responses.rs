use super::{
  CleanupDirective, CodegenConfig,
  ast::{Artifact, ArtifactKind, BaseType, GetterPolicy, MethodDef, PropertyDef},
  collection::ArtifactCollection,
  errors::{GenerationError, GenerationResult},
  flatten::flatten,
  models::ModelGenerator,
  naming::identifiers::to_type_name,
  type_resolver,
};
use crate::contract::{Operation, Schema};

/// Property of the response payload that is modeled as the response's `data`.
pub(crate) const DATA_PROPERTY: &str = "data";

/// Builds the response artifact of an operation from its success response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseGenerator<'a> {
  config: &'a CodegenConfig,
  models: ModelGenerator<'a>,
}

impl<'a> ResponseGenerator<'a> {
  #[must_use]
  pub fn new(config: &'a CodegenConfig) -> Self {
    Self {
      config,
      models: ModelGenerator::new(config),
    }
  }

  pub fn generate(&self, operation: &Operation) -> GenerationResult<ArtifactCollection> {
    let feature = self.config.feature_of(operation);
    let (status, response) = operation
      .success_response()
      .ok_or_else(|| GenerationError::MissingResponse {
        operation: operation.operation_id.clone(),
      })?;
    let mut collection = ArtifactCollection::new();

    let Some(schema) = response.json_schema() else {
      let feature = response
        .extensions
        .feature
        .as_deref()
        .map_or_else(|| feature.clone(), to_type_name);
      collection.add_if_absent(self.empty_response(&feature));
      return Ok(collection);
    };

    let response_feature = response
      .extensions
      .feature
      .as_deref()
      .or(schema.extensions.feature.as_deref())
      .map_or_else(|| feature.clone(), to_type_name);

    let schema = flatten(schema);
    let properties = schema
      .properties
      .get(DATA_PROPERTY)
      .map(|data| self.data_property(&feature, data, &mut collection))
      .into_iter()
      .collect::<Vec<_>>();

    let mut docs = vec![format!("`{status}` response of `{} {}`", operation.method, operation.url)];
    if let Some(description) = &response.description {
      docs.insert(0, description.clone());
    }

    let artifact = Artifact::builder()
      .namespace(self.config.namespace(&response_feature, &self.config.segments.responses))
      .name(format!(
        "{}{}",
        to_type_name(&operation.operation_id),
        self.config.suffixes.response
      ))
      .kind(ArtifactKind::Response)
      .base(BaseType::Response)
      .properties(properties)
      .methods(vec![MethodDef::WrapData(response.extensions.wraps_data())])
      .docs(docs)
      .build();
    collection.add_if_absent(artifact);

    Ok(collection)
  }

  /// The `data` payload is always required and non-nullable. Objects and arrays of objects are
  /// modeled under the operation's own feature.
  fn data_property(&self, feature: &str, data: &Schema, collection: &mut ArtifactCollection) -> PropertyDef {
    let ty = type_resolver::resolve(data, false, true, None);
    let ty = self.models.complete_type(feature, data, ty, collection, false);

    PropertyDef::builder()
      .name(DATA_PROPERTY)
      .wire_name(DATA_PROPERTY)
      .ty(ty)
      .getter(GetterPolicy::Plain)
      .setter(true)
      .build()
  }

  fn empty_response(&self, feature: &str) -> Artifact {
    Artifact::builder()
      .namespace(self.config.namespace(feature, &self.config.segments.responses))
      .name(self.config.empty_response.clone())
      .kind(ArtifactKind::Response)
      .base(BaseType::Response)
      .methods(vec![MethodDef::WrapData(false)])
      .build()
  }

  #[must_use]
  pub fn cleanup_directives(&self) -> Vec<CleanupDirective> {
    vec![CleanupDirective {
      kind: ArtifactKind::Response,
      start: self.config.root_namespace(),
      end: self.config.segments.responses.clone(),
    }]
  }
}
