use oas3_scaffold_support::ListingParams;

use super::{
  CleanupDirective, CodegenConfig,
  ast::{
    Artifact, ArtifactKind, BaseType, DefaultValue, ElementType, GetterPolicy, PropertyDef, PropertyType, ScalarKind,
    TypeReference, Visibility,
  },
  collection::ArtifactCollection,
  errors::{GenerationError, GenerationResult},
  flatten::flatten,
  models::ModelGenerator,
  naming::identifiers::{to_field_name, to_type_name, unique_field_name},
};
use crate::contract::{Operation, Parameter};

pub(crate) const LISTING_PARAMS_TYPE: &str = "oas3_scaffold_support::ListingParams";

/// Builds the request artifact of an operation, plus its query artifact and body input model.
#[derive(Debug, Clone, Copy)]
pub struct RequestGenerator<'a> {
  config: &'a CodegenConfig,
  models: ModelGenerator<'a>,
}

impl<'a> RequestGenerator<'a> {
  #[must_use]
  pub fn new(config: &'a CodegenConfig) -> Self {
    Self {
      config,
      models: ModelGenerator::new(config),
    }
  }

  pub fn generate(&self, operation: &Operation) -> GenerationResult<ArtifactCollection> {
    let feature = self.config.feature_of(operation);
    let operation_name = to_type_name(&operation.operation_id);
    let mut collection = ArtifactCollection::new();

    let mut properties = operation
      .path_params()
      .into_iter()
      .map(path_property)
      .collect::<Vec<_>>();

    if operation.is_list_params() {
      let name = synthetic_name("params", &properties);
      properties.push(external_property(&name, LISTING_PARAMS_TYPE, false));
    }

    if let Some(schema) = operation.request_body.as_ref().and_then(|body| body.json_schema()) {
      let schema = flatten(schema);
      let data = self.models.generate(&feature, &schema, &mut collection, true);
      let data_name = data.qualified_name();
      collection.add_if_absent(data);
      let name = synthetic_name("data", &properties);
      properties.push(
        PropertyDef::builder()
          .name(&name)
          .wire_name(&name)
          .ty(
            PropertyType::builder()
              .required(true)
              .scalar(ScalarKind::Object)
              .reference(TypeReference::Artifact(data_name))
              .build(),
          )
          .getter(GetterPolicy::Plain)
          .build(),
      );
    }

    if needs_query(operation) {
      let query = self.query(&feature, &operation_name, operation)?;
      let query_name = query.qualified_name();
      collection.add(query)?;
      let name = synthetic_name("query", &properties);
      properties.push(
        PropertyDef::builder()
          .name(&name)
          .wire_name(&name)
          .ty(
            PropertyType::builder()
              .nullable(true)
              .scalar(ScalarKind::Object)
              .reference(TypeReference::Artifact(query_name))
              .default(DefaultValue::Literal(serde_json::Value::Null))
              .build(),
          )
          .getter(GetterPolicy::Plain)
          .build(),
      );
    }

    let request = Artifact::builder()
      .namespace(self.config.namespace(&feature, &self.config.segments.requests))
      .name(format!("{operation_name}{}", self.config.suffixes.request))
      .kind(ArtifactKind::Request)
      .base(BaseType::Request)
      .properties(properties)
      .docs(operation_docs(operation))
      .build();
    collection.add(request)?;

    Ok(collection)
  }

  fn query(&self, feature: &str, operation_name: &str, operation: &Operation) -> GenerationResult<Artifact> {
    let properties = operation
      .query_params()
      .into_iter()
      .filter(|param| !ListingParams::is_reserved(&param.name))
      .map(|param| query_property(operation, param))
      .collect::<GenerationResult<Vec<_>>>()?;

    Ok(
      Artifact::builder()
        .namespace(self.config.namespace(feature, &self.config.segments.queries))
        .name(format!("{operation_name}{}", self.config.suffixes.query))
        .kind(ArtifactKind::Query)
        .properties(properties)
        .build(),
    )
  }

  #[must_use]
  pub fn cleanup_directives(&self) -> Vec<CleanupDirective> {
    vec![
      CleanupDirective {
        kind: ArtifactKind::Request,
        start: self.config.root_namespace(),
        end: self.config.segments.requests.clone(),
      },
      CleanupDirective {
        kind: ArtifactKind::Query,
        start: self.config.root_namespace(),
        end: self.config.segments.queries.clone(),
      },
    ]
  }
}

/// A query artifact is needed when there is at least one query parameter that the listing
/// parameters do not already cover.
pub(crate) fn needs_query(operation: &Operation) -> bool {
  let params = operation.query_params();
  if operation.is_list_params() {
    params.iter().any(|param| !ListingParams::is_reserved(&param.name))
  } else {
    !params.is_empty()
  }
}

/// Name for a request field that has no contract counterpart, clear of path parameter fields.
fn synthetic_name(base: &str, properties: &[PropertyDef]) -> String {
  unique_field_name(base, |name| properties.iter().any(|property| property.name == name))
}

fn path_property(param: &Parameter) -> PropertyDef {
  let ty = PropertyType::builder()
    .nullable(!param.required)
    .required(param.required);
  let ty = match param.type_override() {
    Some(type_path) => ty
      .scalar(ScalarKind::Object)
      .reference(TypeReference::External(type_path.to_string()))
      .build(),
    None => ty
      .maybe_scalar(param.schema.schema_type.and_then(ScalarKind::from_schema_type))
      .build(),
  };

  PropertyDef::builder()
    .name(to_field_name(&param.name))
    .wire_name(&param.name)
    .ty(ty)
    .getter(GetterPolicy::Plain)
    .build()
}

fn external_property(name: &str, type_path: &str, nullable: bool) -> PropertyDef {
  PropertyDef::builder()
    .name(name)
    .wire_name(name)
    .ty(
      PropertyType::builder()
        .nullable(nullable)
        .required(!nullable)
        .scalar(ScalarKind::Object)
        .reference(TypeReference::External(type_path.to_string()))
        .build(),
    )
    .getter(GetterPolicy::Plain)
    .build()
}

fn query_property(operation: &Operation, param: &Parameter) -> GenerationResult<PropertyDef> {
  let scalar = param
    .schema
    .schema_type
    .and_then(ScalarKind::from_schema_type)
    .ok_or_else(|| GenerationError::UnmappableType {
      operation: operation.operation_id.clone(),
      parameter: param.name.clone(),
      schema_type: param
        .schema
        .schema_type
        .map_or_else(|| "none".to_string(), |schema_type| schema_type.to_string()),
    })?;

  let element = (scalar == ScalarKind::Array).then(|| {
    param
      .schema
      .items
      .as_deref()
      .and_then(|items| items.schema_type)
      .and_then(ScalarKind::from_schema_type)
      .map_or(ElementType::Any, ElementType::Primitive)
  });

  Ok(
    PropertyDef::builder()
      .name(to_field_name(&param.name))
      .wire_name(&param.name)
      .ty(
        PropertyType::builder()
          .nullable(true)
          .scalar(scalar)
          .maybe_element(element)
          .default(DefaultValue::Literal(serde_json::Value::Null))
          .build(),
      )
      .visibility(Visibility::Public)
      .build(),
  )
}

fn operation_docs(operation: &Operation) -> Vec<String> {
  let mut docs = vec![format!("`{} {}`", operation.method, operation.url)];
  if let Some(summary) = &operation.summary {
    docs.insert(0, summary.clone());
  }
  docs
}
