use super::{
  CodegenConfig,
  ast::{
    Artifact, ArtifactKind, DefaultValue, ElementType, GetterPolicy, MethodDef, PropertyDef, PropertyType,
    QualifiedName, ScalarKind, TypeReference,
  },
  collection::ArtifactCollection,
  naming::identifiers::{to_field_name, to_type_name, unique_field_name},
  type_resolver,
};
use crate::contract::Schema;

/// Preferred field name of the presence tracker carried by input models.
pub(crate) const PRESENCE_TRACKER: &str = "list_params";
pub(crate) const LISTING_SERVICE_TYPE: &str = "oas3_scaffold_support::PagingListingService";

/// Builds model artifacts from flattened object schemas.
#[derive(Debug, Clone, Copy)]
pub struct ModelGenerator<'a> {
  config: &'a CodegenConfig,
}

impl<'a> ModelGenerator<'a> {
  #[must_use]
  pub fn new(config: &'a CodegenConfig) -> Self {
    Self { config }
  }

  /// Generates the model for `schema` and returns it without registering it.
  ///
  /// Nested models and the companion factory are registered in `collection` with
  /// first-writer-wins semantics. The caller decides how to register the returned model.
  pub fn generate(
    &self,
    feature: &str,
    schema: &Schema,
    collection: &mut ArtifactCollection,
    is_input: bool,
  ) -> Artifact {
    let feature = schema
      .extensions
      .feature
      .as_deref()
      .map_or_else(|| feature.to_string(), to_type_name);
    let namespace = self.config.namespace(&feature, &self.config.segments.models);
    let name = format!("{}{}", to_type_name(&schema.name), self.config.suffixes.model);

    let (required, optional): (Vec<_>, Vec<_>) = schema
      .properties
      .iter()
      .partition(|(wire_name, _)| schema.is_required(wire_name));

    let mut properties = required
      .into_iter()
      .chain(optional)
      .map(|(wire_name, property)| self.property(&feature, schema, wire_name, property, collection, is_input))
      .collect::<Vec<_>>();

    let tracker = is_input.then(|| {
      unique_field_name(PRESENCE_TRACKER, |name| {
        properties.iter().any(|property| property.name == name || property.wire_name == name)
      })
    });
    if let Some(tracker) = &tracker {
      properties.push(presence_tracker(tracker));
    }

    let kind = if is_input {
      ArtifactKind::InputModel
    } else {
      ArtifactKind::Model
    };

    let model = Artifact::builder()
      .namespace(namespace)
      .name(name)
      .kind(kind)
      .properties(properties)
      .maybe_presence_tracker(tracker)
      .build();

    if !is_input {
      collection.add_if_absent(self.factory(&feature, &model.qualified_name()));
    }

    model
  }

  fn property(
    &self,
    feature: &str,
    parent: &Schema,
    wire_name: &str,
    property: &Schema,
    collection: &mut ArtifactCollection,
    is_input: bool,
  ) -> PropertyDef {
    let required = parent.is_required(wire_name);
    let ty = type_resolver::resolve(
      property,
      property.is_nullable(),
      required,
      property.extensions.type_override.as_deref(),
    );
    let ty = self.complete_type(feature, property, ty, collection, is_input);

    let getter = match (is_input, required, ty.has_default()) {
      (true, false, false) => GetterPolicy::Deferred,
      (true, false, true) => GetterPolicy::DeferredWithDefault,
      _ => GetterPolicy::Plain,
    };

    PropertyDef::builder()
      .name(to_field_name(wire_name))
      .wire_name(wire_name)
      .ty(ty)
      .getter(getter)
      .setter(!is_input)
      .build()
  }

  /// Generates the nested artifact a descriptor asks for and fills in collection element types.
  pub(crate) fn complete_type(
    &self,
    feature: &str,
    property: &Schema,
    ty: PropertyType,
    collection: &mut ArtifactCollection,
    is_input: bool,
  ) -> PropertyType {
    if ty.needs_nested {
      let source = property.items.as_deref().filter(|_| property.is_array_of_objects()).unwrap_or(property);
      let nested = self.generate(feature, source, collection, is_input);
      let nested_name = nested.qualified_name();
      collection.add_if_absent(nested);
      return ty.with_artifact(nested_name);
    }

    if ty.is_array() && !matches!(ty.reference, Some(TypeReference::External(_))) {
      let element = property
        .items
        .as_deref()
        .and_then(|items| items.schema_type)
        .and_then(ScalarKind::from_schema_type)
        .map_or(ElementType::Any, ElementType::Primitive);
      return ty.with_element(element);
    }

    ty
  }

  fn factory(&self, feature: &str, model: &QualifiedName) -> Artifact {
    let listing_service = PropertyDef::builder()
      .name("listing_service")
      .wire_name("listing_service")
      .ty(
        PropertyType::builder()
          .required(true)
          .scalar(ScalarKind::Object)
          .reference(TypeReference::External(LISTING_SERVICE_TYPE.to_string()))
          .build(),
      )
      .build();

    Artifact::builder()
      .namespace(self.config.namespace(feature, &self.config.segments.factories))
      .name(format!("{}{}", model.name, self.config.suffixes.factory))
      .kind(ArtifactKind::Factory)
      .properties(vec![listing_service])
      .methods(vec![
        MethodDef::FactoryBuild { model: model.clone() },
        MethodDef::FactoryList { model: model.clone() },
      ])
      .build()
  }
}

/// Ordered list of wire names the client actually supplied; empty until deserialization fills it.
fn presence_tracker(name: &str) -> PropertyDef {
  PropertyDef::builder()
    .name(name)
    .wire_name(name)
    .ty(
      PropertyType::builder()
        .required(true)
        .scalar(ScalarKind::Array)
        .element(ElementType::Primitive(ScalarKind::String))
        .default(DefaultValue::Literal(serde_json::Value::Array(vec![])))
        .build(),
    )
    .getter(GetterPolicy::Plain)
    .setter(true)
    .build()
}
