use serde_json::Value;
use strum::Display;

use super::QualifiedName;
use crate::contract::SchemaType;

/// Resolved scalar category of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
  Bool,
  Float,
  Int,
  String,
  Array,
  Object,
  Any,
}

impl ScalarKind {
  /// Primitive mapping of a declared schema type. `object` has no primitive mapping.
  #[must_use]
  pub fn from_schema_type(schema_type: SchemaType) -> Option<Self> {
    match schema_type {
      SchemaType::Boolean => Some(Self::Bool),
      SchemaType::Number => Some(Self::Float),
      SchemaType::Integer => Some(Self::Int),
      SchemaType::String => Some(Self::String),
      SchemaType::Array => Some(Self::Array),
      SchemaType::Object => None,
    }
  }
}

/// Element type annotation for collection properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
  Artifact(QualifiedName),
  Primitive(ScalarKind),
  Any,
}

/// What a property's type points at when it is not a plain scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeReference {
  /// A generated artifact.
  Artifact(QualifiedName),
  /// An opaque type path supplied through `x-type`.
  External(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
  Literal(Value),
  /// An enum default rewritten to an associated constant of an override type.
  Constant { type_path: String, constant: String },
}

/// Resolved type descriptor of a single property.
///
/// When `needs_nested` is false the rendered type comes from `reference` if present, otherwise
/// from `scalar`. When it is true a nested artifact has to be generated before rendering.
#[derive(Debug, Clone, Default, PartialEq, bon::Builder)]
pub struct PropertyType {
  #[builder(default)]
  pub nullable: bool,
  #[builder(default)]
  pub required: bool,
  pub scalar: Option<ScalarKind>,
  pub element: Option<ElementType>,
  pub reference: Option<TypeReference>,
  pub default: Option<DefaultValue>,
  #[builder(default)]
  pub needs_nested: bool,
}

impl PropertyType {
  #[must_use]
  pub fn has_default(&self) -> bool {
    self.default.is_some()
  }

  /// Whether the rendered field is wrapped in `Option`. A non-null default keeps it plain.
  #[must_use]
  pub fn is_optional(&self) -> bool {
    let has_value_default = match &self.default {
      Some(DefaultValue::Literal(value)) => !value.is_null(),
      Some(DefaultValue::Constant { .. }) => true,
      None => false,
    };
    (self.nullable || !self.required) && !has_value_default
  }

  #[must_use]
  pub fn is_array(&self) -> bool {
    self.scalar == Some(ScalarKind::Array)
  }

  #[must_use]
  pub fn with_nullable(mut self, nullable: bool) -> Self {
    self.nullable = nullable;
    self
  }

  /// Points the descriptor at a generated artifact, consuming the nested-generation request.
  #[must_use]
  pub fn with_artifact(mut self, name: QualifiedName) -> Self {
    if self.is_array() {
      self.element = Some(ElementType::Artifact(name.clone()));
    }
    self.reference = Some(TypeReference::Artifact(name));
    self.needs_nested = false;
    self
  }

  #[must_use]
  pub fn with_element(mut self, element: ElementType) -> Self {
    self.element = Some(element);
    self
  }
}
