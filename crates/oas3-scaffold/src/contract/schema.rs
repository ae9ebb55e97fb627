use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use strum::{Display, EnumString};

use super::Extensions;

/// Primitive subtype declared by a schema's `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
  Boolean,
  Number,
  Integer,
  String,
  Array,
  Object,
}

/// Shape of a schema node, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
  Scalar,
  Object,
  Array,
  Reference,
  Composed,
}

/// A resolved schema node.
///
/// `$ref`s are already followed: a node reached through a reference carries the target's content,
/// the target's name and the original reference path. Properties keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, bon::Builder)]
pub struct Schema {
  #[builder(into)]
  pub name: String,
  #[builder(into, default)]
  pub pointer: String,
  #[builder(into)]
  pub reference: Option<String>,
  pub schema_type: Option<SchemaType>,
  #[builder(default)]
  pub properties: IndexMap<String, Schema>,
  #[builder(default)]
  pub required: IndexSet<String>,
  pub nullable: Option<bool>,
  pub default: Option<Value>,
  #[builder(default)]
  pub enum_values: Vec<Value>,
  pub example: Option<Value>,
  pub items: Option<Box<Schema>>,
  #[builder(default)]
  pub all_of: Vec<Schema>,
  #[builder(default)]
  pub extensions: Extensions,
}

impl Schema {
  #[must_use]
  pub fn kind(&self) -> SchemaKind {
    if !self.all_of.is_empty() {
      SchemaKind::Composed
    } else if self.reference.is_some() {
      SchemaKind::Reference
    } else if self.schema_type == Some(SchemaType::Array) || self.items.is_some() {
      SchemaKind::Array
    } else if self.schema_type == Some(SchemaType::Object) || !self.properties.is_empty() {
      SchemaKind::Object
    } else {
      SchemaKind::Scalar
    }
  }

  #[must_use]
  pub fn is_type(&self, schema_type: SchemaType) -> bool {
    self.schema_type == Some(schema_type)
  }

  /// True for a node whose `items` are declared as `object`, with `type: array` or no `type` at all.
  #[must_use]
  pub fn is_array_of_objects(&self) -> bool {
    matches!(self.schema_type, None | Some(SchemaType::Array))
      && self.items.as_deref().is_some_and(|items| items.is_type(SchemaType::Object))
  }

  #[must_use]
  pub fn is_nullable(&self) -> bool {
    self.nullable.unwrap_or(false)
  }

  #[must_use]
  pub fn is_required(&self, property: &str) -> bool {
    self.required.contains(property)
  }

  /// Whether `value` is one of the declared enum values.
  #[must_use]
  pub fn enum_contains(&self, value: &Value) -> bool {
    self.enum_values.iter().any(|candidate| candidate == value)
  }
}
