use serde_json::Value;

use super::{
  ast::{DefaultValue, PropertyType, ScalarKind, TypeReference},
  naming::identifiers::{to_pascal, to_type_name},
};
use crate::contract::{Schema, SchemaType};

/// Resolves the type descriptor of a property schema. The first matching rule wins:
///
/// 1. an explicit `override` type makes an opaque `object` reference;
/// 2. a free-form node (`x-json-params`) is `any` and never nullable;
/// 3. an object, or an array of objects, needs a nested artifact;
/// 4. anything else maps its declared primitive type, if it has one.
#[must_use]
pub fn resolve(node: &Schema, nullable: bool, required: bool, type_override: Option<&str>) -> PropertyType {
  let ty = PropertyType::builder().nullable(nullable).required(required);

  if let Some(type_path) = type_override {
    return ty
      .scalar(ScalarKind::Object)
      .reference(TypeReference::External(type_path.to_string()))
      .maybe_default(override_default(node, type_path))
      .build();
  }

  let default = node.default.clone().map(DefaultValue::Literal);

  if node.extensions.is_free_form() {
    return PropertyType::builder()
      .nullable(false)
      .required(required)
      .scalar(ScalarKind::Any)
      .maybe_default(default)
      .build();
  }

  if node.is_array_of_objects() {
    return ty
      .scalar(ScalarKind::Array)
      .needs_nested(true)
      .maybe_default(default)
      .build();
  }

  if node.is_type(SchemaType::Object) {
    return ty
      .scalar(ScalarKind::Object)
      .needs_nested(true)
      .maybe_default(default)
      .build();
  }

  ty.maybe_scalar(node.schema_type.and_then(ScalarKind::from_schema_type))
    .maybe_default(default)
    .build()
}

/// An enum default that is one of the enum's values becomes a constant on the override type.
fn override_default(node: &Schema, type_path: &str) -> Option<DefaultValue> {
  let default = node.default.as_ref()?;

  if node.enum_contains(default)
    && let Some(constant) = constant_name(default)
  {
    return Some(DefaultValue::Constant {
      type_path: type_path.to_string(),
      constant,
    });
  }

  Some(DefaultValue::Literal(default.clone()))
}

fn constant_name(value: &Value) -> Option<String> {
  let raw = match value {
    Value::String(text) => text.clone(),
    Value::Number(number) => number.to_string(),
    Value::Bool(flag) => flag.to_string(),
    _ => return None,
  };
  (!to_pascal(&raw).is_empty()).then(|| to_type_name(&raw))
}
