use crate::{
  contract::SchemaType,
  generator::ast::{ElementType, Namespace, PropertyType, ScalarKind, TypeReference},
};

#[test]
fn test_primitive_mapping() {
  assert_eq!(ScalarKind::from_schema_type(SchemaType::Boolean), Some(ScalarKind::Bool));
  assert_eq!(ScalarKind::from_schema_type(SchemaType::Number), Some(ScalarKind::Float));
  assert_eq!(ScalarKind::from_schema_type(SchemaType::Integer), Some(ScalarKind::Int));
  assert_eq!(ScalarKind::from_schema_type(SchemaType::String), Some(ScalarKind::String));
  assert_eq!(ScalarKind::from_schema_type(SchemaType::Array), Some(ScalarKind::Array));
  assert_eq!(ScalarKind::from_schema_type(SchemaType::Object), None);
}

#[test]
fn test_with_artifact_sets_element_for_arrays() {
  let name = Namespace::new(["api", "Items", "models"]).qualify("ItemsModel");
  let ty = PropertyType::builder()
    .scalar(ScalarKind::Array)
    .needs_nested(true)
    .build()
    .with_artifact(name.clone());

  assert!(!ty.needs_nested);
  assert_eq!(ty.reference, Some(TypeReference::Artifact(name.clone())));
  assert_eq!(ty.element, Some(ElementType::Artifact(name)));
}

#[test]
fn test_with_artifact_leaves_element_unset_for_objects() {
  let name = Namespace::new(["api", "Users", "models"]).qualify("AddressModel");
  let ty = PropertyType::builder()
    .scalar(ScalarKind::Object)
    .needs_nested(true)
    .build()
    .with_artifact(name);

  assert_eq!(ty.element, None);
  assert!(matches!(ty.reference, Some(TypeReference::Artifact(_))));
}
