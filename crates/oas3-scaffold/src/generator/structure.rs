use indexmap::IndexMap;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde_json::Value;

use super::{
  ast::{PropertyType, QualifiedName},
  codegen::types::{type_path, value_tokens, wrap_optional},
  collection::ArtifactCollection,
  naming::identifiers::to_type_name,
};
use crate::contract::{Schema, SchemaType};

/// Example-data skeleton of an object schema, keyed by wire name.
pub type Structure = IndexMap<String, StructureElement>;

#[derive(Debug, Clone, PartialEq)]
pub enum StructureElement {
  Scalar(Value),
  /// The item example, or `None` for a free-form array.
  Array(Option<Value>),
  Object {
    structure: Structure,
    object_name: String,
    /// Raw `x-feature` override of the nested schema.
    feature: Option<String>,
  },
  ArrayOfObject {
    structure: Structure,
    object_name: String,
    feature: Option<String>,
  },
}

/// Walks `properties` and keeps whatever carries example data.
#[must_use]
pub fn extract(properties: &IndexMap<String, Schema>) -> Structure {
  properties
    .iter()
    .filter_map(|(name, property)| extract_element(property).map(|element| (name.clone(), element)))
    .collect()
}

fn extract_element(property: &Schema) -> Option<StructureElement> {
  if let Some(example) = property.example.as_ref().filter(|example| !example.is_null()) {
    return Some(StructureElement::Scalar(example.clone()));
  }

  if property.is_array_of_objects() {
    let items = property.items.as_deref()?;
    return Some(StructureElement::ArrayOfObject {
      structure: extract(&items.properties),
      object_name: items.name.clone(),
      feature: items.extensions.feature.clone(),
    });
  }

  if property.is_type(SchemaType::Array) {
    let example = if property.extensions.is_free_form() {
      None
    } else {
      property
        .items
        .as_deref()
        .and_then(|items| items.example.clone())
        .filter(|example| !example.is_null())
    };
    return Some(StructureElement::Array(example));
  }

  if property.is_type(SchemaType::Object) {
    return Some(StructureElement::Object {
      structure: extract(&property.properties),
      object_name: property.name.clone(),
      feature: property.extensions.feature.clone(),
    });
  }

  None
}

/// Turns a [`Structure`] into a Rust construction expression for a generated model.
///
/// Field types come from the model artifacts in `artifacts`; nested model names come from
/// `resolver(feature, object_name)`. Values a field's type cannot hold are left to
/// `Default::default()`.
pub struct StructureWriter<'a, F> {
  artifacts: &'a ArtifactCollection,
  resolver: F,
}

impl<'a, F> StructureWriter<'a, F>
where
  F: Fn(&str, &str) -> QualifiedName,
{
  pub fn new(artifacts: &'a ArtifactCollection, resolver: F) -> Self {
    Self { artifacts, resolver }
  }

  /// `Model { field: value, ..Default::default() }` for the model named `model`.
  pub fn write(&self, structure: &Structure, model: &QualifiedName, feature: &str) -> TokenStream {
    let path = type_path(model);
    let fields = self
      .artifacts
      .get(model)
      .map(|artifact| {
        structure
          .iter()
          .filter_map(|(wire_name, element)| {
            let property = artifact.properties.iter().find(|property| &property.wire_name == wire_name)?;
            let value = self.write_element(element, &property.ty, feature)?;
            let name = format_ident!("{}", property.name);
            Some(quote! { #name: #value })
          })
          .collect::<Vec<_>>()
      })
      .unwrap_or_default();

    quote! {
      #path {
        #(#fields,)*
        ..Default::default()
      }
    }
  }

  fn write_element(&self, element: &StructureElement, ty: &PropertyType, feature: &str) -> Option<TokenStream> {
    let value = match element {
      StructureElement::Scalar(example) => value_tokens(example, ty)?,
      StructureElement::Array(None) if ty.is_array() => quote! { Vec::new() },
      StructureElement::Array(None) if ty.reference.is_none() => {
        quote! { oas3_scaffold_support::Value::Array(Vec::new()) }
      }
      StructureElement::Array(None) => return None,
      StructureElement::Array(Some(example)) => {
        let single = Value::Array(vec![example.clone()]);
        value_tokens(&single, ty)?
      }
      StructureElement::Object {
        structure,
        object_name,
        feature: nested_feature,
      } => {
        let feature = branch_feature(nested_feature.as_deref(), feature);
        let model = (self.resolver)(&feature, object_name);
        self.write(structure, &model, &feature)
      }
      StructureElement::ArrayOfObject {
        structure,
        object_name,
        feature: nested_feature,
      } => {
        let feature = branch_feature(nested_feature.as_deref(), feature);
        let model = (self.resolver)(&feature, object_name);
        let row = self.write(structure, &model, &feature);
        quote! { vec![#row] }
      }
    };

    Some(wrap_optional(value, ty))
  }
}

fn branch_feature(override_feature: Option<&str>, inherited: &str) -> String {
  override_feature.map_or_else(|| inherited.to_string(), to_type_name)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{
    contract::Extensions,
    generator::{flatten::flatten, models::ModelGenerator},
    tests::common::default_config,
  };

  fn scalar(name: &str, schema_type: SchemaType, example: Option<Value>) -> Schema {
    Schema::builder()
      .name(name)
      .schema_type(schema_type)
      .maybe_example(example)
      .build()
  }

  fn object(name: &str, properties: Vec<Schema>) -> Schema {
    Schema::builder()
      .name(name)
      .schema_type(SchemaType::Object)
      .properties(
        properties
          .into_iter()
          .map(|property| (property.name.clone(), property))
          .collect::<IndexMap<_, _>>(),
      )
      .build()
  }

  fn order() -> Schema {
    let customer = Schema {
      extensions: Extensions {
        feature: Some("customers".to_string()),
        ..Default::default()
      },
      ..object("customer", vec![scalar("email", SchemaType::String, Some(json!("a@b.c")))])
    };
    let lines = Schema::builder()
      .name("lines")
      .schema_type(SchemaType::Array)
      .items(Box::new(object(
        "line",
        vec![scalar("qty", SchemaType::Integer, Some(json!(2)))],
      )))
      .build();
    let tags = Schema::builder()
      .name("tags")
      .schema_type(SchemaType::Array)
      .items(Box::new(scalar("items", SchemaType::String, Some(json!("new")))))
      .build();
    let raw = Schema {
      extensions: Extensions {
        free_form: Some(true),
        ..Default::default()
      },
      ..Schema::builder()
        .name("raw")
        .schema_type(SchemaType::Array)
        .items(Box::new(scalar("items", SchemaType::String, Some(json!("x")))))
        .build()
    };

    object(
      "order",
      vec![
        scalar("id", SchemaType::Integer, Some(json!(7))),
        scalar("note", SchemaType::String, None),
        scalar("total", SchemaType::Number, Some(Value::Null)),
        customer,
        lines,
        tags,
        raw,
      ],
    )
  }

  #[test]
  fn test_extract_keeps_example_bearing_shapes() {
    let structure = extract(&order().properties);

    assert_eq!(
      structure.keys().collect::<Vec<_>>(),
      ["id", "customer", "lines", "tags", "raw"]
    );
    assert_eq!(structure["id"], StructureElement::Scalar(json!(7)));
    assert_eq!(structure["tags"], StructureElement::Array(Some(json!("new"))));
    assert_eq!(structure["raw"], StructureElement::Array(None));

    let StructureElement::Object {
      structure: customer,
      object_name,
      feature,
    } = &structure["customer"]
    else {
      panic!("customer should be an object");
    };
    assert_eq!(object_name, "customer");
    assert_eq!(feature.as_deref(), Some("customers"));
    assert_eq!(customer["email"], StructureElement::Scalar(json!("a@b.c")));

    assert!(matches!(
      &structure["lines"],
      StructureElement::ArrayOfObject { object_name, .. } if object_name == "line"
    ));
  }

  #[test]
  fn test_extract_does_not_touch_input() {
    let schema = order();
    let before = schema.clone();
    let _ = extract(&schema.properties);
    assert_eq!(schema, before);
  }

  #[test]
  fn test_writer_builds_nested_struct_literal() {
    let config = default_config();
    let schema = flatten(&order());
    let mut collection = ArtifactCollection::new();
    let model = ModelGenerator::new(&config).generate("Orders", &schema, &mut collection, false);
    let model_name = model.qualified_name();
    collection.add_if_absent(model);

    let resolver = |feature: &str, object_name: &str| {
      config
        .namespace(feature, &config.segments.models)
        .qualify(format!("{}{}", to_type_name(object_name), config.suffixes.model))
    };
    let writer = StructureWriter::new(&collection, resolver);
    let expression = writer.write(&extract(&schema.properties), &model_name, "Orders");

    let expected = quote! {
      crate::api::orders::models::order_model::OrderModel {
        id: Some(7),
        customer: Some(crate::api::customers::models::customer_model::CustomerModel {
          email: Some("a@b.c".to_string()),
          ..Default::default()
        }),
        lines: Some(vec![crate::api::orders::models::line_model::LineModel {
          qty: Some(2),
          ..Default::default()
        }]),
        tags: Some(vec!["new".to_string()]),
        raw: Some(oas3_scaffold_support::Value::Array(Vec::new())),
        ..Default::default()
      }
    };
    assert_eq!(expression.to_string(), expected.to_string());
  }

  #[test]
  fn test_writer_without_artifact_falls_back_to_default() {
    let collection = ArtifactCollection::new();
    let writer = StructureWriter::new(&collection, |_: &str, name: &str| {
      crate::generator::ast::Namespace::new(["api"]).qualify(name)
    });
    let model = crate::generator::ast::Namespace::new(["api"]).qualify("Missing");
    let structure = Structure::from([("id".to_string(), StructureElement::Scalar(json!(1)))]);

    assert_eq!(
      writer.write(&structure, &model, "Common").to_string(),
      quote! { crate::api::missing::Missing { ..Default::default() } }.to_string()
    );
  }
}
