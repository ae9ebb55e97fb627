use anyhow::Context;
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use serde_json::Value;

use crate::generator::{
  ast::{DefaultValue, ElementType, PropertyType, QualifiedName, ScalarKind, TypeReference},
  naming::identifiers::{to_module_name, to_snake},
};

/// Absolute path of a generated type: `api::Items::models::ItemModel` renders as
/// `crate::api::items::models::item_model::ItemModel`.
pub(crate) fn type_path(name: &QualifiedName) -> TokenStream {
  let modules = name
    .namespace
    .segments()
    .iter()
    .chain(std::iter::once(&name.name))
    .map(|segment| format_ident!("{}", to_module_name(&to_snake(segment))));
  let ident = format_ident!("{}", name.name);

  quote! { crate #(:: #modules)* :: #ident }
}

/// Parses a user supplied `x-type` path into tokens.
pub(crate) fn external_path(path: &str) -> anyhow::Result<TokenStream> {
  let ty = syn::parse_str::<syn::Type>(path).with_context(|| format!("invalid type override `{path}`"))?;
  Ok(quote! { #ty })
}

pub(crate) fn scalar_type(kind: ScalarKind) -> TokenStream {
  match kind {
    ScalarKind::Bool => quote! { bool },
    ScalarKind::Float => quote! { f64 },
    ScalarKind::Int => quote! { i64 },
    ScalarKind::String => quote! { String },
    ScalarKind::Array => quote! { Vec<oas3_scaffold_support::Value> },
    ScalarKind::Object | ScalarKind::Any => quote! { oas3_scaffold_support::Value },
  }
}

fn element_type(element: Option<&ElementType>) -> TokenStream {
  match element {
    Some(ElementType::Artifact(name)) => type_path(name),
    Some(ElementType::Primitive(kind)) => scalar_type(*kind),
    Some(ElementType::Any) | None => quote! { oas3_scaffold_support::Value },
  }
}

/// The stored type of a property, before any `Option` wrapping.
pub(crate) fn base_type(ty: &PropertyType) -> anyhow::Result<TokenStream> {
  if ty.is_array() {
    let element = element_type(ty.element.as_ref());
    return Ok(quote! { Vec<#element> });
  }

  match (&ty.reference, ty.scalar) {
    (Some(TypeReference::External(path)), _) => external_path(path),
    (Some(TypeReference::Artifact(name)), _) => Ok(type_path(name)),
    (None, Some(kind)) => Ok(scalar_type(kind)),
    (None, None) => Ok(quote! { oas3_scaffold_support::Value }),
  }
}

/// The declared field type, wrapped in `Option` when the property may be absent.
pub(crate) fn field_type(ty: &PropertyType) -> anyhow::Result<TokenStream> {
  let base = base_type(ty)?;
  if ty.is_optional() {
    Ok(quote! { Option<#base> })
  } else {
    Ok(base)
  }
}

/// Initializer of a field that has a declared default.
pub(crate) fn default_value(ty: &PropertyType) -> anyhow::Result<TokenStream> {
  match &ty.default {
    Some(DefaultValue::Constant { type_path, constant }) => {
      let path = external_path(type_path)?;
      let constant = syn::parse_str::<syn::Ident>(constant)
        .with_context(|| format!("invalid constant '{constant}' on '{type_path}'"))?;
      Ok(quote! { #path::#constant })
    }
    Some(DefaultValue::Literal(Value::Null)) if ty.is_optional() => Ok(quote! { None }),
    Some(DefaultValue::Literal(value)) => Ok(
      value_tokens(value, ty)
        .map(|tokens| wrap_optional(tokens, ty))
        .unwrap_or_else(|| quote! { Default::default() }),
    ),
    None => Ok(quote! { Default::default() }),
  }
}

pub(crate) fn wrap_optional(tokens: TokenStream, ty: &PropertyType) -> TokenStream {
  if ty.is_optional() {
    quote! { Some(#tokens) }
  } else {
    tokens
  }
}

/// Rust expression for a JSON value stored in a field of type `ty`, without `Option` wrapping.
///
/// Returns `None` when the value cannot be expressed for that type, e.g. an object literal for a
/// generated model or a string for an integer field.
pub(crate) fn value_tokens(value: &Value, ty: &PropertyType) -> Option<TokenStream> {
  if ty.is_array() {
    let Value::Array(values) = value else {
      return None;
    };
    let elements = values
      .iter()
      .map(|value| element_tokens(value, ty.element.as_ref()))
      .collect::<Option<Vec<_>>>()?;
    return Some(quote! { vec![#(#elements),*] });
  }

  match (&ty.reference, ty.scalar) {
    (Some(_), _) => None,
    (None, Some(kind)) => scalar_tokens(value, kind),
    (None, None) => any_tokens(value),
  }
}

fn element_tokens(value: &Value, element: Option<&ElementType>) -> Option<TokenStream> {
  match element {
    Some(ElementType::Primitive(kind)) => scalar_tokens(value, *kind),
    Some(ElementType::Artifact(_)) => None,
    Some(ElementType::Any) | None => any_tokens(value),
  }
}

pub(crate) fn scalar_tokens(value: &Value, kind: ScalarKind) -> Option<TokenStream> {
  match (kind, value) {
    (ScalarKind::Bool, Value::Bool(flag)) => Some(quote! { #flag }),
    (ScalarKind::Int, Value::Number(number)) => {
      let literal = Literal::i64_unsuffixed(number.as_i64()?);
      Some(quote! { #literal })
    }
    (ScalarKind::Float, Value::Number(number)) => {
      let literal = Literal::f64_unsuffixed(number.as_f64()?);
      Some(quote! { #literal })
    }
    (ScalarKind::String, Value::String(text)) => Some(quote! { #text.to_string() }),
    (ScalarKind::Any | ScalarKind::Object, value) => any_tokens(value),
    _ => None,
  }
}

/// Scalars become `Value::from(..)`; composite JSON has no literal form.
fn any_tokens(value: &Value) -> Option<TokenStream> {
  let inner = match value {
    Value::Null => return Some(quote! { oas3_scaffold_support::Value::Null }),
    Value::Bool(flag) => quote! { #flag },
    Value::Number(number) => match number.as_i64() {
      Some(int) => {
        let literal = Literal::i64_suffixed(int);
        quote! { #literal }
      }
      None => {
        let literal = Literal::f64_suffixed(number.as_f64()?);
        quote! { #literal }
      }
    },
    Value::String(text) => quote! { #text },
    Value::Array(_) | Value::Object(_) => return None,
  };
  Some(quote! { oas3_scaffold_support::Value::from(#inner) })
}
