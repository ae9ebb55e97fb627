use proc_macro2::TokenStream;
use anyhow::Context;
use quote::{format_ident, quote};
use syn::Ident;

use super::{
  methods,
  types::{default_value, field_type},
};
use crate::generator::ast::{Artifact, ArtifactKind, GetterPolicy, PropertyDef, Visibility};

/// Renders one artifact as a struct definition plus its inherent and trait impls.
pub(crate) struct StructGenerator<'a> {
  artifact: &'a Artifact,
}

impl<'a> StructGenerator<'a> {
  pub(crate) fn new(artifact: &'a Artifact) -> Self {
    Self { artifact }
  }

  pub(crate) fn generate(&self) -> anyhow::Result<TokenStream> {
    let struct_def = self.generate_struct_definition()?;
    let impl_block = self.generate_impl_block()?;
    let trait_impls = methods::generate_trait_impls(self.artifact);

    Ok(quote! {
      #struct_def
      #impl_block
      #trait_impls
    })
  }

  fn generate_struct_definition(&self) -> anyhow::Result<TokenStream> {
    let name = format_ident!("{}", self.artifact.name);
    let docs = self.artifact.docs.iter().map(|line| format!(" {line}"));
    let derives = derives(self.artifact.kind);

    if self.artifact.properties.is_empty() {
      return Ok(quote! {
        #(#[doc = #docs])*
        #derives
        pub struct #name;
      });
    }

    let fields = self
      .artifact
      .properties
      .iter()
      .map(|property| self.generate_single_field(property))
      .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(quote! {
      #(#[doc = #docs])*
      #derives
      pub struct #name {
        #(#fields),*
      }
    })
  }

  fn generate_single_field(&self, property: &PropertyDef) -> anyhow::Result<TokenStream> {
    let name = format_ident!("{}", property.name);
    let vis = property.visibility.to_tokens();
    let ty = field_type(&property.ty)?;
    let attrs = if has_serde(self.artifact.kind) {
      self.serde_attrs(property)
    } else {
      quote! {}
    };

    Ok(quote! {
      #attrs
      #vis #name: #ty
    })
  }

  /// The tracker is never on the wire. Other fields are renamed to their wire name when the Rust
  /// name differs, and fields with a declared default may be absent.
  fn serde_attrs(&self, property: &PropertyDef) -> TokenStream {
    if self.artifact.is_presence_tracker(property) {
      return quote! { #[serde(skip)] };
    }

    let bare = property.name.strip_prefix("r#").unwrap_or(&property.name);
    let rename = (bare != property.wire_name).then(|| {
      let wire_name = &property.wire_name;
      quote! { #[serde(rename = #wire_name)] }
    });
    let default = (property.ty.has_default() && !property.ty.is_optional()).then(|| quote! { #[serde(default)] });

    quote! {
      #rename
      #default
    }
  }

  fn generate_impl_block(&self) -> anyhow::Result<TokenStream> {
    let name = format_ident!("{}", self.artifact.name);

    let mut items = vec![];
    if !self.artifact.properties.is_empty() {
      items.push(self.generate_constructor()?);
    }
    for property in &self.artifact.properties {
      items.push(self.generate_getter(property)?);
      items.push(generate_setter(property)?);
      items.push(generate_with_method(property)?);
    }
    for method in &self.artifact.methods {
      items.push(methods::generate_method(method)?);
    }

    if items.iter().all(TokenStream::is_empty) {
      return Ok(quote! {});
    }

    Ok(quote! {
      impl #name {
        #(#items)*
      }
    })
  }

  /// `new` takes every field without a declared default, in field order.
  fn generate_constructor(&self) -> anyhow::Result<TokenStream> {
    let mut params = vec![];
    let mut inits = vec![];

    for property in &self.artifact.properties {
      let name = format_ident!("{}", property.name);
      if property.is_constructor_arg() {
        let ty = field_type(&property.ty)?;
        params.push(quote! { #name: #ty });
        inits.push(quote! { #name });
      } else {
        let value = default_value(&property.ty)?;
        inits.push(quote! { #name: #value });
      }
    }

    let allow = (params.len() > 7).then(|| quote! { #[allow(clippy::too_many_arguments)] });

    Ok(quote! {
      #allow
      #[must_use]
      pub fn new(#(#params),*) -> Self {
        Self {
          #(#inits),*
        }
      }
    })
  }

  fn generate_getter(&self, property: &PropertyDef) -> anyhow::Result<TokenStream> {
    let name = format_ident!("{}", property.name);
    let wire_name = &property.wire_name;
    let ty = field_type(&property.ty)?;
    let tracker = || {
      self
        .artifact
        .presence_tracker
        .as_deref()
        .map(|tracker| format_ident!("{}", tracker))
        .with_context(|| format!("'{}' has a deferred getter but no presence tracker", self.artifact.name))
    };

    let getter = match property.getter {
      GetterPolicy::None => quote! {},
      GetterPolicy::Plain => quote! {
        #[must_use]
        pub fn #name(&self) -> &#ty {
          &self.#name
        }
      },
      GetterPolicy::Deferred => {
        let tracker = tracker()?;
        quote! {
          /// `Deferred::Undefined` unless the payload supplied this property.
          #[must_use]
          pub fn #name(&self) -> oas3_scaffold_support::Deferred<#ty> {
            oas3_scaffold_support::deferred(&self.#tracker, #wire_name, &self.#name)
          }
        }
      }
      GetterPolicy::DeferredWithDefault => {
        let tracker = tracker()?;
        let default = default_value(&property.ty)?;
        quote! {
          /// The declared default unless the payload supplied this property.
          #[must_use]
          pub fn #name(&self) -> #ty {
            oas3_scaffold_support::deferred_or(&self.#tracker, #wire_name, &self.#name, #default)
          }
        }
      }
    };

    Ok(getter)
  }
}

/// Models and queries travel both ways, responses are only written.
fn derives(kind: ArtifactKind) -> TokenStream {
  match kind {
    ArtifactKind::Model | ArtifactKind::InputModel | ArtifactKind::Query => quote! {
      #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    },
    ArtifactKind::Response => quote! { #[derive(Debug, Clone, Default, PartialEq, serde::Serialize)] },
    ArtifactKind::Request => quote! { #[derive(Debug, Clone, Default, PartialEq)] },
    ArtifactKind::Factory => quote! { #[derive(Debug, Clone, Default)] },
    ArtifactKind::Fixture => quote! { #[derive(Debug, Clone, Copy, Default)] },
  }
}

fn has_serde(kind: ArtifactKind) -> bool {
  matches!(
    kind,
    ArtifactKind::Model | ArtifactKind::InputModel | ArtifactKind::Query | ArtifactKind::Response
  )
}

fn generate_setter(property: &PropertyDef) -> anyhow::Result<TokenStream> {
  if !property.setter {
    return Ok(quote! {});
  }

  let name = format_ident!("{}", property.name);
  let setter = accessor_ident("set", property);
  let ty = field_type(&property.ty)?;

  Ok(quote! {
    pub fn #setter(&mut self, #name: #ty) -> &mut Self {
      self.#name = #name;
      self
    }
  })
}

/// Builder-style override for defaulted fields that are neither public nor settable.
fn generate_with_method(property: &PropertyDef) -> anyhow::Result<TokenStream> {
  if property.setter || property.visibility == Visibility::Public || !property.ty.has_default() {
    return Ok(quote! {});
  }

  let name = format_ident!("{}", property.name);
  let with = accessor_ident("with", property);
  let ty = field_type(&property.ty)?;

  Ok(quote! {
    #[must_use]
    pub fn #with(mut self, #name: #ty) -> Self {
      self.#name = #name;
      self
    }
  })
}

/// `set_type` rather than `set_r#type`.
fn accessor_ident(prefix: &str, property: &PropertyDef) -> Ident {
  let bare = property.name.strip_prefix("r#").unwrap_or(&property.name);
  format_ident!("{prefix}_{bare}")
}
