use anyhow::Context;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::types::type_path;
use crate::generator::ast::{Artifact, BaseType, MethodDef, TypeReference};

pub(crate) fn generate_method(method: &MethodDef) -> anyhow::Result<TokenStream> {
  let tokens = match method {
    MethodDef::FactoryBuild { model } => {
      let model = type_path(model);
      quote! {
        #[must_use]
        pub fn build(&self) -> #model {
          todo!("implement method")
        }
      }
    }
    MethodDef::FactoryList { model } => {
      let model = type_path(model);
      quote! {
        #[must_use]
        pub fn list(&self, params: &oas3_scaffold_support::ListingParams) -> Vec<#model> {
          let items: Vec<#model> = todo!("implement method");
          oas3_scaffold_support::EntityListingService::list(&self.listing_service, &items, params)
        }
      }
    }
    MethodDef::FixtureRow { model, expression } => {
      let model = type_path(model);
      let row = syn::parse_str::<syn::Expr>(expression)
        .with_context(|| format!("fixture row for `{model}` is not a valid expression"))?;
      quote! {
        #[must_use]
        pub fn row() -> #model {
          #row
        }
      }
    }
    // Rendered as part of the `ServerResponse` impl.
    MethodDef::WrapData(_) => quote! {},
  };

  Ok(tokens)
}

/// Support-crate trait impls for artifacts with a base type or a presence tracker.
pub(crate) fn generate_trait_impls(artifact: &Artifact) -> TokenStream {
  let name = format_ident!("{}", artifact.name);
  let presence = artifact.presence_tracker.as_deref().map(|tracker| {
    let tracker = format_ident!("{}", tracker);
    let nested = artifact
      .properties
      .iter()
      .filter(|property| matches!(property.ty.reference, Some(TypeReference::Artifact(_))))
      .map(|property| {
        let field = format_ident!("{}", property.name);
        let wire_name = &property.wire_name;
        quote! {
          oas3_scaffold_support::PresenceTracked::record_supplied(&mut self.#field, &value[#wire_name]);
        }
      });
    quote! {
      impl oas3_scaffold_support::PresenceTracked for #name {
        fn record_supplied(&mut self, value: &oas3_scaffold_support::Value) {
          self.#tracker = oas3_scaffold_support::supplied_keys(value);
          #(#nested)*
        }
      }
    }
  });

  let base = match artifact.base {
    Some(BaseType::Request) => quote! {
      impl oas3_scaffold_support::ServerRequest for #name {}
    },
    Some(BaseType::Response) => {
      let wrap_data = artifact
        .methods
        .iter()
        .find_map(|method| match method {
          MethodDef::WrapData(flag) => Some(*flag),
          _ => None,
        })
        .unwrap_or(true);
      quote! {
        impl oas3_scaffold_support::ServerResponse for #name {
          fn is_wrap_data(&self) -> bool {
            #wrap_data
          }
        }
      }
    }
    None => quote! {},
  };

  quote! {
    #base
    #presence
  }
}
