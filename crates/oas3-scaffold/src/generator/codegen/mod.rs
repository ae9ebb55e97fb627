use anyhow::Context;
use proc_macro2::TokenStream;
use quote::quote;

use super::ast::{Annotation, Artifact, Visibility};

pub(crate) mod methods;
pub(crate) mod structs;
pub(crate) mod types;


pub(crate) use types::type_path;

/// Contract details stamped into every file header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub source: String,
}

impl Visibility {
  pub(crate) fn to_tokens(self) -> TokenStream {
    match self {
      Visibility::Public => quote! { pub },
      Visibility::Crate => quote! { pub(crate) },
    }
  }
}

/// Renders an artifact as a formatted Rust source file.
pub fn render(artifact: &Artifact, metadata: &CodeMetadata) -> anyhow::Result<String> {
  let code = structs::StructGenerator::new(artifact).generate()?;
  generate_source(&code, artifact.annotation(), metadata)
}

/// Renders the `mod.rs` of a directory declaring `modules` in the given order.
pub fn render_mod_file(modules: &[String], metadata: &CodeMetadata) -> anyhow::Result<String> {
  let modules = modules
    .iter()
    .map(|module| syn::parse_str::<syn::Ident>(module).with_context(|| format!("'{module}' is not a module name")))
    .collect::<anyhow::Result<Vec<_>>>()?;
  let code = quote! {
    #(pub mod #modules;)*
  };
  generate_source(&code, Annotation::Generated, metadata)
}

pub(crate) fn generate_source(
  code: &TokenStream,
  annotation: Annotation,
  metadata: &CodeMetadata,
) -> anyhow::Result<String> {
  let syntax_tree = syn::parse2(code.clone())?;
  let formatted = prettyplease::unparse(&syntax_tree);
  Ok(format!("{}\n{formatted}", header(annotation, metadata)))
}

fn header(annotation: Annotation, metadata: &CodeMetadata) -> String {
  let banner = match annotation {
    Annotation::Generated => "AUTO-GENERATED CODE - DO NOT EDIT!",
    Annotation::Scaffold => "SCAFFOLD - written once by `oas3-scaffold`, safe to edit.",
  };

  format!(
    r"//! {banner}
//!
//! {} {}
//! Source: {}
//! Generated by `oas3-scaffold`",
    metadata.title, metadata.version, metadata.source
  )
}
