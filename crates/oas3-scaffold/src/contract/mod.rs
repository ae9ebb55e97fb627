//! The parsed API contract: operations, parameters, bodies, responses and resolved schemas.

mod extensions;
mod loader;
mod schema;

#[cfg(test)]
mod tests;

pub use extensions::Extensions;
use http::Method;
use indexmap::IndexMap;
pub(crate) use loader::parse_contract;
use mediatype::MediaType;
pub use schema::{Schema, SchemaKind, SchemaType};
use strum::Display;

/// Status codes accepted as the success response, in search order.
pub(crate) const SUCCESS_STATUS_CODES: [&str; 3] = ["200", "201", "204"];

/// HTTP methods in the order operations are visited within a path item.
pub(crate) const OPERATION_METHODS: [Method; 8] = [
  Method::GET,
  Method::PUT,
  Method::POST,
  Method::DELETE,
  Method::OPTIONS,
  Method::HEAD,
  Method::PATCH,
  Method::TRACE,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contract {
  pub title: String,
  pub version: String,
  pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
  Cookie,
}

impl ParameterLocation {
  pub(crate) fn parse(value: &str) -> Option<Self> {
    match value {
      "path" => Some(Self::Path),
      "query" => Some(Self::Query),
      "header" => Some(Self::Header),
      "cookie" => Some(Self::Cookie),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct Parameter {
  #[builder(into)]
  pub name: String,
  pub location: ParameterLocation,
  #[builder(default)]
  pub required: bool,
  pub schema: Schema,
  #[builder(default)]
  pub extensions: Extensions,
}

impl Parameter {
  /// Parameter-level `x-type`, falling back to the schema's.
  #[must_use]
  pub fn type_override(&self) -> Option<&str> {
    self
      .extensions
      .type_override
      .as_deref()
      .or(self.schema.extensions.type_override.as_deref())
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaContent {
  pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
  pub required: bool,
  pub content: IndexMap<String, MediaContent>,
}

impl RequestBody {
  #[must_use]
  pub fn json_schema(&self) -> Option<&Schema> {
    json_schema(&self.content)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
  pub description: Option<String>,
  pub content: IndexMap<String, MediaContent>,
  pub extensions: Extensions,
}

impl Response {
  #[must_use]
  pub fn json_schema(&self) -> Option<&Schema> {
    json_schema(&self.content)
  }
}

/// True for `application/json`, with or without parameters such as `charset`.
pub(crate) fn is_json_media_type(content_type: &str) -> bool {
  MediaType::parse(content_type)
    .ok()
    .is_some_and(|media| media.ty.as_str() == "application" && media.subty.as_str() == "json" && media.suffix.is_none())
}

fn json_schema(content: &IndexMap<String, MediaContent>) -> Option<&Schema> {
  content
    .iter()
    .find(|(content_type, _)| is_json_media_type(content_type))
    .and_then(|(_, media)| media.schema.as_ref())
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct Operation {
  #[builder(into)]
  pub url: String,
  pub method: Method,
  #[builder(into)]
  pub operation_id: String,
  #[builder(into)]
  pub summary: Option<String>,
  #[builder(default)]
  pub tags: Vec<String>,
  /// Parameters declared on the path item, shared by every operation of that path.
  #[builder(default)]
  pub path_parameters: Vec<Parameter>,
  #[builder(default)]
  pub parameters: Vec<Parameter>,
  pub request_body: Option<RequestBody>,
  #[builder(default)]
  pub responses: IndexMap<String, Response>,
  #[builder(default)]
  pub extensions: Extensions,
}

impl Operation {
  /// First tag, which names the operation's feature.
  #[must_use]
  pub fn feature_tag(&self) -> Option<&str> {
    self.tags.first().map(String::as_str)
  }

  #[must_use]
  pub fn is_list_params(&self) -> bool {
    self.extensions.is_list_params()
  }

  /// Path-scoped parameters: the path item's, then operation-level `in: path` parameters.
  /// An operation-level parameter replaces a path item parameter of the same name.
  #[must_use]
  pub fn path_params(&self) -> Vec<&Parameter> {
    let overrides = self
      .parameters
      .iter()
      .filter(|param| param.location == ParameterLocation::Path)
      .collect::<Vec<_>>();

    self
      .path_parameters
      .iter()
      .map(|param| {
        overrides
          .iter()
          .copied()
          .find(|candidate| candidate.name == param.name)
          .unwrap_or(param)
      })
      .chain(
        overrides
          .iter()
          .copied()
          .filter(|candidate| !self.path_parameters.iter().any(|param| param.name == candidate.name)),
      )
      .collect()
  }

  /// Operation-level query parameters, the candidates for the query artifact.
  #[must_use]
  pub fn query_params(&self) -> Vec<&Parameter> {
    self
      .parameters
      .iter()
      .filter(|param| param.location == ParameterLocation::Query)
      .collect()
  }

  /// First declared response among `200`, `201` and `204`, with its status code.
  #[must_use]
  pub fn success_response(&self) -> Option<(&'static str, &Response)> {
    SUCCESS_STATUS_CODES
      .iter()
      .find_map(|code| self.responses.get(*code).map(|response| (*code, response)))
  }
}
