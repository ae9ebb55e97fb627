use std::collections::HashSet;

use anyhow::{Context, anyhow, bail};
use http::Method;
use indexmap::{IndexMap, IndexSet};
use oas3::OpenApiV3Spec;
use serde_json::{Map, Value};

use super::{
  Contract, Extensions, MediaContent, OPERATION_METHODS, Operation, Parameter, ParameterLocation, RequestBody,
  Response, Schema, SchemaType,
};
use crate::{
  generator::{
    errors::{GenerationError, GenerationResult},
    naming::operations::generate_operation_id,
  },
  utils::spec::SpecFormat,
};

/// Validates `text` as an OpenAPI 3.x document and reads it into a [`Contract`].
///
/// Every failure, including unresolvable or cyclic `$ref`s, is reported as
/// [`GenerationError::ContractInvalid`].
pub(crate) fn parse_contract(text: &str, format: SpecFormat) -> GenerationResult<Contract> {
  let invalid = |err: anyhow::Error| GenerationError::contract(format!("{err:#}"));

  validate(text, format).map_err(invalid)?;
  let document = to_document(text, format).map_err(invalid)?;
  ContractReader { document: &document }.read().map_err(invalid)
}

fn validate(text: &str, format: SpecFormat) -> anyhow::Result<()> {
  match format {
    SpecFormat::Json => {
      serde_json::from_str::<OpenApiV3Spec>(text)?;
    }
    SpecFormat::Yaml => {
      oas3::from_yaml(text)?;
    }
  }
  Ok(())
}

fn to_document(text: &str, format: SpecFormat) -> anyhow::Result<Value> {
  Ok(match format {
    SpecFormat::Json => serde_json::from_str(text)?,
    SpecFormat::Yaml => serde_yaml::from_str(text)?,
  })
}

fn escape_segment(segment: &str) -> String {
  segment.replace('~', "~0").replace('/', "~1")
}

fn child_pointer(parent: &str, segment: &str) -> String {
  format!("{parent}/{}", escape_segment(segment))
}

/// Unescaped last segment of a JSON pointer.
pub(crate) fn last_segment(pointer: &str) -> String {
  pointer
    .rsplit('/')
    .next()
    .unwrap_or_default()
    .replace("~1", "/")
    .replace("~0", "~")
}

struct Resolved<'a> {
  value: &'a Value,
  pointer: String,
  reference: Option<String>,
}

struct ContractReader<'a> {
  document: &'a Value,
}

impl<'a> ContractReader<'a> {
  fn read(&self) -> anyhow::Result<Contract> {
    let info = self.document.get("info");
    let info_field = |key: &str| {
      info
        .and_then(|info| info.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
    };

    let mut operations = vec![];
    if let Some(paths) = self.document.get("paths").and_then(Value::as_object) {
      for (url, item) in paths {
        let item = self.resolve(item, child_pointer("/paths", url))?;
        operations.extend(
          self
            .read_path_item(url, &item)
            .with_context(|| format!("path '{url}'"))?,
        );
      }
    }

    Ok(Contract {
      title: info_field("title"),
      version: info_field("version"),
      operations,
    })
  }

  /// Follows a chain of local `$ref`s to the referenced value.
  fn resolve(&self, value: &'a Value, pointer: String) -> anyhow::Result<Resolved<'a>> {
    let mut current: &'a Value = value;
    let mut pointer = pointer;
    let mut reference = None;
    let mut visited = HashSet::new();

    while let Some(target) = current.get("$ref").and_then(Value::as_str) {
      let local = target
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("external reference '{target}' is not supported"))?;
      if !visited.insert(local) {
        bail!("cyclic reference chain through '{target}'");
      }
      current = self
        .document
        .pointer(local)
        .ok_or_else(|| anyhow!("unresolvable reference '{target}'"))?;
      pointer = local.to_string();
      reference = Some(target.to_string());
    }

    Ok(Resolved {
      value: current,
      pointer,
      reference,
    })
  }

  fn read_path_item(&self, url: &str, item: &Resolved<'a>) -> anyhow::Result<Vec<Operation>> {
    let shared = self.read_parameters(item.value.get("parameters"), &format!("{}/parameters", item.pointer))?;

    let mut operations = vec![];
    for method in &OPERATION_METHODS {
      let key = method.as_str().to_ascii_lowercase();
      let Some(operation) = item.value.get(key.as_str()) else {
        continue;
      };
      let pointer = child_pointer(&item.pointer, &key);
      operations.push(
        self
          .read_operation(url, method, operation, &pointer, &shared)
          .with_context(|| format!("operation '{method} {url}'"))?,
      );
    }
    Ok(operations)
  }

  fn read_operation(
    &self,
    url: &str,
    method: &Method,
    operation: &'a Value,
    pointer: &str,
    shared: &[Parameter],
  ) -> anyhow::Result<Operation> {
    let object = operation
      .as_object()
      .ok_or_else(|| anyhow!("operation must be an object"))?;

    let operation_id = object
      .get("operationId")
      .and_then(Value::as_str)
      .map_or_else(|| generate_operation_id(method, url), String::from);

    let tags = object
      .get("tags")
      .and_then(Value::as_array)
      .map(|tags| tags.iter().filter_map(Value::as_str).map(String::from).collect())
      .unwrap_or_default();

    let parameters = self.read_parameters(object.get("parameters"), &format!("{pointer}/parameters"))?;

    let request_body = object
      .get("requestBody")
      .map(|body| self.read_request_body(body, format!("{pointer}/requestBody")))
      .transpose()?;

    let mut responses = IndexMap::new();
    if let Some(declared) = object.get("responses").and_then(Value::as_object) {
      let responses_pointer = format!("{pointer}/responses");
      for (status, response) in declared {
        let response = self
          .read_response(response, child_pointer(&responses_pointer, status))
          .with_context(|| format!("response '{status}'"))?;
        responses.insert(status.clone(), response);
      }
    }

    Ok(
      Operation::builder()
        .url(url)
        .method(method.clone())
        .operation_id(operation_id)
        .maybe_summary(object.get("summary").and_then(Value::as_str))
        .tags(tags)
        .path_parameters(shared.to_vec())
        .parameters(parameters)
        .maybe_request_body(request_body)
        .responses(responses)
        .extensions(Extensions::from_object(object))
        .build(),
    )
  }

  fn read_parameters(&self, value: Option<&'a Value>, pointer: &str) -> anyhow::Result<Vec<Parameter>> {
    let Some(entries) = value.and_then(Value::as_array) else {
      return Ok(vec![]);
    };

    entries
      .iter()
      .enumerate()
      .map(|(index, entry)| self.read_parameter(entry, format!("{pointer}/{index}")))
      .collect()
  }

  fn read_parameter(&self, value: &'a Value, pointer: String) -> anyhow::Result<Parameter> {
    let resolved = self.resolve(value, pointer)?;
    let object = resolved
      .value
      .as_object()
      .ok_or_else(|| anyhow!("parameter at '{}' must be an object", resolved.pointer))?;

    let name = object
      .get("name")
      .and_then(Value::as_str)
      .ok_or_else(|| anyhow!("parameter at '{}' has no name", resolved.pointer))?;
    let location = object
      .get("in")
      .and_then(Value::as_str)
      .and_then(ParameterLocation::parse)
      .ok_or_else(|| anyhow!("parameter '{name}' has no valid location"))?;

    let schema = match object.get("schema") {
      Some(schema) => self.read_schema(schema, format!("{}/schema", resolved.pointer), &mut vec![])?,
      None => Schema::builder().name(name).pointer(resolved.pointer.clone()).build(),
    };

    Ok(
      Parameter::builder()
        .name(name)
        .location(location)
        .required(object.get("required").and_then(Value::as_bool).unwrap_or(false))
        .schema(schema)
        .extensions(Extensions::from_object(object))
        .build(),
    )
  }

  fn read_request_body(&self, value: &'a Value, pointer: String) -> anyhow::Result<RequestBody> {
    let resolved = self.resolve(value, pointer)?;
    Ok(RequestBody {
      required: resolved.value.get("required").and_then(Value::as_bool).unwrap_or(false),
      content: self.read_content(resolved.value.get("content"), &resolved.pointer)?,
    })
  }

  fn read_response(&self, value: &'a Value, pointer: String) -> anyhow::Result<Response> {
    let resolved = self.resolve(value, pointer)?;
    let extensions = resolved
      .value
      .as_object()
      .map(Extensions::from_object)
      .unwrap_or_default();

    Ok(Response {
      description: resolved.value.get("description").and_then(Value::as_str).map(String::from),
      content: self.read_content(resolved.value.get("content"), &resolved.pointer)?,
      extensions,
    })
  }

  fn read_content(&self, value: Option<&'a Value>, parent: &str) -> anyhow::Result<IndexMap<String, MediaContent>> {
    let Some(entries) = value.and_then(Value::as_object) else {
      return Ok(IndexMap::new());
    };

    let content_pointer = format!("{parent}/content");
    let mut content = IndexMap::new();
    for (media_type, entry) in entries {
      let schema = entry
        .get("schema")
        .map(|schema| {
          let pointer = format!("{}/schema", child_pointer(&content_pointer, media_type));
          self.read_schema(schema, pointer, &mut vec![])
        })
        .transpose()?;
      content.insert(media_type.clone(), MediaContent { schema });
    }
    Ok(content)
  }

  /// Reads a schema, following references. `stack` holds the references currently being expanded
  /// so that a recursive schema is reported instead of expanded forever.
  fn read_schema(&self, value: &'a Value, pointer: String, stack: &mut Vec<String>) -> anyhow::Result<Schema> {
    let resolved = self.resolve(value, pointer)?;

    let Some(reference) = resolved.reference.clone() else {
      return self.read_schema_object(&resolved, stack);
    };

    if stack.contains(&reference) {
      bail!("cyclic schema reference '{reference}' ({})", stack.join(" -> "));
    }
    stack.push(reference);
    let schema = self.read_schema_object(&resolved, stack);
    stack.pop();
    schema
  }

  fn read_schema_object(&self, resolved: &Resolved<'a>, stack: &mut Vec<String>) -> anyhow::Result<Schema> {
    let name = last_segment(&resolved.pointer);
    let Some(object) = resolved.value.as_object() else {
      return Ok(
        Schema::builder()
          .name(name)
          .pointer(resolved.pointer.clone())
          .maybe_reference(resolved.reference.clone())
          .build(),
      );
    };

    let (schema_type, type_nullable) = read_type(object.get("type"));
    let pointer = &resolved.pointer;

    let mut properties = IndexMap::new();
    if let Some(declared) = object.get("properties").and_then(Value::as_object) {
      let properties_pointer = format!("{pointer}/properties");
      for (key, property) in declared {
        let property = self.read_schema(property, child_pointer(&properties_pointer, key), stack)?;
        properties.insert(key.clone(), property);
      }
    }

    let items = match object.get("items").filter(|items| items.is_object()) {
      Some(items) => Some(Box::new(self.read_schema(items, format!("{pointer}/items"), stack)?)),
      None => None,
    };

    let mut all_of = vec![];
    if let Some(fragments) = object.get("allOf").and_then(Value::as_array) {
      for (index, fragment) in fragments.iter().enumerate() {
        all_of.push(self.read_schema(fragment, format!("{pointer}/allOf/{index}"), stack)?);
      }
    }

    Ok(
      Schema::builder()
        .name(name)
        .pointer(pointer.clone())
        .maybe_reference(resolved.reference.clone())
        .maybe_schema_type(schema_type)
        .properties(properties)
        .required(read_required(object))
        .maybe_nullable(object.get("nullable").and_then(Value::as_bool).or(type_nullable))
        .maybe_default(non_null(object.get("default")))
        .enum_values(
          object
            .get("enum")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        )
        .maybe_example(non_null(object.get("example")).or_else(|| first_example(object)))
        .maybe_items(items)
        .all_of(all_of)
        .extensions(Extensions::from_object(object))
        .build(),
    )
  }
}

/// Reads `type`, accepting the 3.1 array form where `"null"` marks the schema nullable.
fn read_type(value: Option<&Value>) -> (Option<SchemaType>, Option<bool>) {
  match value {
    Some(Value::String(name)) => (name.parse().ok(), None),
    Some(Value::Array(names)) => {
      let names = names.iter().filter_map(Value::as_str).collect::<Vec<_>>();
      let schema_type = names
        .iter()
        .find(|name| **name != "null")
        .and_then(|name| name.parse().ok());
      (schema_type, names.contains(&"null").then_some(true))
    }
    _ => (None, None),
  }
}

fn read_required(object: &Map<String, Value>) -> IndexSet<String> {
  object
    .get("required")
    .and_then(Value::as_array)
    .map(|names| names.iter().filter_map(Value::as_str).map(String::from).collect())
    .unwrap_or_default()
}

fn non_null(value: Option<&Value>) -> Option<Value> {
  value.filter(|value| !value.is_null()).cloned()
}

fn first_example(object: &Map<String, Value>) -> Option<Value> {
  non_null(object.get("examples").and_then(Value::as_array).and_then(|examples| examples.first()))
}
