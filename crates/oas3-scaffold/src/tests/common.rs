use serde_json::{Value, json};

use crate::{
  contract::{self, Contract},
  generator::CodegenConfig,
  utils::spec::SpecFormat,
};

/// Wraps `paths` and `schemas` into a minimal OpenAPI 3.0 document.
pub(crate) fn spec_document(paths: Value, schemas: Value) -> Value {
  json!({
    "openapi": "3.0.3",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": paths,
    "components": { "schemas": schemas }
  })
}

pub(crate) fn parse(document: &Value) -> Contract {
  contract::parse_contract(&document.to_string(), SpecFormat::Json).expect("test contract should parse")
}

pub(crate) fn parse_paths(paths: Value) -> Contract {
  parse(&spec_document(paths, json!({})))
}

pub(crate) fn default_config() -> CodegenConfig {
  CodegenConfig::builder().build()
}

pub(crate) fn items_contract() -> Contract {
  parse(&items_document())
}

/// One `GET /items` listing endpoint with listing parameters, a `category` filter and a
/// `{data: [{id, name}]}` success payload.
pub(crate) fn items_document() -> Value {
  spec_document(
    json!({
      "/items": {
        "get": {
          "operationId": "listItems",
          "tags": ["Items"],
          "x-list-params": true,
          "parameters": [
            { "name": "filter", "in": "query", "schema": { "type": "object" } },
            { "name": "sort", "in": "query", "schema": { "type": "string" } },
            { "name": "limit", "in": "query", "schema": { "type": "integer" } },
            { "name": "page", "in": "query", "schema": { "type": "integer" } },
            { "name": "category", "in": "query", "schema": { "type": "string" } }
          ],
          "responses": {
            "200": {
              "description": "items",
              "content": {
                "application/json": {
                  "schema": {
                    "type": "object",
                    "properties": {
                      "data": {
                        "type": "array",
                        "items": {
                          "type": "object",
                          "required": ["id", "name"],
                          "properties": {
                            "id": { "type": "integer", "example": 7 },
                            "name": { "type": "string", "example": "Widget" }
                          }
                        }
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }),
    json!({}),
  )
}
