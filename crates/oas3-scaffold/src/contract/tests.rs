use http::Method;
use serde_json::json;

use super::{ParameterLocation, SchemaKind, SchemaType, is_json_media_type, parse_contract};
use crate::{
  generator::errors::GenerationError,
  tests::common::{items_contract, parse, parse_paths, spec_document},
  utils::spec::SpecFormat,
};

#[test]
fn test_reads_operation_descriptor() {
  let contract = items_contract();
  assert_eq!(contract.title, "Test API");
  assert_eq!(contract.operations.len(), 1);

  let operation = &contract.operations[0];
  assert_eq!(operation.url, "/items");
  assert_eq!(operation.method, Method::GET);
  assert_eq!(operation.operation_id, "listItems");
  assert_eq!(operation.feature_tag(), Some("Items"));
  assert!(operation.is_list_params());
  assert_eq!(operation.query_params().len(), 5);
  assert!(operation.path_params().is_empty());
}

#[test]
fn test_properties_keep_declaration_order() {
  let contract = items_contract();
  let (_, response) = contract.operations[0].success_response().expect("200 response");
  let schema = response.json_schema().expect("json schema");
  let items = schema.properties["data"].items.as_deref().expect("array items");

  let names = items.properties.keys().map(String::as_str).collect::<Vec<_>>();
  assert_eq!(names, ["id", "name"]);
  assert_eq!(items.name, "items");
  assert_eq!(items.example, None);
  assert_eq!(items.properties["id"].example, Some(json!(7)));
  assert!(schema.properties["data"].is_array_of_objects());
}

#[test]
fn test_resolves_schema_references_and_keeps_target_name() {
  let document = spec_document(
    json!({
      "/users": {
        "post": {
          "operationId": "createUser",
          "tags": ["users"],
          "requestBody": {
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/UserPayload" } } }
          },
          "responses": { "201": { "description": "created" } }
        }
      }
    }),
    json!({
      "UserPayload": {
        "type": "object",
        "properties": { "nickname": { "type": "string", "nullable": true } }
      }
    }),
  );
  let contract = parse(&document);

  let body = contract.operations[0].request_body.as_ref().expect("request body");
  let schema = body.json_schema().expect("json body");
  assert_eq!(schema.name, "UserPayload");
  assert_eq!(schema.pointer, "/components/schemas/UserPayload");
  assert_eq!(schema.reference.as_deref(), Some("#/components/schemas/UserPayload"));
  assert_eq!(schema.kind(), SchemaKind::Reference);
  assert!(schema.properties["nickname"].is_nullable());
}

#[test]
fn test_resolves_parameter_and_response_references() {
  let document = json!({
    "openapi": "3.0.3",
    "info": { "title": "Refs", "version": "1" },
    "paths": {
      "/items/{id}": {
        "parameters": [{ "$ref": "#/components/parameters/ItemId" }],
        "get": {
          "operationId": "getItem",
          "responses": { "200": { "$ref": "#/components/responses/ItemResponse" } }
        }
      }
    },
    "components": {
      "parameters": {
        "ItemId": { "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }
      },
      "responses": {
        "ItemResponse": {
          "description": "item",
          "x-wrap-data": false,
          "content": { "application/json": { "schema": { "type": "object" } } }
        }
      }
    }
  });
  let contract = parse(&document);
  let operation = &contract.operations[0];

  let path_params = operation.path_params();
  assert_eq!(path_params.len(), 1);
  assert_eq!(path_params[0].name, "id");
  assert_eq!(path_params[0].location, ParameterLocation::Path);
  assert!(path_params[0].required);
  assert_eq!(path_params[0].schema.schema_type, Some(SchemaType::Integer));

  let (status, response) = operation.success_response().expect("success response");
  assert_eq!(status, "200");
  assert!(!response.extensions.wraps_data());
  assert!(response.json_schema().is_some());
}

#[test]
fn test_operation_path_param_replaces_path_item_param() {
  let contract = parse_paths(json!({
    "/orders/{id}": {
      "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
      "get": {
        "operationId": "getOrder",
        "parameters": [
          { "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } },
          { "name": "expand", "in": "query", "schema": { "type": "boolean" } },
          { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
        ],
        "responses": { "200": { "description": "ok" } }
      }
    }
  }));
  let operation = &contract.operations[0];

  let path_params = operation.path_params();
  assert_eq!(path_params.len(), 1);
  assert_eq!(path_params[0].schema.schema_type, Some(SchemaType::Integer));

  let query = operation.query_params();
  assert_eq!(query.len(), 1, "header parameters are not query parameters");
  assert_eq!(query[0].name, "expand");
}

#[test]
fn test_missing_operation_id_is_derived() {
  let contract = parse_paths(json!({
    "/items/{id}": {
      "delete": { "tags": ["Items"], "responses": { "204": { "description": "gone" } } }
    }
  }));
  assert_eq!(contract.operations[0].operation_id, "delete_items_by_id");
}

#[test]
fn test_operations_follow_method_order() {
  let contract = parse_paths(json!({
    "/items": {
      "post": { "operationId": "createItem", "responses": { "201": { "description": "ok" } } },
      "get": { "operationId": "listItems", "responses": { "200": { "description": "ok" } } }
    }
  }));
  let ids = contract
    .operations
    .iter()
    .map(|op| op.operation_id.as_str())
    .collect::<Vec<_>>();
  assert_eq!(ids, ["listItems", "createItem"]);
}

#[test]
fn test_type_array_with_null_marks_nullable() {
  let document = json!({
    "openapi": "3.1.0",
    "info": { "title": "Nullable", "version": "1" },
    "paths": {
      "/notes": {
        "get": {
          "operationId": "listNotes",
          "responses": {
            "200": {
              "description": "ok",
              "content": {
                "application/json": {
                  "schema": { "type": "object", "properties": { "body": { "type": ["string", "null"] } } }
                }
              }
            }
          }
        }
      }
    }
  });
  let contract = parse(&document);
  let (_, response) = contract.operations[0].success_response().expect("response");
  let body = &response.json_schema().expect("schema").properties["body"];
  assert_eq!(body.schema_type, Some(SchemaType::String));
  assert!(body.is_nullable());
}

#[test]
fn test_cyclic_schema_reference_is_contract_error() {
  let document = spec_document(
    json!({
      "/nodes": {
        "get": {
          "operationId": "listNodes",
          "responses": {
            "200": {
              "description": "ok",
              "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Node" } } }
            }
          }
        }
      }
    }),
    json!({
      "Node": {
        "type": "object",
        "properties": { "child": { "$ref": "#/components/schemas/Node" } }
      }
    }),
  );

  let err = parse_contract(&document.to_string(), SpecFormat::Json).unwrap_err();
  match err {
    GenerationError::ContractInvalid { reason } => {
      assert!(reason.contains("cyclic schema reference"), "unexpected reason: {reason}");
    }
    other => panic!("expected ContractInvalid, got {other:?}"),
  }
}

#[test]
fn test_unresolvable_reference_is_contract_error() {
  let document = spec_document(
    json!({
      "/items": {
        "get": {
          "operationId": "listItems",
          "responses": {
            "200": {
              "description": "ok",
              "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Missing" } } }
            }
          }
        }
      }
    }),
    json!({}),
  );

  let err = parse_contract(&document.to_string(), SpecFormat::Json).unwrap_err();
  assert!(matches!(err, GenerationError::ContractInvalid { .. }));
  assert!(err.to_string().contains("Missing"), "error should name the reference: {err}");
}

#[test]
fn test_non_openapi_document_is_rejected() {
  let err = parse_contract("{\"hello\": \"world\"}", SpecFormat::Json).unwrap_err();
  assert!(matches!(err, GenerationError::ContractInvalid { .. }));

  let err = parse_contract("not: [valid", SpecFormat::Yaml).unwrap_err();
  assert!(matches!(err, GenerationError::ContractInvalid { .. }));
}

#[test]
fn test_json_media_type_detection() {
  assert!(is_json_media_type("application/json"));
  assert!(is_json_media_type("application/json; charset=utf-8"));
  assert!(!is_json_media_type("application/problem+json"));
  assert!(!is_json_media_type("text/plain"));
  assert!(!is_json_media_type("not a media type"));
}
