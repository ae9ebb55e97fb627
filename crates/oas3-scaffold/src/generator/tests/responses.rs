use serde_json::{Value, json};

use crate::{
  contract::Operation,
  generator::{
    GenerationError,
    ast::{ArtifactKind, BaseType, ElementType, MethodDef, Namespace, ScalarKind, TypeReference},
    responses::ResponseGenerator,
  },
  tests::common::{default_config, items_contract, parse, parse_paths, spec_document},
};

fn operation_with_responses(responses: Value) -> Operation {
  let contract = parse_paths(json!({
    "/orders": {
      "post": {
        "operationId": "createOrder",
        "tags": ["orders"],
        "responses": responses
      }
    }
  }));
  contract.operations[0].clone()
}

fn json_response(schema: Value) -> Value {
  json!({
    "description": "ok",
    "content": { "application/json": { "schema": schema } }
  })
}

fn data_of(properties: Value) -> Value {
  json!({ "type": "object", "properties": { "data": properties } })
}

#[test]
fn test_listing_response_models_array_data() -> anyhow::Result<()> {
  let config = default_config();
  let collection = ResponseGenerator::new(&config).generate(&items_contract().operations[0])?;

  let models = Namespace::new(["api", "Items", "models"]);
  let response = collection
    .get(&Namespace::new(["api", "Items", "responses"]).qualify("ListItemsResponse"))
    .expect("response");
  assert!(collection.contains(&models.qualify("ItemsModel")));
  assert!(collection.contains(&Namespace::new(["api", "Items", "factories"]).qualify("ItemsModelFactory")));
  assert_eq!(collection.len(), 3);

  assert_eq!(response.base, Some(BaseType::Response));
  assert_eq!(response.methods, [MethodDef::WrapData(true)]);

  let data = response.property("data").expect("data");
  assert!(data.setter);
  assert!(!data.ty.is_optional());
  assert_eq!(data.ty.element, Some(ElementType::Artifact(models.qualify("ItemsModel"))));
  Ok(())
}

#[test]
fn test_first_success_status_wins() -> anyhow::Result<()> {
  let config = default_config();
  let operation = operation_with_responses(json!({
    "404": { "description": "missing" },
    "201": json_response(data_of(json!({ "type": "string" })))
  }));

  let collection = ResponseGenerator::new(&config).generate(&operation)?;
  let response = collection.iter().next().expect("response");

  assert_eq!(response.name, "CreateOrderResponse");
  assert!(response.docs.iter().any(|line| line.starts_with("`201` response")));
  assert_eq!(
    response.property("data").expect("data").ty.scalar,
    Some(ScalarKind::String)
  );
  Ok(())
}

#[test]
fn test_missing_success_response_is_fatal() {
  let config = default_config();
  let operation = operation_with_responses(json!({ "404": { "description": "missing" } }));

  assert_eq!(
    ResponseGenerator::new(&config).generate(&operation).map(|collection| collection.len()),
    Err(GenerationError::MissingResponse {
      operation: "createOrder".to_string()
    })
  );
}

#[test]
fn test_no_json_content_shares_empty_response() -> anyhow::Result<()> {
  let config = default_config();
  let operation = operation_with_responses(json!({
    "204": { "description": "no content", "x-feature": "audit" }
  }));

  let collection = ResponseGenerator::new(&config).generate(&operation)?;
  let empty = collection
    .get(&Namespace::new(["api", "Audit", "responses"]).qualify("EmptyResponse"))
    .expect("empty response");

  assert_eq!(collection.len(), 1);
  assert_eq!(empty.methods, [MethodDef::WrapData(false)]);
  assert!(empty.properties.is_empty());
  Ok(())
}

#[test]
fn test_feature_precedence() -> anyhow::Result<()> {
  let config = default_config();
  let document = spec_document(
    json!({
      "/orders/{id}": {
        "get": {
          "operationId": "getOrder",
          "tags": ["orders"],
          "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }],
          "responses": {
            "200": json_response(json!({ "$ref": "#/components/schemas/OrderEnvelope" }))
          }
        }
      }
    }),
    json!({
      "OrderEnvelope": {
        "type": "object",
        "x-feature": "billing",
        "properties": {
          "data": {
            "type": "object",
            "properties": { "total": { "type": "number" } }
          }
        }
      }
    }),
  );
  let collection = ResponseGenerator::new(&config).generate(&parse(&document).operations[0])?;

  // The response follows the schema's feature, the data model stays with the operation.
  assert!(collection.contains(&Namespace::new(["api", "Billing", "responses"]).qualify("GetOrderResponse")));
  assert!(collection.contains(&Namespace::new(["api", "Orders", "models"]).qualify("DataModel")));
  Ok(())
}

#[test]
fn test_wrap_data_flag_and_composed_schema() -> anyhow::Result<()> {
  let config = default_config();
  let operation = operation_with_responses(json!({
    "200": {
      "description": "ok",
      "x-wrap-data": false,
      "content": {
        "application/json": {
          "schema": {
            "allOf": [
              { "type": "object", "properties": { "meta": { "type": "object" } } },
              data_of(json!({ "type": "array", "items": { "type": "integer" } }))
            ]
          }
        }
      }
    }
  }));

  let collection = ResponseGenerator::new(&config).generate(&operation)?;
  let response = collection.iter().last().expect("response");

  assert_eq!(response.kind, ArtifactKind::Response);
  assert_eq!(response.methods, [MethodDef::WrapData(false)]);
  let data = response.property("data").expect("data from composition fragment");
  assert_eq!(data.ty.element, Some(ElementType::Primitive(ScalarKind::Int)));
  assert_eq!(data.ty.reference, None::<TypeReference>);
  Ok(())
}
