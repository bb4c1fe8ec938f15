//! End-to-end parser tests over realistic documents.

use mapi_core::{AuthDescriptor, AuthMode, CapabilityKind, HttpMethod, ParameterLocation};
use mapi_parser::{
    extract_intent_keywords, extract_openapi_intent_keywords, normalize_operation_id,
    parse_mapi_document, parse_openapi_document,
};

const PAYMENTS_MAPI: &str = r"# Payments API

Accept card payments and receive settlement notifications.

~~~meta
version: 2024-06-01
base_url: https://api.payments.test/v2
auth: api_key
auth_header: X-Payments-Key
auth_docs_url: https://docs.payments.test/auth
~~~

## Global Types

```typescript
interface Money {
  amount: number;
  currency: string;
}
```

## Capability: Create Charge
~~~meta
id: charges.create
transport: HTTP POST /charges
idempotent: false
~~~

### Intention
Creates a charge against a card. Use for one-off payments.

### Input
```typescript
interface CreateChargeInput {
  amount: Money;
  source: string;
}
```

### Logic Constraints
- amount must be positive

## Webhook: Charge Settled
~~~meta
id: charges.settled
transport: WEBHOOK charge.settled
auth: none
~~~

### Intention
Sends a notification when a charge settles.

## Tool: Broken Tool
~~~meta
transport: CLI refund
~~~

## Tool: Refund Calculator
~~~meta
id: refunds.calculate
transport: LOCAL refund-calc
deprecated: true
~~~
";

const PETSTORE_YAML: &str = r"
openapi: 3.0.3
info:
  title: Petstore
  description: A sample pet store.
  version: 1.0.7
servers:
  - url: https://petstore.test/v1
  - url: https://staging.petstore.test/v1
components:
  securitySchemes:
    petstore_auth:
      type: oauth2
      flows:
        implicit:
          authorizationUrl: https://petstore.test/oauth
          scopes:
            read:pets: read your pets
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
        name:
          type: string
        status:
          type: string
          enum: [available, sold]
    Pets:
      type: array
      items:
        $ref: '#/components/schemas/Pet'
paths:
  /pets:
    get:
      operationId: listPets
      summary: List all pets
      tags: [pets]
      parameters:
        - name: limit
          in: query
          description: How many items to return
          schema:
            type: integer
      responses:
        200:
          description: A paged array of pets
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Pets'
    post:
      operationId: createPet
      summary: Create a pet
      security:
        - petstore_auth: ['write:pets']
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Pet'
      responses:
        '201':
          description: Created
  /pets/{petId}:
    get:
      summary: Info for a specific pet
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
      responses:
        '200':
          description: Expected response to a valid request
";

#[test]
fn test_mapi_document_end_to_end() {
    let doc = parse_mapi_document(PAYMENTS_MAPI);

    assert_eq!(doc.title, "Payments API");
    assert_eq!(
        doc.description.as_deref(),
        Some("Accept card payments and receive settlement notifications.")
    );
    assert_eq!(doc.meta.auth, Some(AuthMode::ApiKey));
    assert_eq!(doc.meta.auth_header.as_deref(), Some("X-Payments-Key"));
    assert_eq!(doc.meta.version.as_deref(), Some("2024-06-01"));
    assert!(doc.global_types.as_deref().unwrap().starts_with("interface Money"));

    let ids: Vec<_> = doc.capabilities.iter().map(|c| c.meta.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["charges.create", "charges.settled", "refunds.calculate"]
    );

    let kinds: Vec<_> = doc.capabilities.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CapabilityKind::Capability,
            CapabilityKind::Webhook,
            CapabilityKind::Tool
        ]
    );

    let charge = &doc.capabilities[0];
    assert_eq!(
        charge.logic_constraints.as_deref(),
        Some("- amount must be positive")
    );
    assert!(charge.input.as_deref().unwrap().contains("amount: Money;"));
    assert!(charge.raw_content.contains("Money"));
    assert_eq!(charge.meta.idempotent, Some(false));

    assert_eq!(doc.capabilities[2].meta.deprecated, Some(true));
}

#[test]
fn test_mapi_keywords_cover_id_segments() {
    let doc = parse_mapi_document(PAYMENTS_MAPI);
    for cap in &doc.capabilities {
        let text = cap.intention.as_deref().unwrap_or(&cap.name);
        let keywords = extract_intent_keywords(text, &cap.meta.id);
        for segment in cap.meta.id.split('.') {
            assert!(
                keywords.iter().any(|k| k == segment),
                "{segment} missing from {keywords:?}"
            );
        }
    }
}

#[test]
fn test_openapi_yaml_end_to_end() {
    let doc = parse_openapi_document(PETSTORE_YAML).unwrap();

    assert_eq!(doc.title, "Petstore");
    assert_eq!(doc.description.as_deref(), Some("A sample pet store."));
    assert_eq!(doc.version, "1.0.7");
    assert_eq!(doc.base_url, "https://petstore.test/v1");
    assert!(matches!(doc.auth, Some(AuthDescriptor::OAuth2 { .. })));

    let schema_names: Vec<_> = doc.schemas.keys().map(String::as_str).collect();
    assert_eq!(schema_names, vec!["Pet", "Pets"]);

    let summary: Vec<_> = doc
        .operations
        .iter()
        .map(|op| (op.method, op.operation_id.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (HttpMethod::Get, "listPets"),
            (HttpMethod::Post, "createPet"),
            (HttpMethod::Get, "get_pets_petId"),
        ]
    );

    let list = &doc.operations[0];
    assert_eq!(list.parameters[0].location, ParameterLocation::Query);
    assert!(list.responses.contains_key("200"));
    assert!(list.security.is_empty());

    let create = &doc.operations[1];
    assert_eq!(create.security.len(), 1);
    assert!(create.request_body.as_ref().unwrap().required);
    assert_eq!(
        create.request_body.as_ref().unwrap().content["application/json"].schema,
        Some(doc.schemas["Pet"].clone())
    );

    let by_id = &doc.operations[2];
    assert!(by_id.parameters[0].required);
    assert_eq!(normalize_operation_id(&by_id.operation_id), "get.pets.pet.id");
}

#[test]
fn test_openapi_keywords_include_method_and_tags() {
    let doc = parse_openapi_document(PETSTORE_YAML).unwrap();
    let list = &doc.operations[0];
    let keywords = extract_openapi_intent_keywords(list, &normalize_operation_id(&list.operation_id));
    assert_eq!(keywords, vec!["list", "pets", "get"]);
}

#[test]
fn test_openapi_json_document() {
    let doc = parse_openapi_document(
        r#"{
            "swagger": "2.0",
            "info": {"title": "Legacy", "version": "0.9"},
            "paths": {
                "/items": {
                    "options": {"operationId": "items_options"},
                    "put": {"operationId": "replaceItems", "deprecated": true}
                }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(doc.title, "Legacy");
    assert_eq!(doc.version, "0.9");
    let ids: Vec<_> = doc
        .operations
        .iter()
        .map(|op| normalize_operation_id(&op.operation_id))
        .collect();
    assert_eq!(ids, vec!["replace.items", "items.options"]);
    assert!(doc.operations[0].deprecated);
}
