mod common;

use pretty_assertions::assert_eq;
use serde_yaml::Value;
use std::fs;
use velgen_core::openapi::document::Document;
use velgen_core::{
    generate_openapi, generate_openapi_to_file, AppError, ApiType, OperationDescriptor,
    SchemaConfig,
};

fn operations() -> Vec<OperationDescriptor> {
    let mut ops = common::operations();
    ops[0] = ops[0].clone().with_spec(common::documented_spec());
    ops
}

fn yaml(ops: &[OperationDescriptor]) -> String {
    let mut out = Vec::new();
    generate_openapi(ops, &mut out, &SchemaConfig::new("Test API", "1.0.0")).unwrap();
    String::from_utf8(out).unwrap()
}

fn document() -> Value {
    serde_yaml::from_str(&yaml(&operations())).unwrap()
}

fn strings(value: &Value) -> Vec<&str> {
    value
        .as_sequence()
        .map(|seq| seq.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn test_document_header() {
    let doc = document();
    assert_eq!(doc["openapi"].as_str(), Some("3.0.0"));
    assert_eq!(doc["info"]["title"].as_str(), Some("Test API"));
    let paths: Vec<&str> = doc["paths"]
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(paths, vec!["/test1", "/test2", "/testEmpty", "/testGet", "/testTime"]);
}

#[test]
fn test_components_are_sorted_and_unique() {
    let doc = document();
    let names: Vec<&str> = doc["components"]["schemas"]
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 14);
    assert!(!names.contains(&"Empty"));
}

#[test]
fn test_empty_operation_has_no_bodies() {
    let doc = document();
    let op = &doc["paths"]["/testEmpty"]["post"];
    assert!(op.get("requestBody").is_none());
    assert!(op["responses"]["200"].get("content").is_none());
    assert_eq!(op["responses"]["200"]["description"].as_str(), Some("Success"));
}

#[test]
fn test_get_query_parameters() {
    let doc = document();
    let op = &doc["paths"]["/testGet"]["get"];
    assert!(op.get("requestBody").is_none());

    let params = op["parameters"].as_sequence().unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0]["name"].as_str(), Some("value"));
    assert_eq!(params[0]["in"].as_str(), Some("query"));
    assert_eq!(params[0]["required"].as_bool(), Some(true));
    assert_eq!(params[0]["schema"]["type"].as_str(), Some("string"));
    assert_eq!(params[1]["name"].as_str(), Some("field"));
    assert_eq!(params[1]["schema"]["type"].as_str(), Some("integer"));

    assert_eq!(
        op["responses"]["200"]["content"]["application/json"]["schema"]["$ref"].as_str(),
        Some("#/components/schemas/GetResp")
    );
}

#[test]
fn test_headers_carry_validation() {
    let doc = document();
    let op = &doc["paths"]["/test1"]["post"];
    assert_eq!(op["description"].as_str(), Some("Test endpoint with headers"));

    let header = &op["parameters"][0];
    assert_eq!(header["name"].as_str(), Some("X-API-Key"));
    assert_eq!(header["in"].as_str(), Some("header"));
    assert_eq!(header["required"].as_bool(), Some(true));
    assert_eq!(header["example"].as_str(), Some("treenq_12341234"));

    let rate = &op["responses"]["200"]["headers"]["X-Rate-Limit"];
    assert_eq!(rate["description"].as_str(), Some("Rate limit remaining"));
    assert!(rate.get("required").is_none());
    assert_eq!(rate["schema"]["type"].as_str(), Some("integer"));
    assert_eq!(rate["schema"]["minimum"].as_i64(), Some(1));
    assert_eq!(rate["schema"]["maximum"].as_i64(), Some(3));
    assert_eq!(strings(&rate["schema"]["enum"]), vec!["1", "2", "3"]);

    assert_eq!(
        op["requestBody"]["content"]["application/json"]["schema"]["$ref"].as_str(),
        Some("#/components/schemas/NoJsonTags")
    );
}

#[test]
fn test_errors_share_one_response_per_status() {
    let doc = document();
    let response = &doc["paths"]["/test1"]["post"]["responses"]["400"];
    assert_eq!(
        response["description"].as_str(),
        Some("Error codes:\n  * `ERROR_CODE` - meaningful text\n  * `OTHER_CODE` - another text")
    );

    let body = &response["content"]["application/json"]["schema"];
    assert_eq!(strings(&body["required"]), vec!["code"]);
    assert_eq!(
        strings(&body["properties"]["code"]["enum"]),
        vec!["ERROR_CODE", "OTHER_CODE"]
    );

    let meta = &body["properties"]["meta"];
    assert_eq!(meta["type"].as_str(), Some("object"));
    assert_eq!(meta["properties"]["field"]["minLength"].as_u64(), Some(3));
    assert_eq!(meta["properties"]["field"]["maxLength"].as_u64(), Some(64));
    assert_eq!(meta["properties"]["field"]["description"].as_str(), Some("some field"));
    assert_eq!(meta["properties"]["attempt"]["type"].as_str(), Some("integer"));
}

#[test]
fn test_object_schemas() {
    let doc = document();
    let nested = &doc["components"]["schemas"]["NestedTypes"];
    assert_eq!(nested["type"].as_str(), Some("object"));
    assert_eq!(strings(&nested["required"]), vec!["data", "chunk", "slice", "map"]);

    let props = &nested["properties"];
    assert_eq!(props["data"]["$ref"].as_str(), Some("#/components/schemas/TestStruct"));
    assert_eq!(props["chunk"]["type"].as_str(), Some("array"));
    assert_eq!(props["chunk"]["items"]["type"].as_str(), Some("integer"));
    assert_eq!(
        props["slice"]["items"]["$ref"].as_str(),
        Some("#/components/schemas/HighElem")
    );
    assert_eq!(props["map"]["type"].as_str(), Some("object"));
    assert_eq!(
        props["map"]["additionalProperties"]["$ref"].as_str(),
        Some("#/components/schemas/HighMapElem")
    );
    assert_eq!(
        props["nextP"]["$ref"].as_str(),
        Some("#/components/schemas/HighPointer")
    );

    let time = &doc["components"]["schemas"]["TimeRequest"]["properties"]["createdAt"];
    assert_eq!(time["type"].as_str(), Some("string"));
    assert_eq!(time["format"].as_str(), Some("date-time"));
}

#[test]
fn test_document_text() {
    assert_eq!(yaml(&operations()), include_str!("golden/openapi.yaml"));
}

#[test]
fn test_quoted_scalars_use_double_quotes() {
    let text = yaml(&operations());
    assert!(text.contains("        \"200\":\n"));
    assert!(text.contains("$ref: \"#/components/schemas/NoJsonTags\"\n"));
    assert!(!text.contains('\''));
}

#[test]
fn test_properties_are_sorted() {
    let doc = document();
    let keys = |schema: &Value| -> Vec<String> {
        schema["properties"]
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    };
    assert_eq!(
        keys(&doc["components"]["schemas"]["NestedTypes"]),
        vec!["chunk", "data", "map", "nextP", "slice"]
    );
    let error = &doc["paths"]["/test1"]["post"]["responses"]["400"]["content"]
        ["application/json"]["schema"];
    assert_eq!(keys(&error["properties"]["meta"]), vec!["attempt", "field"]);
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let first = yaml(&operations());
    let second = yaml(&operations());
    assert_eq!(first, second);

    let parsed: Document = serde_yaml::from_str(&first).unwrap();
    assert_eq!(parsed.components.schemas.len(), 14);
}

#[test]
fn test_cyclic_types_are_rejected() {
    #[derive(ApiType)]
    #[allow(dead_code)]
    struct Category {
        name: String,
        children: Vec<Category>,
    }

    let ops = vec![OperationDescriptor::get::<(), Category>("tree")];
    let mut out = Vec::new();
    let err = generate_openapi(&ops, &mut out, &SchemaConfig::default()).unwrap_err();
    match err {
        AppError::CyclicType { chain } => assert_eq!(chain, vec!["Category", "Category"]),
        other => panic!("expected CyclicType, got {other:?}"),
    }
    assert!(out.is_empty());
}

#[test]
fn test_document_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    generate_openapi_to_file(&operations(), &path, &SchemaConfig::default()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), {
        let mut out = Vec::new();
        generate_openapi(&operations(), &mut out, &SchemaConfig::default()).unwrap();
        String::from_utf8(out).unwrap()
    });
}
