#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use velgen_core::{
    ApiType, ErrorSpec, KeyValueSpec, OperationDescriptor, PrimitiveType, Spec, Validation,
};

#[derive(ApiType, Serialize, Deserialize)]
pub struct NoJsonTags {
    pub value: String,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct NestedTypes {
    #[serde(rename = "data")]
    pub data: TestStruct,
    pub chunk: Vec<u8>,
    #[serde(rename = "slice")]
    pub next_level_slice: Vec<HighElem>,
    pub map: HashMap<i64, HighMapElem>,
    #[serde(rename = "nextP")]
    pub next_level_nested_p: Option<HighPointer>,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct TestStruct {
    pub row: i64,
    pub line: String,
    #[serde(rename = "next")]
    pub next_level_nested: NextLevelStruct,
    #[serde(rename = "slice")]
    pub next_level_slice: Vec<NextLevelElem>,
    pub map: HashMap<i64, MapValue>,
    #[serde(rename = "nextP")]
    pub next_level_nested_p: Option<NextLevelStructP>,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct NextLevelStruct {
    pub extra: String,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct NextLevelElem {
    pub int: i64,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct MapValue {
    pub value: String,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct NextLevelStructP {
    pub extra: String,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct HighElem {
    pub int: i64,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct HighMapElem {
    pub value: String,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct HighPointer {
    pub extra: String,
}

#[derive(ApiType, Serialize, Deserialize)]
pub struct Empty {}

#[derive(ApiType, Serialize, Deserialize)]
pub struct GetQuery {
    #[api(query = "value")]
    pub value: String,
    #[api(query = "field")]
    pub field: i64,
}

#[derive(ApiType, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetResp {
    pub getting: i64,
}

#[derive(ApiType, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRequest {
    pub created_at: DateTime<Utc>,
    pub name: String,
}

#[derive(ApiType, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub processed_at: DateTime<Utc>,
    pub id: String,
}

/// Every shape the generator supports, spread over five operations.
pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::post::<NoJsonTags, NoJsonTags>("test1"),
        OperationDescriptor::post::<NestedTypes, NestedTypes>("test2"),
        OperationDescriptor::post::<(), Empty>("testEmpty"),
        OperationDescriptor::get::<GetQuery, GetResp>("testGet"),
        OperationDescriptor::post::<TimeRequest, TimeResponse>("testTime"),
    ]
}

/// The documentation attached to `test1`.
pub fn documented_spec() -> Spec {
    Spec::new("Test endpoint with headers")
        .with_request_header(
            KeyValueSpec::new("X-API-Key", PrimitiveType::String)
                .with_description("API key for authentication")
                .with_example("treenq_12341234")
                .with_validation(Validation {
                    required: true,
                    ..Validation::default()
                }),
        )
        .with_response_header(
            KeyValueSpec::new("X-Rate-Limit", PrimitiveType::Int)
                .with_description("Rate limit remaining")
                .with_validation(Validation {
                    min_value: Some(1),
                    max_value: Some(3),
                    enum_values: vec!["1".into(), "2".into(), "3".into()],
                    ..Validation::default()
                }),
        )
        .with_error(
            ErrorSpec::new("ERROR_CODE", "meaningful text").with_meta(
                KeyValueSpec::new("field", PrimitiveType::String)
                    .with_description("some field")
                    .with_validation(Validation {
                        min_len: Some(3),
                        max_len: Some(64),
                        ..Validation::default()
                    }),
            ),
        )
        .with_error(
            ErrorSpec::new("OTHER_CODE", "another text")
                .with_meta(KeyValueSpec::new("attempt", PrimitiveType::Uint)),
        )
}
