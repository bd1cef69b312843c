mod common;

use pretty_assertions::assert_eq;
use std::fs;
use velgen_core::{
    generate_client, generate_client_to_file, AppError, ClientConfig, ClientDesc, Generator,
    Language, OperationDescriptor,
};

fn render(language: &str) -> String {
    let config = ClientConfig {
        language: language.to_string(),
        ..ClientConfig::default()
    };
    let mut out = Vec::new();
    generate_client(&common::operations(), &mut out, &config).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_type_closure_is_emitted_once_in_preorder() {
    let generator = Generator::new(ClientDesc::default(), &common::operations()).unwrap();
    let names: Vec<&str> = generator.graph().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "NoJsonTags",
            "NestedTypes",
            "TestStruct",
            "NextLevelStruct",
            "NextLevelElem",
            "MapValue",
            "NextLevelStructP",
            "HighElem",
            "HighMapElem",
            "HighPointer",
            "GetQuery",
            "GetResp",
            "TimeRequest",
            "TimeResponse",
        ]
    );

    let per_op: Vec<usize> = generator
        .operations()
        .iter()
        .map(|op| op.data_types.len())
        .collect();
    assert_eq!(per_op, vec![1, 9, 0, 2, 2]);
}

#[test]
fn test_every_type_is_declared_once_per_language() {
    let declarations = [
        ("go", "type NestedTypes struct"),
        ("ts", "export interface NestedTypes "),
        ("rust", "pub struct NestedTypes "),
    ];
    for (lang, needle) in declarations {
        let out = render(lang);
        assert_eq!(out.matches(needle).count(), 1, "{lang}");
    }
}

#[test]
fn test_go_client() {
    let out = render("go");
    assert!(out.contains("package client"));
    assert!(out.contains("\t\"time\"\n"));
    assert!(out.contains("Chunk []uint8 `json:\"chunk\"`"));
    assert!(out.contains("NextLevelSlice []HighElem `json:\"slice\"`"));
    assert!(out.contains("Map map[int64]HighMapElem `json:\"map\"`"));
    assert!(out.contains("NextLevelNestedP *HighPointer `json:\"nextP,omitempty\"`"));
    assert!(out.contains("CreatedAt time.Time `json:\"createdAt\"`"));
    assert!(out.contains("func (c *Client) TestEmpty(ctx context.Context) error {"));
    assert!(out.contains("q.Set(\"field\", fmt.Sprint(input.Field))"));
}

#[test]
fn test_ts_client() {
    let out = render("ts");
    assert!(out.contains("  chunk: number[];"));
    assert!(out.contains("  map: Record<number, HighMapElem>;"));
    assert!(out.contains("  nextP?: HighPointer | undefined;"));
    assert!(out.contains("  createdAt: string;"));
    assert!(out.contains("  Getting: number;"));
    assert!(out.contains("async testEmpty(): Promise<void>"));
    assert!(out.contains("async testGet(input: GetQuery): Promise<GetResp>"));
}

#[test]
fn test_rust_client() {
    let out = render("rust");
    assert!(out.contains("pub next_level_nested_p: Option<HighPointer>,"));
    assert!(out.contains("pub map: std::collections::HashMap<i64, MapValue>,"));
    assert!(out.contains("#[serde(rename = \"Getting\")]"));
    assert!(out.contains(
        "pub async fn test_get(&self, input: &GetQuery) -> Result<GetResp, Error>"
    ));
    assert!(out.contains("fn query_value<T: Serialize>"));
}

#[test]
fn test_output_is_deterministic() {
    for lang in ["go", "ts", "rust"] {
        assert_eq!(render(lang), render(lang), "{lang}");
    }
}

#[test]
fn test_client_to_file_with_post_process() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        language: "ts".to_string(),
        output_dir: dir.path().to_path_buf(),
        post_process: Some("sed 's/^export class Client/export class Api/'".to_string()),
        ..ClientConfig::default()
    };
    let path = generate_client_to_file(&common::operations(), &config).unwrap();
    assert_eq!(path, dir.path().join("client.ts"));
    let text = fs::read_to_string(path).unwrap();
    assert!(text.contains("export class Api {"));
}

#[test]
fn test_failed_post_process_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        language: Language::Go.to_string(),
        output_dir: dir.path().to_path_buf(),
        post_process: Some("exit 3".to_string()),
        ..ClientConfig::default()
    };
    let err = generate_client_to_file(&common::operations(), &config).unwrap_err();
    assert!(matches!(err, AppError::PostProcess { .. }));
    assert!(!dir.path().join("client.go").exists());
}

#[test]
fn test_anonymous_input_is_rejected() {
    let ops = vec![OperationDescriptor::post::<(String, i64), ()>("pair")];
    let mut out = Vec::new();
    let err = generate_client(&ops, &mut out, &ClientConfig::default()).unwrap_err();
    assert!(matches!(err, AppError::InlineTypeForbidden { .. }));
    assert!(out.is_empty());
}
