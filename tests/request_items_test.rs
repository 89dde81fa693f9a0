use reqitems::items::{
    DataValue, HeaderValue, ItemError, KeyValueArg, RequestItems, RequestMode, Separator,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const FILE_CONTENT: &str = "__test_file_content__";
const JSON_FILE_CONTENT: &str = r#"{"name": "Jakub", "tags": ["a", 1], "nested": {"ok": true}}"#;

/// 测试用文件夹，包含一个文本文件和一个 JSON 文件
struct Fixtures {
    _dir: TempDir,
    file_path: String,
    json_file_path: String,
}

impl Fixtures {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test-file.txt");
        let json_file_path = dir.path().join("test.json");
        fs::write(&file_path, format!("{}\n", FILE_CONTENT)).unwrap();
        fs::write(&json_file_path, JSON_FILE_CONTENT).unwrap();

        Self {
            file_path: file_path.display().to_string(),
            json_file_path: json_file_path.display().to_string(),
            _dir: dir,
        }
    }
}

fn arg(raw: &str) -> KeyValueArg {
    KeyValueArg::parse(raw).unwrap()
}

/// 测试没有分隔符的请求项
#[test]
fn test_invalid_items() {
    let err = KeyValueArg::parse("no-separator").unwrap_err();
    match err {
        ItemError::ArgumentSyntax(orig) => assert_eq!(orig, "no-separator"),
        other => panic!("Expected ArgumentSyntax, got {:?}", other),
    }
}

/// 测试转义分隔符出现在 key 中
#[test]
fn test_escape_separator() {
    let fixtures = Fixtures::new();
    let items = RequestItems::from_args(
        &[
            // headers
            arg(r"foo\:bar:baz"),
            arg(r"jack\@jill:hill"),
            // data
            arg(r"baz\=bar=foo"),
            // files
            arg(&format!(r"bar\@baz@{}", fixtures.file_path)),
        ],
        RequestMode::Json,
    )
    .unwrap();

    let headers: Vec<(&str, Option<&str>)> =
        items.headers.iter().map(|(k, v)| (k, v.as_str())).collect();
    assert_eq!(
        headers,
        vec![("foo:bar", Some("baz")), ("jack@jill", Some("hill"))]
    );

    assert_eq!(items.data.len(), 1);
    assert_eq!(
        items.data.get("baz=bar"),
        Some(&DataValue::String("foo".to_string()))
    );
    assert!(items.files.contains_key("bar@baz"));
}

/// 测试转义后剩余部分仍可组成长分隔符
#[test]
fn test_escape_longsep() {
    let items = RequestItems::from_args(&[arg(r"bob\:==foo")], RequestMode::Json).unwrap();
    assert_eq!(items.params.len(), 1);
    assert_eq!(items.params.get("bob:"), Some(&"foo".to_string()));
}

/// 测试反斜杠后跟普通字符时不作为转义（Windows 路径）
#[test]
fn test_backslash_before_non_special_character_does_not_escape() {
    let cases = [
        ("path=c:\\windows", "path", "c:\\windows"),
        ("path=c:\\windows\\", "path", "c:\\windows\\"),
        ("path\\==c:\\windows", "path=", "c:\\windows"),
    ];

    for (raw, key, value) in cases {
        let expected = KeyValueArg::new(raw, key, Separator::DataString, value);
        assert_eq!(KeyValueArg::parse(raw).unwrap(), expected);
    }
}

/// 测试所有类型的请求项
#[test]
fn test_valid_items() {
    let fixtures = Fixtures::new();
    let items = RequestItems::parse(
        &[
            "string=value".to_string(),
            "Header:value".to_string(),
            "Unset-Header:".to_string(),
            "Empty-Header;".to_string(),
            r#"list:=["a", 1, {}, false]"#.to_string(),
            r#"obj:={"a": "b"}"#.to_string(),
            "ed=".to_string(),
            "bool:=true".to_string(),
            format!("file@{}", fixtures.file_path),
            "query==value".to_string(),
            format!("string-embed=@{}", fixtures.file_path),
            format!("raw-json-embed:=@{}", fixtures.json_file_path),
        ],
        RequestMode::Json,
    )
    .unwrap();

    // Headers
    let headers: Vec<(&str, &HeaderValue)> = items.headers.iter().collect();
    assert_eq!(
        headers,
        vec![
            ("Header", &HeaderValue::Value("value".to_string())),
            ("Unset-Header", &HeaderValue::Unset),
            ("Empty-Header", &HeaderValue::Value(String::new())),
        ]
    );

    // Data
    let expected_embed: serde_json::Value = serde_json::from_str(JSON_FILE_CONTENT).unwrap();
    assert_eq!(
        items.data.get("raw-json-embed"),
        Some(&DataValue::Json(expected_embed))
    );
    match items.data.get("string-embed") {
        Some(DataValue::String(s)) => {
            // 内容原样保留，包括末尾换行
            assert_eq!(s, &format!("{}\n", FILE_CONTENT));
            assert_eq!(s.trim(), FILE_CONTENT);
        }
        other => panic!("Expected string embed, got {:?}", other),
    }
    assert_eq!(items.data.get("ed"), Some(&DataValue::String(String::new())));
    assert_eq!(
        items.data.get("string"),
        Some(&DataValue::String("value".to_string()))
    );
    assert_eq!(items.data.get("bool"), Some(&DataValue::Json(json!(true))));
    assert_eq!(
        items.data.get("list"),
        Some(&DataValue::Json(json!(["a", 1, {}, false])))
    );
    assert_eq!(items.data.get("obj"), Some(&DataValue::Json(json!({"a": "b"}))));

    let keys: Vec<&str> = items.data.iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            "string",
            "list",
            "obj",
            "ed",
            "bool",
            "string-embed",
            "raw-json-embed"
        ]
    );

    // Query parameters
    assert_eq!(items.params.len(), 1);
    assert_eq!(items.params.get("query"), Some(&"value".to_string()));

    // Files
    let files = &items.files["file"];
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].filename, "test-file.txt");
    assert_eq!(
        String::from_utf8(files[0].content.clone()).unwrap().trim(),
        FILE_CONTENT
    );
}

/// 测试同名文件字段累积
#[test]
fn test_multiple_file_fields_with_same_field_name() {
    let fixtures = Fixtures::new();
    let raw = format!("file_field@{}", fixtures.file_path);
    let other = format!("file_field@{}", fixtures.json_file_path);

    let items = RequestItems::parse(&[raw, other], RequestMode::Json).unwrap();
    let files = &items.files["file_field"];
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].filename, "test-file.txt");
    assert_eq!(files[1].filename, "test.json");
}

/// 测试表单模式下同名文本字段累积
#[test]
fn test_multiple_text_fields_with_same_field_name() {
    let items =
        RequestItems::parse(&["text_field=a", "text_field=b"], RequestMode::Form).unwrap();

    assert_eq!(
        items.data.get("text_field"),
        Some(&DataValue::List(vec!["a".to_string(), "b".to_string()]))
    );
    assert_eq!(
        items.data.pairs(),
        vec![
            ("text_field".to_string(), "a".to_string()),
            ("text_field".to_string(), "b".to_string()),
        ]
    );

    // 非表单模式下后者覆盖前者
    let items =
        RequestItems::parse(&["text_field=a", "text_field=b"], RequestMode::Json).unwrap();
    assert_eq!(
        items.data.get("text_field"),
        Some(&DataValue::String("b".to_string()))
    );
}

/// 测试表单模式下同名文件字段同样累积，且与数据字段互不影响
#[test]
fn test_multiple_file_fields_in_form_mode() {
    let fixtures = Fixtures::new();
    let raw = [
        format!("file_field@{}", fixtures.file_path),
        "file_field=text".to_string(),
        format!("file_field@{}", fixtures.json_file_path),
    ];

    let items = RequestItems::parse(&raw, RequestMode::Form).unwrap();
    let files = &items.files["file_field"];
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].filename, "test-file.txt");
    assert_eq!(files[0].content, format!("{}\n", FILE_CONTENT).into_bytes());
    assert_eq!(files[1].filename, "test.json");
    assert_eq!(files[1].content, JSON_FILE_CONTENT.as_bytes());
    assert_eq!(
        items.data.get("file_field"),
        Some(&DataValue::String("text".to_string()))
    );
}

/// 测试表单模式下同名字段混合文本和 JSON 值时按顺序保留全部值
#[test]
fn test_mixed_text_and_json_fields_in_form_mode() {
    let fixtures = Fixtures::new();
    let embedded = format!("f:=@{}", fixtures.json_file_path);
    let raw = ["f=1", "f:=2", "f=3", r#"f:={"a":1}"#, "f:=\"s\"", embedded.as_str()];

    let items = RequestItems::parse(&raw, RequestMode::Form).unwrap();
    let embedded_text = serde_json::from_str::<serde_json::Value>(JSON_FILE_CONTENT)
        .unwrap()
        .to_string();
    let expected = vec![
        "1".to_string(),
        "2".to_string(),
        "3".to_string(),
        r#"{"a":1}"#.to_string(),
        "s".to_string(),
        embedded_text,
    ];
    assert_eq!(items.data.get("f"), Some(&DataValue::List(expected.clone())));

    let pairs: Vec<(String, String)> = expected
        .into_iter()
        .map(|value| ("f".to_string(), value))
        .collect();
    assert_eq!(items.data.pairs(), pairs);

    // JSON 模式下后者覆盖前者
    let items = RequestItems::parse(&raw, RequestMode::Json).unwrap();
    assert_eq!(
        items.data.get("f"),
        Some(&DataValue::Json(json!({
            "name": "Jakub",
            "tags": ["a", 1],
            "nested": {"ok": true}
        })))
    );
}

/// 测试 Header 的三种状态可以区分
#[test]
fn test_unset_empty_and_missing_headers() {
    let items =
        RequestItems::parse(&["Unset-Header:", "Empty-Header;"], RequestMode::Json).unwrap();

    assert_eq!(items.headers.get("unset-header"), Some(&HeaderValue::Unset));
    assert_eq!(
        items.headers.get("empty-header"),
        Some(&HeaderValue::Value(String::new()))
    );
    assert_eq!(items.headers.get("Missing-Header"), None);
}

/// 测试嵌入的文件不存在
#[test]
fn test_embed_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let raw = format!("doc:=@{}", missing.display());

    match RequestItems::parse(&[raw], RequestMode::Json) {
        Err(ItemError::FileAccess { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected FileAccess, got {:?}", other),
    }
}

/// 测试相对路径按当前工作目录解析
#[test]
fn test_relative_path_from_cwd() {
    let raw = "manifest=@Cargo.toml";
    let items = RequestItems::parse(&[raw], RequestMode::Json).unwrap();
    match items.data.get("manifest") {
        Some(DataValue::String(s)) => assert!(s.contains("[package]")),
        other => panic!("Expected string embed, got {:?}", other),
    }
}
