//! File loading integration tests.

use std::io::Write;

use pv_core::error::LoadError;
use pv_core::load::{load_file, Source};
use pv_schema::{PromptOrder, BUILTIN_PROMPTS};

fn write_preset(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write preset");
    file
}

#[test]
fn valid_preset_loads() {
    let file = write_preset(
        r#"{
            "prompts": [
                {"identifier": "greeting", "name": "Greeting", "content": "Hello."}
            ],
            "prompt_order": [
                {"character_id": "0", "order": [
                    {"identifier": "greeting", "enabled": true},
                    {"identifier": "chatHistory", "enabled": true}
                ]}
            ],
            "temperature": 0.8
        }"#,
    );

    let loaded = load_file(file.path()).expect("preset should load");
    assert!(loaded.report.is_valid());
    assert!(!loaded.converted);
    assert!(loaded.advisory.is_none());
    assert_eq!(loaded.canonical_order().len(), 2);
    assert_eq!(loaded.prompt_name("greeting"), "Greeting");
    assert_eq!(loaded.prompt_name("chatHistory"), "Chat History");
    assert!(matches!(loaded.order, Some(PromptOrder::Grouped(_))));
}

#[test]
fn non_json_bytes_yield_parse_error() {
    let file = write_preset("not json");
    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().starts_with("File is not valid JSON"));
}

#[test]
fn json_without_prompts_yields_schema_error() {
    let file = write_preset(r#"{"prompt_order": []}"#);
    let err = load_file(file.path()).unwrap_err();
    match err {
        LoadError::Schema { ref report, .. } => {
            assert!(report.violations.iter().any(|v| v.field == "prompts"));
        }
        other => panic!("expected schema error, got {other}"),
    }
    assert_eq!(err.to_string(), "File is not a valid preset");
}

#[test]
fn v1_preset_converts_with_advisory() {
    let file = write_preset(r#"{"version": 1, "data": {"prompts": [], "prompt_order": []}}"#);
    let loaded = load_file(file.path()).expect("v1 preset should convert and load");

    assert!(loaded.converted);
    let advisory = loaded.advisory.expect("conversion advisory");
    assert!(advisory.contains("version 1"));

    let prompts = loaded.document["prompts"].as_array().unwrap();
    assert_eq!(prompts.len(), BUILTIN_PROMPTS.len());
    assert_eq!(loaded.document["prompt_order"][0]["character_id"], 100001);
}

#[test]
fn missing_file_yields_io_error() {
    let err = load_file(std::path::Path::new("/nonexistent/preset.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn source_dispatch_loads_files() {
    let file = write_preset(r#"{"prompts": [], "prompt_order": [{"character_id": "0", "order": []}]}"#);
    let source = Source::parse(file.path().to_str().unwrap());
    let loaded = pv_core::load(&source).expect("load via dispatch");
    assert!(loaded.canonical_order().is_empty());
}
