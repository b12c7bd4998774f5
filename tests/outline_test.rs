use std::fs;
use std::path::PathBuf;

use codeoutline::config::OutlineConfig;
use codeoutline::errors::OutlineError;
use codeoutline::outline::{parse_batch, parse_file, parse_source, scan_directory};
use codeoutline::types::Dialect;
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_oversized_source_is_rejected() {
    let config = OutlineConfig::default();
    let source = "#".repeat(1_000_001);
    let result = parse_source("big.py", &source, &config);

    assert!(matches!(
        result.error,
        Some(OutlineError::FileTooLarge {
            chars: 1_000_001,
            limit: 1_000_000
        })
    ));
    assert_eq!(result.language, Some(Dialect::Python));
    assert!(result.functions.is_empty());
    assert!(result.classes.is_empty());
    assert!(result.imports.is_empty());
    assert!(result.exports.is_empty());
}

#[test]
fn test_source_at_the_limit_is_accepted() {
    let config = OutlineConfig::default();
    let source = "#".repeat(1_000_000);
    let result = parse_source("edge.py", &source, &config);
    assert!(result.is_ok(), "error: {:?}", result.error);
}

#[test]
fn test_limit_counts_characters_not_bytes() {
    let config = OutlineConfig {
        max_file_chars: 10,
        ..OutlineConfig::default()
    };
    // Ten characters, twenty bytes.
    let source = "#ééééééééé";
    assert_eq!(source.chars().count(), 10);
    assert!(parse_source("accents.py", source, &config).is_ok());

    let result = parse_source("accents.py", "#éééééééééé", &config);
    let error = result.error.unwrap();
    assert_eq!(error.to_string(), "File too large (11 chars > 10)");
}

#[test]
fn test_unsupported_extension() {
    let result = parse_source("notes.txt", "hello", &OutlineConfig::default());
    assert_eq!(result.language, None);
    assert_eq!(
        result.error.as_ref().map(|e| e.to_string()).as_deref(),
        Some("Unsupported file type: notes.txt")
    );
    assert!(result.functions.is_empty());
}

#[test]
fn test_parse_file_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "pkg/service.py", "import os\n\ndef run():\n    pass\n");
    let result = parse_file(&path, &OutlineConfig::default());
    assert!(result.is_ok());
    assert_eq!(result.file_path, path.to_string_lossy());
    assert_eq!(result.functions[0].name, "run");
    assert_eq!(result.imports.len(), 1);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.py");
    let mut bytes = b"# caf\xe9\n".to_vec();
    bytes.extend_from_slice(b"def still_works():\n    pass\n");
    fs::write(&path, bytes).unwrap();

    let result = parse_file(&path, &OutlineConfig::default());
    assert!(result.is_ok(), "error: {:?}", result.error);
    assert_eq!(result.functions[0].name, "still_works");
    assert_eq!(result.functions[0].span.start_line, 2);
}

#[test]
fn test_batch_preserves_order_and_isolates_failures() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "a.py", "def a():\n    pass\n");
    let missing = dir.path().join("missing.js");
    let unsupported = write(&dir, "notes.md", "# notes");
    let last = write(&dir, "b.ts", "export function b(): void {}\n");

    let paths = vec![first, missing, unsupported, last];
    let results = parse_batch(&paths, &OutlineConfig::default());
    assert_eq!(results.len(), 4);

    for (path, result) in paths.iter().zip(&results) {
        assert_eq!(result.file_path, path.to_string_lossy());
    }

    assert!(results[0].is_ok());
    assert_eq!(results[0].functions[0].name, "a");

    assert!(matches!(
        results[1].error,
        Some(OutlineError::FileReadFailure { .. })
    ));
    assert_eq!(results[1].language, Some(Dialect::JavaScript));
    assert!(results[1]
        .error
        .as_ref()
        .unwrap()
        .to_string()
        .starts_with("Failed to read file: "));

    assert!(matches!(
        results[2].error,
        Some(OutlineError::UnsupportedExtension { .. })
    ));

    assert!(results[3].is_ok());
    assert_eq!(results[3].exports[0].name, "b");
}

#[test]
fn test_empty_batch() {
    let paths: Vec<PathBuf> = Vec::new();
    assert!(parse_batch(&paths, &OutlineConfig::default()).is_empty());
}

#[test]
fn test_result_json_shape() {
    let source = "@staticmethod\ndef foo(x: int) -> int:\n    \"\"\"doc\"\"\"\n    return x";
    let result = parse_source("m.py", source, &OutlineConfig::default());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["file_path"], "m.py");
    assert_eq!(json["language"], "python");
    assert!(json["error"].is_null());
    let foo = &json["functions"][0];
    assert_eq!(foo["name"], "foo");
    assert_eq!(foo["signature"], "def foo(x: int) -> int");
    assert_eq!(foo["start_line"], 2);
    assert_eq!(foo["end_line"], 4);
    assert!(foo.get("is_generator").is_none());
    assert!(foo.get("span").is_none());

    let failed = parse_source("m.rb", "", &OutlineConfig::default());
    let json = serde_json::to_value(&failed).unwrap();
    assert!(json["language"].is_null());
    assert_eq!(json["error"], "Unsupported file type: m.rb");
    assert_eq!(json["functions"], serde_json::json!([]));
}

#[test]
fn test_import_json_shapes() {
    let config = OutlineConfig::default();
    let py = parse_source("m.py", "from a import b\n", &config);
    let json = serde_json::to_value(&py.imports).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "module": "a",
            "names": ["b"],
            "alias": null,
            "is_from": true,
            "line": 1
        }])
    );

    let js = parse_source("m.js", "import x from 'y';\n", &config);
    let json = serde_json::to_value(&js.imports).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "source": "y",
            "specifiers": [],
            "default": "x",
            "line": 1
        }])
    );
}

#[test]
fn test_scan_directory_filters_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/app.py", "");
    write(&dir, "src/index.ts", "");
    write(&dir, "src/util/helpers.js", "");
    write(&dir, "src/main.rs", "");
    write(&dir, "node_modules/react/index.js", "");
    write(&dir, "packages/ui/node_modules/lodash/index.js", "");
    write(&dir, ".hidden/secret.py", "");
    write(&dir, "README.md", "");

    let files = scan_directory(dir.path(), &OutlineConfig::default()).unwrap();
    let relative: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        relative,
        vec!["src/app.py", "src/index.ts", "src/util/helpers.js"]
    );
}

#[test]
fn test_scan_directory_rejects_missing_root() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(scan_directory(&missing, &OutlineConfig::default()).is_err());
}
