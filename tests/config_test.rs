use codeoutline::config::*;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = OutlineConfig::default();
    assert_eq!(config.version, 1);
    assert_eq!(config.max_file_chars, 1_000_000);
    assert_eq!(config.max_file_chars, DEFAULT_MAX_FILE_CHARS);
    assert!(config.exclude.iter().any(|p| p == "**/node_modules/**"));
    assert!(config.exclude.iter().any(|p| p == "**/__pycache__/**"));
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let config = OutlineConfig {
        max_file_chars: 5_000,
        exclude: vec!["generated/**".to_string()],
        ..OutlineConfig::default()
    };
    save_config(dir.path(), &config).unwrap();
    assert!(dir.path().join(CONFIG_FILENAME).exists());
    assert!(!dir.path().join(".codeoutline.json.tmp").exists());

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(config, loaded);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded, OutlineConfig::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");
    std::fs::write(&path, r#"{ "max_file_chars": 42 }"#).unwrap();
    let loaded = load_config_file(&path).unwrap();
    assert_eq!(loaded.max_file_chars, 42);
    assert_eq!(loaded.exclude, OutlineConfig::default().exclude);
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(get_config_path(dir.path()), "{ not json").unwrap();
    let err = load_config(dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("config error: failed to parse"));
}

#[test]
fn test_should_include_file() {
    let config = OutlineConfig::default();
    assert!(should_include_file("src/app.py", &config));
    assert!(should_include_file("src/index.ts", &config));
    assert!(should_include_file("web/App.tsx", &config));
    assert!(should_include_file("lib/util.mjs", &config));
    assert!(!should_include_file("src/main.rs", &config));
    assert!(!should_include_file("README.md", &config));
    assert!(!should_include_file("node_modules/react/index.js", &config));
    assert!(!should_include_file("__pycache__/app.py", &config));
    assert!(!should_include_file("vendor/jquery.min.js", &config));
}

#[test]
fn test_default_excludes_match_at_any_depth() {
    let config = OutlineConfig::default();
    assert!(!should_include_file("pkg/node_modules/x.js", &config));
    assert!(!should_include_file("apps/web/dist/bundle.js", &config));
    assert!(!should_include_file("src/pkg/__pycache__/mod.py", &config));
    assert!(should_include_file("src/distance.py", &config));
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    let path = get_config_path(dir.path());
    assert!(path.ends_with(".codeoutline.json"));
}

#[test]
fn test_config_serde_roundtrip() {
    let config = OutlineConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let deserialized: OutlineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config.version, deserialized.version);
    assert_eq!(config.max_file_chars, deserialized.max_file_chars);
    assert_eq!(config.exclude, deserialized.exclude);
}
