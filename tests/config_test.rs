// tests/config_test.rs
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;
use version_tagger::config::{load_config, Config};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.tagging.tag_prefix, "v");
    assert_eq!(config.tagging.major_version, None);
    assert_eq!(config.tagging.version_file, ".version");
    assert_eq!(config.api.base_url, "https://api.github.com");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[tagging]
tag_prefix = "release-"
major_version = 2
version_file = "VERSION"

[api]
base_url = "https://github.example.com/api/v3"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tagging.tag_prefix, "release-");
    assert_eq!(config.tagging.major_version, Some(2));
    assert_eq!(config.tagging.version_file, "VERSION");
    assert_eq!(config.api.base_url, "https://github.example.com/api/v3");
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[tagging]
major_version = 1
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tagging.tag_prefix, "v");
    assert_eq!(config.tagging.major_version, Some(1));
    assert_eq!(config.api.base_url, "https://api.github.com");
}

#[test]
fn test_load_invalid_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"this is not toml [").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}

#[test]
fn test_load_missing_explicit_file() {
    assert!(load_config(Some("/nonexistent/versiontagger.toml")).is_err());
}

#[test]
#[serial]
fn test_load_without_file_uses_defaults() {
    // Relies on the working directory not carrying a versiontagger.toml
    let config = load_config(None).unwrap();
    assert_eq!(config.tagging.version_file, ".version");
}
