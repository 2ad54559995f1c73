use depwalk_core::comparer::VersionComparison;
use depwalk_core::config::{WalkerConfig, CONFIG_FILE};

#[test]
fn test_defaults() {
    let config = WalkerConfig::default();
    assert_eq!(config.versioning.comparison, VersionComparison::IgnoreMetadata);
    assert!(!config.install.ignore_dependencies);
    assert!(config.install.allow_prerelease);
    assert!(!config.install.upgrade);
    assert!(!config.uninstall.force);
    assert!(!config.uninstall.remove_dependencies);
}

#[test]
fn test_empty_toml_matches_defaults() {
    let config: WalkerConfig = toml::from_str("").unwrap();
    assert_eq!(config, WalkerConfig::default());
}

#[test]
fn test_parse_from_toml() {
    let toml = r#"
[versioning]
comparison = "strict"

[install]
allow-prerelease = false
upgrade = true

[uninstall]
force = true
remove-dependencies = true
"#;
    let config: WalkerConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.versioning.comparison, VersionComparison::Strict);
    assert_eq!(config.comparer().mode(), VersionComparison::Strict);
    assert!(!config.install.allow_prerelease);
    assert!(config.install.upgrade);
    assert!(!config.install.ignore_dependencies);
    assert!(config.uninstall.force);
    assert!(config.uninstall.remove_dependencies);
}

#[test]
fn test_unknown_comparison_rejected() {
    let result: Result<WalkerConfig, _> = toml::from_str("[versioning]\ncomparison = \"loose\"\n");
    assert!(result.is_err());
}

#[test]
fn test_from_path_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "[install\n").unwrap();
    let err = WalkerConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_discover_walks_up() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "[uninstall]\nremove-dependencies = true\n",
    )
    .unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let config = WalkerConfig::discover(&nested).unwrap();
    assert!(config.uninstall.remove_dependencies);
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = WalkerConfig::discover(dir.path()).unwrap();
    assert_eq!(config, WalkerConfig::default());
}
