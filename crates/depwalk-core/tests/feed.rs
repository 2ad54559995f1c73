use depwalk_core::feed::{Feed, FeedPackage};
use depwalk_core::package::Package;
use depwalk_core::version::Version;
use std::io::Write;

const DIAMOND: &str = r#"
[[package]]
id = "A"
version = "1.0"
dependencies = ["B", "C [1.0, 2.0)"]
content = true

[[package]]
id = "B"
version = "1.0"
dependencies = ["D"]
tools = true

[[package]]
id = "C"
version = "1.5"
dependencies = ["D"]

[[package]]
id = "D"
version = "1.0"
"#;

#[test]
fn test_parse_feed() {
    let feed: Feed = DIAMOND.parse().unwrap();
    assert_eq!(feed.package.len(), 4);

    let packages = feed.into_packages().unwrap();
    let a = &packages[0];
    assert_eq!(a.to_string(), "A 1.0");
    assert!(a.has_project_content());
    assert_eq!(a.dependencies().len(), 2);
    assert_eq!(a.dependencies()[1].to_string(), "C (\u{2265} 1.0 && < 2.0)");

    let b = &packages[1];
    assert!(b.has_tools_or_init());
    assert!(!b.has_project_content());

    let c = &packages[2];
    assert!(c.is_dependency_only());
}

#[test]
fn test_empty_feed() {
    let feed: Feed = "".parse().unwrap();
    assert!(feed.into_packages().unwrap().is_empty());
}

#[test]
fn test_bad_version_in_feed() {
    let feed: Feed = "[[package]]\nid = \"A\"\nversion = \"1\"\n".parse().unwrap();
    let err = feed.into_packages().unwrap_err();
    assert_eq!(err.to_string(), "'1' is not a valid version string.");
}

#[test]
fn test_bad_range_in_feed() {
    let feed: Feed = "[[package]]\nid = \"A\"\nversion = \"1.0\"\ndependencies = [\"B [,]\"]\n"
        .parse()
        .unwrap();
    let err = feed.into_packages().unwrap_err();
    assert_eq!(err.to_string(), "'[,]' is not a valid version string.");
}

#[test]
fn test_malformed_toml() {
    let err = "[[package]\nid =".parse::<Feed>().unwrap_err();
    assert!(err.to_string().starts_with("Configuration error: Failed to parse feed"));
}

#[test]
fn test_round_trip_through_packages() {
    let packages = DIAMOND.parse::<Feed>().unwrap().into_packages().unwrap();
    let text = Feed::from_packages(&packages).to_string_pretty().unwrap();
    let again = text.parse::<Feed>().unwrap().into_packages().unwrap();
    assert_eq!(packages, again);
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DIAMOND.as_bytes()).unwrap();
    let feed = Feed::from_path(file.path()).unwrap();
    assert_eq!(feed.package.len(), 4);
}

#[test]
fn test_from_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = Feed::from_path(&dir.path().join("missing.toml"));
    assert!(result.is_err());
}

#[test]
fn test_feed_package_into_package() {
    let entry = FeedPackage {
        id: "E".into(),
        version: "2.0.1".into(),
        dependencies: vec![],
        content: false,
        tools: true,
    };
    let package = entry.into_package().unwrap();
    assert!(package.is_same(&Package::new("e", Version::parse("2.0.1").unwrap())));
}
