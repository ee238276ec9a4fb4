use pathquill::config::Config;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.patterns_file, None);
    assert!(config.normalize_patterns);
    assert!(!config.unknown_is_match);
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.output_format, "text");
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        patterns_file: Some("/etc/patterns.txt".to_string()),
        normalize_patterns: false,
        unknown_is_match: true,
        log_level: "debug".to_string(),
        output_format: "json".to_string(),
    };
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("missing.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "normalize_patterns = \"sometimes\"\n").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "patterns_file = \"p.txt\"\noutput_format = \"json\"\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.patterns_file.as_deref(), Some("p.txt"));
    assert!(config.json_output());
    assert!(config.normalize_patterns);
    assert_eq!(config.log_level, "warn");
}
