use std::time::Duration;

use tempfile::tempdir;

use super::*;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.session.collect_seconds, 30);
    assert_eq!(config.session.train_seconds, 30);
    assert!((config.classifier.low_confidence_threshold - 0.6).abs() < f64::EPSILON);
    assert_eq!(config.classifier.informative_features, 10);
}

#[test]
fn round_trips_through_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
    let mut config = AppConfig::default();
    config.session.collect_seconds = 12;
    config.classifier.shuffle_seed = Some(42);
    config.corpus.snapshot_file = Some(dir.path().join("corpus.json"));
    save_to_path(&config, &path).unwrap();
    assert_eq!(load_from(&path).unwrap(), config);
}

#[test]
fn partial_tables_fill_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[session]\ntrain_seconds = 5\n").unwrap();
    let config = load_from(&path).unwrap();
    assert_eq!(config.session.train_seconds, 5);
    assert_eq!(config.session.collect_seconds, 30);
    assert_eq!(config.classifier.shuffle_seed, None);
}

#[test]
fn clamps_invalid_values_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
[session]
collect_seconds = 0
train_seconds = 0
countdown_interval_ms = 1

[classifier]
low_confidence_threshold = 3.5
"#,
    )
    .unwrap();
    let config = load_from(&path).unwrap();
    assert_eq!(config.session.collect_seconds, 1);
    assert_eq!(config.session.train_seconds, 1);
    assert_eq!(config.session.countdown_interval_ms, 50);
    assert!((config.classifier.low_confidence_threshold - 1.0).abs() < f64::EPSILON);
}

#[test]
fn invalid_toml_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[session\ncollect_seconds = ").unwrap();
    let err = load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}

#[test]
fn converts_into_runtime_settings() {
    let mut config = AppConfig::default();
    config.session.collect_seconds = 4;
    config.session.countdown_interval_ms = 250;
    config.classifier.shuffle_seed = Some(9);
    let session = config.session_config();
    assert_eq!(session.collect, Duration::from_secs(4));
    assert_eq!(session.train, Duration::from_secs(30));
    assert_eq!(session.countdown_interval, Some(Duration::from_millis(250)));
    assert_eq!(config.train_options().shuffle_seed, Some(9));
}

#[test]
fn explicit_snapshot_path_wins() {
    let mut config = AppConfig::default();
    config.corpus.snapshot_file = Some(PathBuf::from("/data/corpus.json"));
    assert_eq!(
        config.snapshot_path().unwrap(),
        PathBuf::from("/data/corpus.json")
    );
}
