use metscalc_engine::config::{
    CalculatorConfig, DEFAULT_UNKNOWN_AGE, UnknownAgePolicy, init_config, load_config,
    save_config,
};
use metscalc_engine::error::ConfigError;

#[test]
fn defaults() {
    let config = CalculatorConfig::default();
    assert_eq!(config.adult_age_years, 20);
    assert_eq!(
        config.unknown_age,
        UnknownAgePolicy::AssumeAdult {
            age: DEFAULT_UNKNOWN_AGE
        }
    );
    assert_eq!(config.unknown_age.age(), Some(25));
    assert_eq!(UnknownAgePolicy::PassThrough.age(), None);
}

#[test]
fn unversioned_config_is_migrated() {
    let config = CalculatorConfig::from_json(r#"{ "unknown_age": { "type": "pass_through" } }"#)
        .unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.adult_age_years, 20);
    assert_eq!(config.unknown_age, UnknownAgePolicy::PassThrough);
}

#[test]
fn newer_config_is_rejected() {
    let err = CalculatorConfig::from_json(r#"{ "config_version": 7 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnsupportedVersion {
            found: 7,
            supported: 1
        }
    ));
}

#[test]
fn version_beyond_u32_is_rejected_rather_than_wrapped() {
    let err = CalculatorConfig::from_json(r#"{ "config_version": 4294967297 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnsupportedVersion {
            found: 4_294_967_297,
            supported: 1
        }
    ));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        CalculatorConfig::from_json("[]"),
        Err(ConfigError::NotAnObject)
    ));
    assert!(matches!(
        CalculatorConfig::from_json(r#"{ "config_version": 1, "adult_age_years": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        CalculatorConfig::from_json(
            r#"{ "config_version": 1, "unknown_age": { "type": "assume_adult", "age": 12 } }"#
        ),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metscalc").join("config.json");
    let config = CalculatorConfig {
        config_version: 0,
        adult_age_years: 18,
        unknown_age: UnknownAgePolicy::AssumeAdult { age: 30 },
    };

    save_config(&config, &path).unwrap();
    let loaded = load_config(&path).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.adult_age_years, 18);
    assert_eq!(loaded.unknown_age, UnknownAgePolicy::AssumeAdult { age: 30 });
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn init_writes_defaults_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metscalc").join("config.json");

    let written = init_config(&path, false).unwrap();
    assert_eq!(written.config_version, 1);
    assert_eq!(load_config(&path).unwrap(), written);

    let custom = CalculatorConfig {
        adult_age_years: 18,
        ..CalculatorConfig::default()
    };
    save_config(&custom, &path).unwrap();

    let err = init_config(&path, false).unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyExists { .. }));
    assert_eq!(load_config(&path).unwrap().adult_age_years, 18);

    init_config(&path, true).unwrap();
    assert_eq!(load_config(&path).unwrap().adult_age_years, 20);
}
