use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::load_config;
use super::settings::{PartialSettings, Settings};
use crate::broker::topic::MatchMode;

/// Run `f` with a scratch directory as the working directory so no stray
/// `config/default.*` or `.env` file is picked up.
fn in_scratch_dir<F: FnOnce(&TempDir)>(f: F) {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");
    f(&tmp);
    env::set_current_dir(orig).expect("restore cwd");
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.registry.match_mode, MatchMode::Substring);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_partial_settings_merge() {
    let partial = PartialSettings {
        registry: None,
        logging: Some(super::settings::PartialLoggingSettings {
            level: Some("debug".to_string()),
        }),
    };
    let settings = partial.merge_with_defaults();
    assert_eq!(settings.registry.match_mode, MatchMode::Substring);
    assert_eq!(settings.logging.level, "debug");
}

#[test]
#[serial]
fn load_config_without_sources_uses_defaults() {
    in_scratch_dir(|_| {
        temp_env::with_vars_unset(
            ["PUBSUB__REGISTRY__MATCH_MODE", "PUBSUB__LOGGING__LEVEL"],
            || {
                let cfg = load_config().expect("load_config failed");
                assert_eq!(cfg, Settings::default());
            },
        );
    });
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    in_scratch_dir(|_| {
        fs::create_dir_all("config").expect("create config dir");
        let toml = r#"
            [registry]
            match_mode = "segment"

            [logging]
            level = "trace"
        "#;
        fs::write("config/default.toml", toml).expect("write config file");

        temp_env::with_vars_unset(
            ["PUBSUB__REGISTRY__MATCH_MODE", "PUBSUB__LOGGING__LEVEL"],
            || {
                let cfg = load_config().expect("load_config failed");
                assert_eq!(cfg.registry.match_mode, MatchMode::Segment);
                assert_eq!(cfg.logging.level, "trace");
            },
        );
    });
}

#[test]
#[serial]
fn load_config_env_overrides_file() {
    in_scratch_dir(|_| {
        fs::create_dir_all("config").expect("create config dir");
        fs::write("config/default.toml", "[logging]\nlevel = \"warn\"\n")
            .expect("write config file");

        temp_env::with_vars(
            [
                ("PUBSUB__REGISTRY__MATCH_MODE", Some("segment")),
                ("PUBSUB__LOGGING__LEVEL", Some("error")),
            ],
            || {
                let cfg = load_config().expect("load_config failed");
                assert_eq!(cfg.registry.match_mode, MatchMode::Segment);
                assert_eq!(cfg.logging.level, "error");
            },
        );
    });
}

#[test]
#[serial]
fn load_config_rejects_unknown_match_mode() {
    in_scratch_dir(|_| {
        temp_env::with_var("PUBSUB__REGISTRY__MATCH_MODE", Some("glob"), || {
            assert!(load_config().is_err());
        });
    });
}
