#![allow(clippy::unwrap_used)]
// File and environment layering for `vendboard-config`.

use figment::Jail;
use pretty_assertions::assert_eq;

use vendboard_config::{Config, ConfigError, load_config_from, save_config_to};

#[test]
fn missing_file_yields_defaults() {
    Jail::expect_with(|jail| {
        let cfg = load_config_from(&jail.directory().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        Ok(())
    });
}

#[test]
fn file_values_override_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                api_base = "https://admin.example.com/api/v1"
                default_page_size = 50
            "#,
        )?;
        let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();
        assert_eq!(cfg.api_base, "https://admin.example.com/api/v1");
        assert_eq!(cfg.default_page_size, 50);
        assert_eq!(cfg.refresh_interval_ms, 30_000);
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "refresh_interval_ms = 10000\n")?;
        jail.set_env("VENDBOARD_REFRESH_INTERVAL_MS", "2500");
        jail.set_env("VENDBOARD_API_BASE", "http://10.0.0.5:5000/api/v1");

        let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();
        assert_eq!(cfg.refresh_interval_ms, 2500);
        assert_eq!(cfg.api_base, "http://10.0.0.5:5000/api/v1");
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "default_page_size = 500\n")?;
        let err = load_config_from(&jail.directory().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "default_page_size"));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "api_base = \n")?;
        let err = load_config_from(&jail.directory().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let cfg = Config {
        api_base: "https://admin.example.com/api/v1".into(),
        refresh_interval_ms: 15_000,
        default_page_size: 25,
        request_timeout_secs: 10,
    };

    save_config_to(&cfg, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("default_page_size = 25"));
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, cfg);
}
