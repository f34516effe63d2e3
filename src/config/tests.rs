use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use super::*;

fn defaults() -> Settings {
    Settings::from_raw(RawSettings::default()).expect("defaults are valid")
}

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults_match_admin_client() {
    let settings = defaults();
    assert_eq!(settings.api.base_url.as_str(), "http://127.0.0.1:3000/api");
    assert_eq!(settings.api.timeout, Duration::from_secs(15));
    assert_eq!(settings.filters.search_debounce, Duration::from_millis(500));
    assert_eq!(settings.filters.page_size, 5);
    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert_eq!(settings.cache.list_limit, 50);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://file.example/api".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = ConfigOverrides {
        api_url: Some("https://cli.example/api".to_string()),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        page_size: Some(20),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "https://cli.example/api");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.logging.format, LogFormat::Json);
    assert_eq!(settings.filters.page_size, 20);
}

#[test]
fn rejects_invalid_values() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://example.com".to_string());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid { key: "api.base_url", .. })
    ));

    let mut raw = RawSettings::default();
    raw.filters.page_size = Some(0);
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid { key: "filters.page_size", .. })
    ));

    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid { key: "logging.level", .. })
    ));
}

#[test]
#[serial]
fn config_file_is_layered_under_cli() {
    let file = toml_file(
        r#"
[api]
base_url = "http://file.example/api"
timeout_seconds = 3

[filters]
search_debounce_ms = 250
"#,
    );

    let settings = load(Some(file.path()), &ConfigOverrides::default()).expect("load settings");
    assert_eq!(settings.api.base_url.as_str(), "http://file.example/api");
    assert_eq!(settings.api.timeout, Duration::from_secs(3));
    assert_eq!(settings.filters.search_debounce, Duration::from_millis(250));

    let overrides = ConfigOverrides {
        api_timeout_seconds: Some(9),
        ..Default::default()
    };
    let settings = load(Some(file.path()), &overrides).expect("load settings");
    assert_eq!(settings.api.timeout, Duration::from_secs(9));
}

#[test]
#[serial]
fn environment_overrides_file() {
    let file = toml_file("[api]\nbase_url = \"http://file.example/api\"\n");

    // SAFETY: serialized with every other test that touches the environment.
    unsafe { std::env::set_var("BLOGDESK__API__BASE_URL", "http://env.example/api") };
    let settings = load(Some(file.path()), &ConfigOverrides::default());
    unsafe { std::env::remove_var("BLOGDESK__API__BASE_URL") };

    let settings = settings.expect("load settings");
    assert_eq!(settings.api.base_url.as_str(), "http://env.example/api");
}

#[test]
#[serial]
fn missing_explicit_config_file_fails() {
    let result = load(
        Some(Path::new("/definitely/not/here.toml")),
        &ConfigOverrides::default(),
    );
    assert!(matches!(result, Err(LoadError::Build(_))));
}
