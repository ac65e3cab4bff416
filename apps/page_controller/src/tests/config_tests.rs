use super::*;

use std::{collections::HashMap, env, process};

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("career_page_{name}_{}", process::id()));
    fs::create_dir_all(&dir).expect("mkdir");
    let path = dir.join(CONFIG_FILE);
    fs::write(&path, contents).expect("write config");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let settings =
        load_settings_from(Path::new("/nonexistent/career_page.toml"), no_env).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.timings.notification_display,
        Duration::from_millis(3000)
    );
    assert_eq!(settings.timings.notification_fade, Duration::from_millis(500));
    assert_eq!(settings.timings.redirect_delay, Duration::from_millis(2000));
}

#[test]
fn file_values_accept_strings_and_integers() {
    let path = temp_config(
        "file_values",
        r#"
server_url = "http://careers.internal:8080"
session_cookie = "session=xyz"
redirect_delay_ms = 250
notification_fade_ms = "100"
"#,
    );
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings.server_url, "http://careers.internal:8080");
    assert_eq!(settings.session_cookie.as_deref(), Some("session=xyz"));
    assert_eq!(settings.timings.redirect_delay, Duration::from_millis(250));
    assert_eq!(settings.timings.notification_fade, Duration::from_millis(100));
    assert_eq!(
        settings.timings.notification_display,
        Duration::from_millis(3000)
    );
    fs::remove_dir_all(path.parent().expect("dir")).expect("cleanup");
}

#[test]
fn app_env_overrides_legacy_env_and_file() {
    let path = temp_config("env_order", "server_url = \"http://from-file\"\n");
    let vars: HashMap<&str, &str> = [
        ("CAREER_SERVER_URL", "http://legacy"),
        ("APP__SERVER_URL", "http://app"),
        ("CAREER_REDIRECT_DELAY_MS", "10"),
        ("APP__SESSION_COOKIE", ""),
    ]
    .into_iter()
    .collect();
    let settings = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()))
        .expect("settings");
    assert_eq!(settings.server_url, "http://app");
    assert_eq!(settings.timings.redirect_delay, Duration::from_millis(10));
    assert_eq!(settings.session_cookie, None);
    fs::remove_dir_all(path.parent().expect("dir")).expect("cleanup");
}

#[test]
fn invalid_millis_are_reported() {
    let err = load_settings_from(Path::new("/nonexistent/career_page.toml"), |key| {
        (key == "APP__NOTIFICATION_DISPLAY_MS").then(|| "soon".to_string())
    })
    .expect_err("invalid number");
    assert!(matches!(
        err,
        ConfigError::InvalidNumber { ref key, ref value }
            if key == "APP__NOTIFICATION_DISPLAY_MS" && value == "soon"
    ));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_config("malformed", "server_url = \n");
    let err = load_settings_from(&path, no_env).expect_err("parse error");
    assert!(matches!(err, ConfigError::Parse { .. }));
    fs::remove_dir_all(path.parent().expect("dir")).expect("cleanup");
}
