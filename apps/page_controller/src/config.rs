use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;

pub const CONFIG_FILE: &str = "career_page.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}: expected milliseconds")]
    InvalidNumber { key: String, value: String },
}

/// Delays the page waits before dismissing notifications and redirecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTimings {
    pub notification_display: Duration,
    pub notification_fade: Duration,
    pub redirect_delay: Duration,
}

impl Default for PageTimings {
    fn default() -> Self {
        Self {
            notification_display: Duration::from_millis(3000),
            notification_fade: Duration::from_millis(500),
            redirect_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub session_cookie: Option<String>,
    pub timings: PageTimings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            session_cookie: None,
            timings: PageTimings::default(),
        }
    }
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `path` (when it exists), then environment variables.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let table: toml::Table = raw.parse().map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            let get = |key: &str| match table.get(key) {
                Some(toml::Value::String(value)) => Some(value.clone()),
                Some(toml::Value::Integer(value)) => Some(value.to_string()),
                _ => None,
            };
            apply_overrides(&mut settings, get, FILE_KEYS)?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    apply_overrides(&mut settings, &env, LEGACY_ENV_KEYS)?;
    apply_overrides(&mut settings, &env, ENV_KEYS)?;
    Ok(settings)
}

struct OverrideKeys {
    server_url: &'static str,
    session_cookie: &'static str,
    notification_display_ms: &'static str,
    notification_fade_ms: &'static str,
    redirect_delay_ms: &'static str,
}

const FILE_KEYS: &OverrideKeys = &OverrideKeys {
    server_url: "server_url",
    session_cookie: "session_cookie",
    notification_display_ms: "notification_display_ms",
    notification_fade_ms: "notification_fade_ms",
    redirect_delay_ms: "redirect_delay_ms",
};

const LEGACY_ENV_KEYS: &OverrideKeys = &OverrideKeys {
    server_url: "CAREER_SERVER_URL",
    session_cookie: "CAREER_SESSION_COOKIE",
    notification_display_ms: "CAREER_NOTIFICATION_DISPLAY_MS",
    notification_fade_ms: "CAREER_NOTIFICATION_FADE_MS",
    redirect_delay_ms: "CAREER_REDIRECT_DELAY_MS",
};

const ENV_KEYS: &OverrideKeys = &OverrideKeys {
    server_url: "APP__SERVER_URL",
    session_cookie: "APP__SESSION_COOKIE",
    notification_display_ms: "APP__NOTIFICATION_DISPLAY_MS",
    notification_fade_ms: "APP__NOTIFICATION_FADE_MS",
    redirect_delay_ms: "APP__REDIRECT_DELAY_MS",
};

fn apply_overrides(
    settings: &mut Settings,
    get: impl Fn(&str) -> Option<String>,
    keys: &OverrideKeys,
) -> Result<(), ConfigError> {
    if let Some(v) = get(keys.server_url) {
        settings.server_url = v;
    }
    if let Some(v) = get(keys.session_cookie) {
        settings.session_cookie = Some(v).filter(|cookie| !cookie.is_empty());
    }
    if let Some(v) = get(keys.notification_display_ms) {
        settings.timings.notification_display = parse_millis(keys.notification_display_ms, &v)?;
    }
    if let Some(v) = get(keys.notification_fade_ms) {
        settings.timings.notification_fade = parse_millis(keys.notification_fade_ms, &v)?;
    }
    if let Some(v) = get(keys.redirect_delay_ms) {
        settings.timings.redirect_delay = parse_millis(keys.redirect_delay_ms, &v)?;
    }
    Ok(())
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
