use std::{collections::HashMap, fs, time::Duration};

use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    /// Mesh endpoint serving both catalog and CMS queries. Passed through as is.
    pub graphql_endpoint: String,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            graphql_endpoint: "http://127.0.0.1:4000/graphql".into(),
            request_timeout_seconds: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(file = SETTINGS_FILE, %error, "ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("graphql_endpoint").and_then(toml::Value::as_str) {
        settings.graphql_endpoint = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("request_timeout_seconds")
        .and_then(toml::Value::as_integer)
    {
        settings.request_timeout_seconds = u64::try_from(v).ok();
    }
}

pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("COMMERCE_GRAPHQL_ENDPOINT") {
        settings.graphql_endpoint = v;
    }
    if let Some(v) = lookup("APP__GRAPHQL_ENDPOINT") {
        settings.graphql_endpoint = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECONDS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_seconds = Some(parsed),
            Err(_) => warn!(value = %v, "APP__REQUEST_TIMEOUT_SECONDS is not a number; ignoring"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
