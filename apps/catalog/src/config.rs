use std::{collections::HashMap, fs};

use client_core::{DEFAULT_API_BASE_URL, FEATURED_OFFSET};

pub const CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub featured_offset: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 10,
            featured_offset: FEATURED_OFFSET,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(CONFIG_FILE).ok();
    settings_from_sources(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `catalog.toml`, then the environment. Values that fail to
/// parse are ignored.
pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url").and_then(|v| v.as_str()) {
                    settings.api_base_url = v.to_string();
                }
                if let Some(v) = file_cfg
                    .get("request_timeout_secs")
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u64::try_from(v).ok())
                {
                    settings.request_timeout_secs = v;
                }
                if let Some(v) = file_cfg
                    .get("featured_offset")
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u32::try_from(v).ok())
                {
                    settings.featured_offset = v;
                }
            }
            Err(error) => tracing::warn!(%error, file = CONFIG_FILE, "ignoring unreadable config file"),
        }
    }

    if let Some(v) = env("CATALOG_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("APP__FEATURED_OFFSET") {
        if let Ok(parsed) = v.trim().parse::<u32>() {
            settings.featured_offset = parsed;
        }
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url);
    settings
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().api_base_url;
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
