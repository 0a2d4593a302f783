use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::view::PageSize;
use tracing::{debug, warn};

use crate::{
    error::SettingsError,
    source::{parse_endpoint, DEFAULT_ENDPOINT},
};

pub const LOCAL_SETTINGS_FILE: &str = "comment_table.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint_url: String,
    pub page_size: PageSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.into(),
            page_size: PageSize::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    endpoint_url: Option<String>,
    page_size: Option<RawPageSize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPageSize {
    Number(i64),
    Text(String),
}

impl RawPageSize {
    fn resolve(&self) -> Result<PageSize, SettingsError> {
        match self {
            RawPageSize::Number(value) => PageSize::from_selector(*value)
                .ok_or_else(|| SettingsError::PageSize(value.to_string())),
            RawPageSize::Text(text) => text.parse().map_err(SettingsError::PageSize),
        }
    }
}

/// Loads settings from the first settings file found, then the
/// environment. `explicit` replaces the file search when given.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => settings_file_candidates().into_iter().find(|p| p.is_file()),
    };
    let file = match &path {
        Some(path) => Some((path.display().to_string(), read_settings_file(path)?)),
        None => None,
    };
    let file = file
        .as_ref()
        .map(|(label, raw)| (label.as_str(), raw.as_str()));
    Settings::from_layers(file, |name| std::env::var(name).ok())
}

pub fn settings_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_SETTINGS_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("comment_table").join("settings.toml"));
    }
    candidates
}

fn read_settings_file(path: &Path) -> Result<String, SettingsError> {
    debug!(path = %path.display(), "reading settings file");
    fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })
}

impl Settings {
    /// Defaults, then `file` (`(path, contents)`), then variables looked
    /// up via `env`.
    pub fn from_layers(
        file: Option<(&str, &str)>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        if let Some((path, raw)) = file {
            let file_cfg: SettingsFile =
                toml::from_str(raw).map_err(|source| SettingsError::Parse {
                    path: path.to_string(),
                    source,
                })?;
            if let Some(v) = file_cfg.endpoint_url {
                settings.endpoint_url = v;
            }
            if let Some(v) = file_cfg.page_size {
                settings.page_size = v.resolve()?;
            }
        }

        if let Some(v) = env("COMMENT_TABLE_ENDPOINT") {
            settings.endpoint_url = v;
        }
        if let Some(v) = env("APP__ENDPOINT_URL") {
            settings.endpoint_url = v;
        }

        if let Some(v) = env("APP__PAGE_SIZE") {
            match v.parse::<PageSize>() {
                Ok(parsed) => settings.page_size = parsed,
                Err(err) => warn!("ignoring APP__PAGE_SIZE: {err}"),
            }
        }

        parse_endpoint(&settings.endpoint_url)?;
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
