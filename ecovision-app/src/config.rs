use anyhow::{Context, Result};
use ecovision_core::config::load_config_file;
use ecovision_schemas::{
    chat::ChatSettings,
    file_formats::{ConfigFile, SelectionDefaults},
};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "ecovision.yaml";
pub const ENDPOINT_ENV: &str = "ECOVISION_CHAT_ENDPOINT";
pub const MODEL_ENV: &str = "ECOVISION_CHAT_MODEL";

/// Effective settings for one invocation: the YAML file with environment
/// overrides applied on top.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub charts: bool,
    pub defaults: SelectionDefaults,
    pub chat: ChatSettings,
}

impl AppConfig {
    /// Loads `path` (or `ecovision.yaml`) and applies process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let file = load_config_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        Ok(Self::from_file(file, env_value))
    }

    fn from_file<F>(file: ConfigFile, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut chat = file.chat;
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            chat.endpoint = endpoint;
        }
        if let Some(model) = lookup(MODEL_ENV) {
            chat.model = model;
        }

        Self {
            output_dir: PathBuf::from(file.output_dir),
            charts: file.charts,
            defaults: file.defaults,
            chat,
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
