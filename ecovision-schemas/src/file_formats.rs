use crate::{
    chat::ChatSettings,
    city::City,
    selection::{Category, Window},
};
use serde::{Deserialize, Serialize};

/// The only configuration layout this release reads.
pub const CONFIG_SCHEMA_VERSION: &str = "1";

/// Selector values used when the command line leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionDefaults {
    pub city: City,
    pub category: Category,
    pub hours: Window,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            city: City::default(),
            category: Category::default(),
            hours: Window::default(),
        }
    }
}

/// Layout of the `ecovision.yaml` configuration file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub schema_version: String,
    pub output_dir: String,
    pub charts: bool,
    pub defaults: SelectionDefaults,
    pub chat: ChatSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            output_dir: "./data/runs".to_string(),
            charts: true,
            defaults: SelectionDefaults::default(),
            chat: ChatSettings::default(),
        }
    }
}
