use crate::error::EcovisionError;
use ecovision_schemas::file_formats::{ConfigFile, CONFIG_SCHEMA_VERSION};
use std::{fs, io::ErrorKind, path::Path};
use tracing::{debug, info};

/// Loads the YAML configuration at `path`.
///
/// A missing file is not an error: the built-in defaults apply. A file that
/// declares a different `schema_version` is rejected.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, EcovisionError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no configuration file; using defaults");
            return Ok(ConfigFile::default());
        }
        Err(e) => return Err(EcovisionError::FileIO(path.display().to_string(), e)),
    };

    let config: ConfigFile = serde_yaml::from_str(&content)
        .map_err(|e| EcovisionError::YamlParsing(path.display().to_string(), e))?;
    if config.schema_version.trim() != CONFIG_SCHEMA_VERSION {
        return Err(EcovisionError::UnsupportedSchema {
            found: config.schema_version,
            expected: CONFIG_SCHEMA_VERSION.to_string(),
        });
    }
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}
