use ecovision_schemas::selection::Family;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcovisionError {
    #[error("A city must be selected before building the dashboard")]
    CityNotSelected,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown field '{field}' for {family} series (expected one of: {expected})")]
    UnknownField {
        family: String,
        field: String,
        expected: String,
    },

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to encode JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to write CSV for '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("CSV export for '{0}' is not valid UTF-8: {1}")]
    ExportEncoding(String, #[source] std::string::FromUtf8Error),

    #[error("{0} series was not generated for this request")]
    FamilyNotGenerated(Family),

    #[error("Unsupported configuration schema version '{found}' (expected '{expected}')")]
    UnsupportedSchema { found: String, expected: String },
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("OPENAI_API_KEY is not set")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream reply had no message content")]
    EmptyReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_errors_name_their_cause() {
        let utf8 = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = EcovisionError::ExportEncoding("Air".to_string(), utf8);
        assert!(err.to_string().starts_with("CSV export for 'Air' is not valid UTF-8"));
        assert_eq!(
            EcovisionError::FamilyNotGenerated(Family::Water).to_string(),
            "Water series was not generated for this request"
        );
    }
}
