use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    /// The feed introduced a stop identifier convention with no explicit mapping.
    /// Not recoverable at runtime; the agency configuration has to be updated.
    #[error("Unexpected stop ID '{stop_id}' (stop code: {stop_code:?})")]
    UnmappedIdentifier {
        stop_id: String,
        stop_code: Option<String>,
    },

    #[error("Invalid normalization rule '{rule}': {source}")]
    InvalidRule {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown agency: {0}")]
    UnknownAgency(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    pub fn unmapped(stop_id: &str, stop_code: Option<&str>) -> Self {
        AdapterError::UnmappedIdentifier {
            stop_id: stop_id.to_string(),
            stop_code: stop_code.map(str::to_string),
        }
    }

    /// Whether this error must abort processing of the whole feed
    pub fn is_fatal(&self) -> bool {
        matches!(self, AdapterError::UnmappedIdentifier { .. })
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_identifier_message() {
        let err = AdapterError::unmapped("Z", Some("X1"));
        assert_eq!(
            err.to_string(),
            "Unexpected stop ID 'Z' (stop code: Some(\"X1\"))"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_config_error_is_not_fatal() {
        let err = AdapterError::Config("bad color".to_string());
        assert!(!err.is_fatal());
    }
}
