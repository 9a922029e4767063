use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::constants::{
    DEFAULT_RESERVED_BAND_WIDTH, LANG_EN, ROUTE_TYPE_BUS, ST_ALBERT_AGENCY_COLOR,
    ST_ALBERT_AGENCY_ID, ST_ALBERT_AGENCY_NAME, ST_ALBERT_IGNORED_WORDS,
    ST_ALBERT_SERVICE_ID_CLEANUP,
};
use crate::common::error::{AdapterError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agency: AgencySettings,
}

/// Declarative agency facts consumed verbatim by the surrounding framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencySettings {
    pub agency_id: String,
    pub agency_name: String,
    pub languages: Vec<String>,
    /// RGB color as 6 hex digits, without leading '#'
    pub agency_color: String,
    pub route_type: u16,
    pub service_id_cleanup_pattern: Option<String>,
    /// Words title-casing keeps upper-cased (acronyms)
    pub ignored_words: Vec<String>,
    pub default_route_id_enabled: bool,
    pub use_route_short_name_for_route_id: bool,
    pub default_route_long_name_enabled: bool,
    pub default_agency_color_enabled: bool,
    pub direction_finder_enabled: bool,
    /// Width of each reserved stop-ID band for letter-coded stops
    pub reserved_band_width: u32,
}

impl Default for AgencySettings {
    fn default() -> Self {
        Self {
            agency_id: ST_ALBERT_AGENCY_ID.to_string(),
            agency_name: ST_ALBERT_AGENCY_NAME.to_string(),
            languages: vec![LANG_EN.to_string()],
            agency_color: ST_ALBERT_AGENCY_COLOR.to_string(),
            route_type: ROUTE_TYPE_BUS,
            service_id_cleanup_pattern: Some(ST_ALBERT_SERVICE_ID_CLEANUP.to_string()),
            ignored_words: ST_ALBERT_IGNORED_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            default_route_id_enabled: true,
            use_route_short_name_for_route_id: true,
            default_route_long_name_enabled: true,
            default_agency_color_enabled: true,
            direction_finder_enabled: true,
            reserved_band_width: DEFAULT_RESERVED_BAND_WIDTH,
        }
    }
}

impl AgencySettings {
    pub fn validate(&self) -> Result<()> {
        if self.agency_id.trim().is_empty() {
            return Err(AdapterError::Config("agency_id must not be empty".to_string()));
        }
        if self.agency_color.len() != 6 || !self.agency_color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AdapterError::Config(format!(
                "agency_color must be 6 hex digits, got '{}'",
                self.agency_color
            )));
        }
        if self.reserved_band_width == 0 || self.reserved_band_width > u32::MAX / 11 {
            return Err(AdapterError::Config(format!(
                "reserved_band_width must be between 1 and {}, got {}",
                u32::MAX / 11,
                self.reserved_band_width
            )));
        }
        if let Some(pattern) = &self.service_id_cleanup_pattern {
            regex::Regex::new(pattern).map_err(|e| {
                AdapterError::Config(format!("Invalid service_id_cleanup_pattern '{}': {}", pattern, e))
            })?;
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            AdapterError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.agency.validate()
    }
}
