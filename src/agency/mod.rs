// Agency adapters: a profile of declarative settings plus optional overrides

pub mod registry;
pub mod st_albert;

pub use registry::AgencyRegistry;

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::common::error::{AdapterError, Result};
use crate::common::types::RawStop;
use crate::config::AgencySettings;

pub type StopIdFn = Arc<dyn Fn(&RawStop) -> Result<u32> + Send + Sync>;
pub type StopCodeFn = Arc<dyn Fn(&RawStop) -> String + Send + Sync>;
pub type LabelFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Per-record behaviors an agency may replace.
/// `None` means the generic default behavior applies.
#[derive(Clone, Default)]
pub struct AgencyOverrides {
    pub stop_id: Option<StopIdFn>,
    pub stop_code: Option<StopCodeFn>,
    pub stop_original_id: Option<LabelFn>,
    pub trip_headsign: Option<LabelFn>,
    pub stop_name: Option<LabelFn>,
}

impl fmt::Debug for AgencyOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgencyOverrides")
            .field("stop_id", &self.stop_id.is_some())
            .field("stop_code", &self.stop_code.is_some())
            .field("stop_original_id", &self.stop_original_id.is_some())
            .field("trip_headsign", &self.trip_headsign.is_some())
            .field("stop_name", &self.stop_name.is_some())
            .finish()
    }
}

/// Everything the surrounding framework needs to know about one agency.
/// Immutable after construction and safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct AgencyProfile {
    settings: AgencySettings,
    service_id_cleanup: Option<Regex>,
    overrides: AgencyOverrides,
}

impl AgencyProfile {
    /// A profile with no overrides: every record gets the default behavior
    pub fn new(settings: AgencySettings) -> Result<Self> {
        settings.validate()?;

        let service_id_cleanup = settings
            .service_id_cleanup_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|source| AdapterError::InvalidRule {
                rule: "service_id_cleanup".to_string(),
                source,
            })?;

        Ok(Self {
            settings,
            service_id_cleanup,
            overrides: AgencyOverrides::default(),
        })
    }

    pub fn with_stop_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&RawStop) -> Result<u32> + Send + Sync + 'static,
    {
        self.overrides.stop_id = Some(Arc::new(f));
        self
    }

    pub fn with_stop_code<F>(mut self, f: F) -> Self
    where
        F: Fn(&RawStop) -> String + Send + Sync + 'static,
    {
        self.overrides.stop_code = Some(Arc::new(f));
        self
    }

    pub fn with_stop_original_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.overrides.stop_original_id = Some(Arc::new(f));
        self
    }

    pub fn with_trip_headsign<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.overrides.trip_headsign = Some(Arc::new(f));
        self
    }

    pub fn with_stop_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.overrides.stop_name = Some(Arc::new(f));
        self
    }

    pub fn id(&self) -> &str {
        &self.settings.agency_id
    }

    pub fn name(&self) -> &str {
        &self.settings.agency_name
    }

    pub fn settings(&self) -> &AgencySettings {
        &self.settings
    }

    pub fn overrides(&self) -> &AgencyOverrides {
        &self.overrides
    }

    /// Strip scheduling-variant prefixes/suffixes from a calendar service ID
    pub fn clean_service_id(&self, service_id: &str) -> String {
        match &self.service_id_cleanup {
            Some(re) => re.replace_all(service_id, "").into_owned(),
            None => service_id.to_string(),
        }
    }
}
