use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use super::{st_albert, AgencyProfile};
use crate::common::error::AdapterError;
use crate::config::AgencySettings;
use crate::transform::FeedTransformer;

/// Registry of agency profiles, keyed by agency ID
pub struct AgencyRegistry {
    agencies: HashMap<String, Arc<AgencyProfile>>,
}

impl AgencyRegistry {
    /// Create a registry with the built-in agencies
    pub fn new() -> Result<Self> {
        let mut registry = Self::empty();
        registry.register(st_albert::profile(AgencySettings::default())?);
        Ok(registry)
    }

    pub fn empty() -> Self {
        Self {
            agencies: HashMap::new(),
        }
    }

    /// Register a profile, replacing any previous one with the same agency ID
    pub fn register(&mut self, profile: AgencyProfile) {
        self.agencies
            .insert(profile.id().to_string(), Arc::new(profile));
    }

    pub fn get(&self, agency_id: &str) -> Option<Arc<AgencyProfile>> {
        self.agencies.get(agency_id).cloned()
    }

    /// Build a transformer for an agency
    pub fn transformer(&self, agency_id: &str) -> Result<FeedTransformer> {
        match self.get(agency_id) {
            Some(profile) => Ok(FeedTransformer::new(profile)),
            None => {
                warn!(agency_id, "No agency registered");
                Err(AdapterError::UnknownAgency(agency_id.to_string()).into())
            }
        }
    }

    /// List all registered agency IDs
    pub fn list_agencies(&self) -> Vec<&str> {
        self.agencies.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::get_supported_agencies;

    #[test]
    fn test_registry_has_built_in_agencies() {
        let registry = AgencyRegistry::new().unwrap();

        let agencies = registry.list_agencies();
        for id in get_supported_agencies() {
            assert!(agencies.contains(&id));
        }
    }

    #[test]
    fn test_registry_returns_error_for_unknown_agency() {
        let registry = AgencyRegistry::new().unwrap();

        let err = registry.transformer("unknown_agency").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AdapterError>(),
            Some(AdapterError::UnknownAgency(id)) if id == "unknown_agency"
        ));
    }

    #[test]
    fn test_register_replaces_profile() {
        let mut registry = AgencyRegistry::new().unwrap();
        let settings = AgencySettings {
            agency_name: "St. Albert Transit".to_string(),
            ..AgencySettings::default()
        };
        registry.register(AgencyProfile::new(settings).unwrap());

        let profile = registry.get("2").unwrap();
        assert_eq!(profile.name(), "St. Albert Transit");
        assert!(profile.overrides().stop_id.is_none());
        assert_eq!(registry.list_agencies().len(), 1);
    }
}
