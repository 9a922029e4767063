// Generic per-record transformation: apply an agency's overrides, or the defaults

use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

use crate::agency::AgencyProfile;
use crate::common::error::Result;
use crate::common::types::{RawStop, RawTrip, Stop, Trip};
use crate::metrics::TransformMetrics;
use crate::normalize::clean::clean_label;
use crate::stops::{default_stop_code, default_stop_id};

/// Turns raw feed records into normalized records for one agency.
///
/// Stateless apart from the shared, read-only profile; records may be
/// transformed from any number of threads.
#[derive(Debug, Clone)]
pub struct FeedTransformer {
    profile: Arc<AgencyProfile>,
}

impl FeedTransformer {
    pub fn new(profile: Arc<AgencyProfile>) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &AgencyProfile {
        &self.profile
    }

    pub fn derived_stop_id(&self, stop: &RawStop) -> Result<u32> {
        match &self.profile.overrides().stop_id {
            Some(resolve) => resolve(stop),
            None => default_stop_id(stop),
        }
    }

    pub fn derived_stop_code(&self, stop: &RawStop) -> String {
        match &self.profile.overrides().stop_code {
            Some(resolve) => resolve(stop),
            None => default_stop_code(stop.code()),
        }
    }

    pub fn cleaned_stop_original_id(&self, stop_id: &str) -> String {
        match &self.profile.overrides().stop_original_id {
            Some(clean) => clean(stop_id),
            None => stop_id.to_string(),
        }
    }

    pub fn cleaned_headsign(&self, headsign: &str) -> String {
        match &self.profile.overrides().trip_headsign {
            Some(clean) => clean(headsign),
            None => clean_label(headsign),
        }
    }

    pub fn cleaned_stop_name(&self, name: &str) -> String {
        match &self.profile.overrides().stop_name {
            Some(clean) => clean(name),
            None => clean_label(name),
        }
    }

    pub fn cleaned_service_id(&self, service_id: &str) -> String {
        self.profile.clean_service_id(service_id)
    }

    pub fn transform_stop(&self, stop: &RawStop) -> Result<Stop> {
        Ok(Stop {
            id: self.derived_stop_id(stop)?,
            original_id: self.cleaned_stop_original_id(&stop.id),
            code: self.derived_stop_code(stop),
            name: self.cleaned_stop_name(&stop.name),
        })
    }

    pub fn transform_trip(&self, trip: &RawTrip) -> Trip {
        Trip {
            headsign: self.cleaned_headsign(&trip.headsign),
        }
    }

    /// Transform a batch of stops in parallel. One unmapped identifier fails
    /// the whole batch.
    pub fn transform_stops(&self, stops: &[RawStop]) -> Result<Vec<Stop>> {
        let transformed = stops
            .par_iter()
            .map(|stop| self.transform_stop(stop))
            .collect::<Result<Vec<_>>>()?;

        TransformMetrics::record_batch("stops", transformed.len());
        info!(agency = self.profile.id(), stops = transformed.len(), "Transformed stops");
        Ok(transformed)
    }

    pub fn transform_trips(&self, trips: &[RawTrip]) -> Vec<Trip> {
        let transformed: Vec<Trip> = trips.par_iter().map(|trip| self.transform_trip(trip)).collect();

        TransformMetrics::record_batch("trips", transformed.len());
        info!(agency = self.profile.id(), trips = transformed.len(), "Transformed trips");
        transformed
    }
}
