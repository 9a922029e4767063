pub mod agency;
pub mod common;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod stops;
pub mod transform;

pub use agency::{AgencyProfile, AgencyRegistry};
pub use common::{AdapterError, RawStop, RawTrip, Result, Stop, Trip};
pub use config::{AgencySettings, Config};
pub use normalize::{normalize, Pipeline, PipelineKind, RuleTable};
pub use stops::{resolve_stop_code, IdFallbackTable, StopIdResolver};
pub use transform::FeedTransformer;
