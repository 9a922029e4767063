// Common utilities and shared types used across the adapter

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at module root for convenience
pub use error::{AdapterError, Result};
pub use types::{RawStop, RawTrip, Stop, Trip};
