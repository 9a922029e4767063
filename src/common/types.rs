use serde::{Deserialize, Serialize};

/// A stop record as produced by the feed reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStop {
    pub id: String,
    pub code: Option<String>,
    pub name: String,
}

impl RawStop {
    pub fn new(id: &str, code: Option<&str>, name: &str) -> Self {
        Self {
            id: id.to_string(),
            code: code.map(str::to_string),
            name: name.to_string(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// A trip record as produced by the feed reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrip {
    pub headsign: String,
}

impl RawTrip {
    pub fn new(headsign: &str) -> Self {
        Self {
            headsign: headsign.to_string(),
        }
    }
}

/// A stop after the agency adapter has been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Stable numeric identifier used by the downstream database
    pub id: u32,
    /// Source identifier after original-ID cleanup
    pub original_id: String,
    /// Rider-facing stop code
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub headsign: String,
}
