// Agency facts for St. Albert Transit (ETS open data GTFS)
// These are the defaults for `AgencySettings` when a config file omits them

pub const ST_ALBERT_AGENCY_ID: &str = "2";
pub const ST_ALBERT_AGENCY_NAME: &str = "St AT";

// GREEN (from web site CSS)
pub const ST_ALBERT_AGENCY_COLOR: &str = "4AA942";

pub const LANG_EN: &str = "en";

/// GTFS route_type for bus service
pub const ROUTE_TYPE_BUS: u16 = 3;

/// Strips scheduling-variant prefixes (DX-, SA-, SU-, Blocking-) and the
/// statutory-holiday suffix from calendar service IDs
pub const ST_ALBERT_SERVICE_ID_CLEANUP: &str = r"^(DX|SA|SU|Blocking)-|-(STAT)-\w+\d{2}-\d{7}$";

/// Words kept upper-cased by headsign title-casing (Transit Centre)
pub const ST_ALBERT_IGNORED_WORDS: &[&str] = &["TC"];

/// Width of each reserved stop-ID band assigned to letter-coded stops.
/// Assumes numeric stop codes stay below this value.
pub const DEFAULT_RESERVED_BAND_WIDTH: u32 = 10_000;

/// Stop code meaning "no real code" in this feed
pub const STOP_CODE_PLACEHOLDER: &str = "0";

/// Get all agency IDs registered by default
pub fn get_supported_agencies() -> Vec<&'static str> {
    vec![ST_ALBERT_AGENCY_ID]
}
