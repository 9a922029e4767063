// Stop identifier and stop code derivation

use std::fmt;
use std::num::ParseIntError;
use tracing::{debug, error};

use crate::common::constants::{DEFAULT_RESERVED_BAND_WIDTH, STOP_CODE_PLACEHOLDER};
use crate::common::error::{AdapterError, Result};
use crate::common::types::RawStop;
use crate::metrics::StopIdMetrics;

/// Letter-coded "virtual" stops (terminal bays) and their 1-based ranks.
/// Explicit rather than computed: the letter set is dictated by the feed.
const RESERVED_LETTERS: [(&str, u32); 11] = [
    ("A", 1),
    ("B", 2),
    ("C", 3),
    ("D", 4),
    ("E", 5),
    ("F", 6),
    ("G", 7),
    ("H", 8),
    ("I", 9),
    ("J", 10),
    ("K", 11),
];

/// Reserved integer bands for letter-coded stops: `rank * band_width`.
///
/// The bands stay disjoint from numeric stop codes only while those codes are
/// below `band_width`; raise it in the agency settings if the feed grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFallbackTable {
    bands: Vec<(String, u32)>,
}

impl IdFallbackTable {
    pub fn reserved_letters(band_width: u32) -> Self {
        Self {
            bands: RESERVED_LETTERS
                .iter()
                .map(|(letter, rank)| (letter.to_string(), rank.saturating_mul(band_width)))
                .collect(),
        }
    }

    /// Add or replace a single mapping, for feeds that introduce a new code
    pub fn with_band(mut self, code: &str, id: u32) -> Self {
        match self.bands.iter_mut().find(|(c, _)| c == code) {
            Some(entry) => entry.1 = id,
            None => self.bands.push((code.to_string(), id)),
        }
        self
    }

    pub fn lookup(&self, code: &str) -> Option<u32> {
        self.bands
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, id)| *id)
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl Default for IdFallbackTable {
    fn default() -> Self {
        Self::reserved_letters(DEFAULT_RESERVED_BAND_WIDTH)
    }
}

/// Which strategy produced a stop ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    StopCode,
    NumericId,
    ReservedBand,
}

impl IdStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdStrategy::StopCode => "stop_code",
            IdStrategy::NumericId => "numeric_id",
            IdStrategy::ReservedBand => "reserved_band",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for non-empty strings of ASCII decimal digits
pub fn is_digits_only(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `None` when `s` is not all digits; `Some(Err)` when it is but overflows `u32`
fn digit_value(s: &str) -> Option<std::result::Result<u32, ParseIntError>> {
    is_digits_only(s).then(|| s.parse())
}

/// Derives collision-free numeric stop IDs
#[derive(Debug, Clone, Default)]
pub struct StopIdResolver {
    fallback: IdFallbackTable,
}

impl StopIdResolver {
    pub fn new(fallback: IdFallbackTable) -> Self {
        Self { fallback }
    }

    pub fn with_band_width(band_width: u32) -> Self {
        Self::new(IdFallbackTable::reserved_letters(band_width))
    }

    pub fn fallback_table(&self) -> &IdFallbackTable {
        &self.fallback
    }

    /// Resolve a stop ID, in priority order:
    /// 1. a digits-only stop code
    /// 2. a digits-only raw ID
    /// 3. a reserved letter from the fallback table
    ///
    /// Anything else is `UnmappedIdentifier`; no ID is ever guessed. A
    /// digits-only code or ID too large for `u32` stops the search right
    /// there instead of falling through to a later strategy.
    pub fn resolve_with_strategy(
        &self,
        code: Option<&str>,
        raw_id: &str,
    ) -> Result<(u32, IdStrategy)> {
        let resolved = match (code.and_then(digit_value), digit_value(raw_id)) {
            (Some(Ok(id)), _) => Some((id, IdStrategy::StopCode)),
            (Some(Err(_)), _) => None,
            (None, Some(Ok(id))) => Some((id, IdStrategy::NumericId)),
            (None, Some(Err(_))) => None,
            (None, None) => self
                .fallback
                .lookup(raw_id)
                .map(|id| (id, IdStrategy::ReservedBand)),
        };

        match resolved {
            Some((id, strategy)) => {
                debug!(raw_id, ?code, id, %strategy, "resolved stop ID");
                StopIdMetrics::record_resolved(strategy.as_str());
                Ok((id, strategy))
            }
            None => {
                error!(raw_id, ?code, "Unexpected stop ID");
                StopIdMetrics::record_unmapped();
                Err(AdapterError::unmapped(raw_id, code))
            }
        }
    }

    pub fn resolve(&self, code: Option<&str>, raw_id: &str) -> Result<u32> {
        self.resolve_with_strategy(code, raw_id).map(|(id, _)| id)
    }

    pub fn resolve_stop(&self, stop: &RawStop) -> Result<u32> {
        self.resolve(stop.code(), &stop.id)
    }
}

/// Generic stop-code cleanup applied when an agency does not override it
pub fn default_stop_code(code: Option<&str>) -> String {
    code.map(str::trim).unwrap_or_default().to_string()
}

/// Generic stop ID: the raw ID must be digits only
pub fn default_stop_id(stop: &RawStop) -> Result<u32> {
    match digit_value(&stop.id) {
        Some(Ok(id)) => Ok(id),
        _ => Err(AdapterError::unmapped(&stop.id, stop.code())),
    }
}

/// Rider-facing stop code. An absent, empty or `"0"` code falls back to the
/// raw stop ID verbatim; `"0"` is a placeholder in this feed, not a real code.
pub fn resolve_stop_code(code: Option<&str>, fallback_id: &str) -> String {
    match code {
        None => fallback_id.to_string(),
        Some(c) if c.is_empty() || c == STOP_CODE_PLACEHOLDER => fallback_id.to_string(),
        Some(c) => default_stop_code(Some(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_code_wins() {
        let resolver = StopIdResolver::default();
        assert_eq!(
            resolver.resolve_with_strategy(Some("1234"), "A").unwrap(),
            (1234, IdStrategy::StopCode)
        );
        assert_eq!(resolver.resolve(Some("0042"), "9999").unwrap(), 42);
    }

    #[test]
    fn test_numeric_id_when_code_not_numeric() {
        let resolver = StopIdResolver::default();
        assert_eq!(
            resolver.resolve_with_strategy(Some("X1"), "5678").unwrap(),
            (5678, IdStrategy::NumericId)
        );
        assert_eq!(resolver.resolve(None, "5678").unwrap(), 5678);
        assert_eq!(resolver.resolve(Some(""), "5678").unwrap(), 5678);
    }

    #[test]
    fn test_reserved_letters() {
        let resolver = StopIdResolver::default();
        let expected = [
            ("A", 10_000),
            ("B", 20_000),
            ("C", 30_000),
            ("D", 40_000),
            ("E", 50_000),
            ("F", 60_000),
            ("G", 70_000),
            ("H", 80_000),
            ("I", 90_000),
            ("J", 100_000),
            ("K", 110_000),
        ];
        for (letter, id) in expected {
            assert_eq!(
                resolver.resolve_with_strategy(None, letter).unwrap(),
                (id, IdStrategy::ReservedBand),
                "letter {letter}"
            );
        }
    }

    #[test]
    fn test_unmapped_identifiers() {
        let resolver = StopIdResolver::default();
        for raw in ["Z", "L", "12A", "a", "", "AB", " 12"] {
            let err = resolver.resolve(None, raw).unwrap_err();
            assert!(
                matches!(err, AdapterError::UnmappedIdentifier { ref stop_id, .. } if stop_id == raw),
                "expected unmapped for {raw:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_overflowing_digits_are_unmapped() {
        let resolver = StopIdResolver::default();
        assert!(resolver.resolve(None, "99999999999").is_err());
        assert_eq!(resolver.resolve(None, "4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn test_overflowing_code_never_falls_through() {
        let resolver = StopIdResolver::default();

        // Would otherwise collide with the real terminal bay "A"
        let err = resolver.resolve(Some("4294967296"), "A").unwrap_err();
        assert!(matches!(
            err,
            AdapterError::UnmappedIdentifier { ref stop_id, ref stop_code }
                if stop_id == "A" && stop_code.as_deref() == Some("4294967296")
        ));
        assert!(resolver.resolve(Some("4294967296"), "1234").is_err());
    }

    #[test]
    fn test_overflowing_raw_id_never_reaches_table() {
        let table = IdFallbackTable::default().with_band("4294967296", 7);
        let resolver = StopIdResolver::new(table);
        assert!(resolver.resolve(None, "4294967296").is_err());
        assert!(resolver.resolve(Some("X1"), "4294967296").is_err());
        assert!(default_stop_id(&RawStop::new("4294967296", None, "x")).is_err());
    }

    #[test]
    fn test_custom_band_width_and_extension() {
        let table = IdFallbackTable::reserved_letters(100_000).with_band("L", 1_200_000);
        let resolver = StopIdResolver::new(table);
        assert_eq!(resolver.resolve(None, "A").unwrap(), 100_000);
        assert_eq!(resolver.resolve(None, "L").unwrap(), 1_200_000);
        assert_eq!(resolver.fallback_table().len(), 12);
        assert!(!resolver.fallback_table().is_empty());
    }

    #[test]
    fn test_resolve_stop_code() {
        assert_eq!(resolve_stop_code(None, "42"), "42");
        assert_eq!(resolve_stop_code(Some("0"), "42"), "42");
        assert_eq!(resolve_stop_code(Some(""), "42"), "42");
        assert_eq!(resolve_stop_code(Some(" 1234 "), "42"), "1234");
        assert_eq!(resolve_stop_code(Some("00"), "42"), "00");
    }

    #[test]
    fn test_default_stop_id() {
        assert_eq!(default_stop_id(&RawStop::new("77", None, "x")).unwrap(), 77);
        assert!(default_stop_id(&RawStop::new("A", None, "x")).is_err());
    }
}
