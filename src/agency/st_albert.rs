use std::sync::Arc;

use crate::common::error::Result;
use crate::common::types::RawStop;
use crate::config::AgencySettings;
use crate::normalize::clean;
use crate::normalize::{NormalizationRule, Pipeline, PipelineKind, RuleTable};
use crate::stops::{resolve_stop_code, StopIdResolver};

use super::AgencyProfile;

// https://data.edmonton.ca/Transit/ETS-Bus-Schedule-GTFS-Data-Schedules-zipped-files/urjq-fvmq

const ENDS_WITH_EXPRESS: &str = r"(?:\s+express)+$";

/// "<word> Edmonton" -> "<word> Edm"
const EDMONTON: &str = r"\b(\w+)\s+edmonton\b";
const EDMONTON_REPLACEMENT: &str = "${1} Edm";

/// St. Albert Centre is the home terminal; as a leading qualifier it repeats
/// what the route already says. Consumes every repetition (and the separators
/// between them) at once; a lone "St Albert Centre" is kept.
const STARTS_WITH_ST_ALBERT_CTR: &str =
    r"^[\s\-,;:/&@.]*(?:(?:st|saint)\.?\s+albert\s+(?:center|centre|ctr)\.?(?:\s*[-,;:/&@])*\s+)+";

/// Stop codes leaking into stop names: "12345 - ", "A - ", "A - - 1234 -"
const STARTS_WITH_STOP_CODE: &str = r"^[\s\-]*(?:(?:[0-9]{4,5}|[a-z])(?:\s*-)+\s*)+";

/// Leading "A" prefix on raw stop IDs ("A1234" -> "1234")
const STARTS_WITH_A: &str = r"^A+";

/// St. Albert Transit adapter: stop IDs from codes or reserved letter bands,
/// plus the headsign, stop-name and stop-ID cleanup pipelines
#[derive(Debug, Clone)]
pub struct StAlbertTransit {
    rules: RuleTable,
    resolver: StopIdResolver,
}

impl StAlbertTransit {
    pub fn new(settings: &AgencySettings) -> Result<Self> {
        Ok(Self {
            rules: Self::rule_table(&settings.ignored_words)?,
            resolver: StopIdResolver::with_band_width(settings.reserved_band_width),
        })
    }

    /// Build the three pipelines. Rule order matters: the home-terminal prefix
    /// is only stripped after via-clauses and "Express" are gone, and the
    /// label pass always runs last.
    pub fn rule_table<S: AsRef<str>>(ignored_words: &[S]) -> Result<RuleTable> {
        let headsign = Pipeline::new(PipelineKind::Headsign)
            .with(NormalizationRule::title_case(ignored_words))
            .with_all(clean::keep_to_and_remove_via_rules()?)
            .with(NormalizationRule::pattern("ends_with_express", ENDS_WITH_EXPRESS, "")?)
            .with(NormalizationRule::pattern("edmonton", EDMONTON, EDMONTON_REPLACEMENT)?)
            .with(NormalizationRule::pattern(
                "starts_with_st_albert_ctr",
                STARTS_WITH_ST_ALBERT_CTR,
                "",
            )?)
            .with(clean::saint_rule()?)
            .with_all(clean::and_rules()?)
            .with_all(clean::at_rules()?)
            .with_all(clean::bounds_rules()?)
            .with_all(clean::street_types_rules()?)
            .with(NormalizationRule::label());

        let stop_name = Pipeline::new(PipelineKind::StopName)
            .with(clean::slashes_rule())
            .with(NormalizationRule::pattern("starts_with_stop_code", STARTS_WITH_STOP_CODE, "")?)
            .with(NormalizationRule::pattern("edmonton", EDMONTON, EDMONTON_REPLACEMENT)?)
            .with(clean::saint_rule()?)
            .with_all(clean::and_rules()?)
            .with_all(clean::at_rules()?)
            .with_all(clean::bounds_rules()?)
            .with_all(clean::street_types_rules()?)
            .with_all(clean::numbers_rules()?)
            .with(NormalizationRule::label());

        let stop_id = Pipeline::new(PipelineKind::StopId)
            .with(NormalizationRule::pattern("starts_with_a", STARTS_WITH_A, "")?);

        Ok(RuleTable::new(headsign, stop_name, stop_id))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn clean_trip_headsign(&self, headsign: &str) -> String {
        self.rules.normalize(PipelineKind::Headsign, headsign)
    }

    pub fn clean_stop_name(&self, name: &str) -> String {
        self.rules.normalize(PipelineKind::StopName, name)
    }

    pub fn clean_stop_original_id(&self, stop_id: &str) -> String {
        self.rules.normalize(PipelineKind::StopId, stop_id)
    }

    /// Numeric stop codes double as stop IDs; letter-coded terminal bays get
    /// reserved bands. Always reads the raw stop ID, never the cleaned one.
    pub fn stop_id(&self, stop: &RawStop) -> Result<u32> {
        self.resolver.resolve_stop(stop)
    }

    pub fn stop_code(&self, stop: &RawStop) -> String {
        resolve_stop_code(stop.code(), &stop.id)
    }
}

/// The St. Albert profile: settings plus every per-record override wired to
/// one shared adapter instance
pub fn profile(settings: AgencySettings) -> Result<AgencyProfile> {
    let adapter = Arc::new(StAlbertTransit::new(&settings)?);

    let for_id = Arc::clone(&adapter);
    let for_code = Arc::clone(&adapter);
    let for_original_id = Arc::clone(&adapter);
    let for_headsign = Arc::clone(&adapter);
    let for_name = adapter;

    Ok(AgencyProfile::new(settings)?
        .with_stop_id(move |stop| for_id.stop_id(stop))
        .with_stop_code(move |stop| for_code.stop_code(stop))
        .with_stop_original_id(move |id| for_original_id.clean_stop_original_id(id))
        .with_trip_headsign(move |headsign| for_headsign.clean_trip_headsign(headsign))
        .with_stop_name(move |name| for_name.clean_stop_name(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> StAlbertTransit {
        StAlbertTransit::new(&AgencySettings::default()).unwrap()
    }

    #[test]
    fn test_headsign_destination_only() {
        let st_albert = adapter();
        assert_eq!(
            st_albert.clean_trip_headsign("St Albert Centre Downtown via Campbell Rd Express"),
            "Downtown"
        );
    }

    #[test]
    fn test_headsign_edmonton_contraction() {
        let st_albert = adapter();
        assert_eq!(st_albert.clean_trip_headsign("North Edmonton"), "North Edm");
        assert_eq!(st_albert.clean_trip_headsign("NORTH EDMONTON"), "North Edm");
        assert_eq!(st_albert.clean_trip_headsign("Edmonton"), "Edmonton");
    }

    #[test]
    fn test_headsign_keeps_transit_centre_acronym() {
        let st_albert = adapter();
        assert_eq!(
            st_albert.clean_trip_headsign("VILLAGE TRANSIT STATION to CLAREVIEW tc"),
            "Clareview TC"
        );
    }

    #[test]
    fn test_headsign_trailing_express() {
        let st_albert = adapter();
        assert_eq!(st_albert.clean_trip_headsign("Government Centre Express"), "Government Ctr");
        assert_eq!(st_albert.clean_trip_headsign("Express"), "Express");
    }

    #[test]
    fn test_headsign_home_terminal_variants() {
        let st_albert = adapter();
        for headsign in [
            "St Albert Centre Nakamun",
            "st albert center Nakamun",
            "ST ALBERT CTR Nakamun",
            "Saint Albert Centre Nakamun",
        ] {
            assert_eq!(st_albert.clean_trip_headsign(headsign), "Nakamun", "{headsign}");
        }
        // Alone, the terminal is the destination
        assert_eq!(st_albert.clean_trip_headsign("St Albert Centre"), "St Albert Ctr");
    }

    #[test]
    fn test_headsign_repeated_home_terminal_settles_in_one_call() {
        let st_albert = adapter();
        let inputs = [
            format!("{}Downtown", "St Albert Centre ".repeat(10)),
            format!("{}Downtown", "Saint Albert Centre ".repeat(12)),
            "St. Albert Ctr - Saint Albert Center / ST ALBERT CENTRE Downtown".to_string(),
            "- St Albert Centre - St Albert Centre - Downtown".to_string(),
        ];
        for headsign in &inputs {
            let once = st_albert.clean_trip_headsign(headsign);
            assert_eq!(once, "Downtown", "{headsign}");
            assert_eq!(st_albert.clean_trip_headsign(&once), once);
        }
        assert_eq!(
            st_albert.clean_trip_headsign("St Albert Centre St Albert Centre"),
            "St Albert Ctr"
        );
    }

    #[test]
    fn test_headsign_conjunctions_and_bounds() {
        let st_albert = adapter();
        assert_eq!(
            st_albert.clean_trip_headsign("eastbound grandin and saint anne street"),
            "EB Grandin & St Anne St"
        );
        assert_eq!(
            st_albert.clean_trip_headsign("Campbell Road at Giroux"),
            "Campbell Rd @ Giroux"
        );
    }

    #[test]
    fn test_stop_name_numeric_code_prefix() {
        let st_albert = adapter();
        assert_eq!(
            st_albert.clean_stop_name("12345 - Campbell Rd & St Albert Trl"),
            "Campbell Rd & St Albert Trl"
        );
        assert_eq!(
            st_albert.clean_stop_name("1234-Campbell Road and Saint Albert Trail"),
            "Campbell Rd & St Albert Trl"
        );
    }

    #[test]
    fn test_stop_name_letter_prefix_and_slashes() {
        let st_albert = adapter();
        assert_eq!(st_albert.clean_stop_name("A - Terminal / Bay 2"), "Terminal");
    }

    #[test]
    fn test_stop_name_repeated_code_prefixes() {
        let st_albert = adapter();
        let long = format!("{}{}Terminal / Bay 2", "A - ".repeat(10), "1234 - ".repeat(5));
        assert_eq!(st_albert.clean_stop_name(&long), "Terminal");
        assert_eq!(
            st_albert.clean_stop_name("- A - - B - 12345 -- Giroux Road"),
            "Giroux Rd"
        );
    }

    #[test]
    fn test_stop_name_keeps_short_numbers() {
        let st_albert = adapter();
        assert_eq!(st_albert.clean_stop_name("100 Street & 137 Avenue"), "100 St & 137 Ave");
        assert_eq!(
            st_albert.clean_stop_name("123456 - First Avenue"),
            "123456 - 1st Ave"
        );
    }

    #[test]
    fn test_stop_original_id_strips_leading_a() {
        let st_albert = adapter();
        assert_eq!(st_albert.clean_stop_original_id("A1234"), "1234");
        assert_eq!(st_albert.clean_stop_original_id("1234"), "1234");
        assert_eq!(st_albert.clean_stop_original_id("B12"), "B12");
        assert_eq!(st_albert.clean_stop_original_id("a77"), "77");
        assert_eq!(st_albert.clean_stop_original_id(&format!("{}77", "A".repeat(30))), "77");
    }

    #[test]
    fn test_stop_id_uses_raw_identifier() {
        let st_albert = adapter();
        assert_eq!(st_albert.stop_id(&RawStop::new("A", None, "Bay A")).unwrap(), 10_000);
        assert_eq!(
            st_albert.stop_id(&RawStop::new("A1234", Some("1234"), "x")).unwrap(),
            1234
        );
        assert!(st_albert.stop_id(&RawStop::new("A1234", None, "x")).is_err());
    }

    #[test]
    fn test_stop_code_placeholder() {
        let st_albert = adapter();
        assert_eq!(st_albert.stop_code(&RawStop::new("42", Some("0"), "x")), "42");
        assert_eq!(st_albert.stop_code(&RawStop::new("42", None, "x")), "42");
        assert_eq!(st_albert.stop_code(&RawStop::new("42", Some("1001"), "x")), "1001");
    }

    #[test]
    fn test_profile_wires_every_override() {
        let profile = profile(AgencySettings::default()).unwrap();
        let overrides = profile.overrides();
        assert!(overrides.stop_id.is_some());
        assert!(overrides.stop_code.is_some());
        assert!(overrides.stop_original_id.is_some());
        assert!(overrides.trip_headsign.is_some());
        assert!(overrides.stop_name.is_some());
        assert_eq!(profile.id(), "2");
        assert_eq!(profile.name(), "St AT");
    }
}
