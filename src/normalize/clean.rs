//! Generic label cleanup family shared by every agency.
//!
//! Each `*_rules` function returns compiled rules to splice into an agency
//! pipeline; the plain functions back the non-pattern rewrites.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::NormalizationRule;
use crate::common::error::Result;

// Literal patterns, checked by `test_static_patterns_compile`
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static OPEN_PAREN_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s+").expect("valid regex"));
static CLOSE_PAREN_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\)").expect("valid regex"));
static EMPTY_PARENS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").expect("valid regex"));
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.;:])").expect("valid regex"));
static REPEATED_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",(?:\s*,)+").expect("valid regex"));
static REPEATED_DASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(?:\s*-)+").expect("valid regex"));

/// Characters that may not start or end a label
const EDGE_SEPARATORS: &[char] = &['-', ',', ';', ':', '/', '&', '@', '.'];

fn is_word_start(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '-' | '(' | '/' | '&' | '@'),
    }
}

/// Upper-case `c` unless that would expand it into several characters
fn upper_single(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Capitalize the first letter of every word, leaving the rest untouched
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if is_word_start(prev) {
            out.push(upper_single(c));
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Lower-case the text, then capitalize each word. Words matching an ignored
/// word (any case) are upper-cased verbatim. Whitespace collapses to single spaces.
pub fn title_case_words<S: AsRef<str>>(text: &str, ignored_words: &[S]) -> String {
    text.split_whitespace()
        .map(|word| {
            if ignored_words
                .iter()
                .any(|ignored| ignored.as_ref().eq_ignore_ascii_case(word))
            {
                word.to_uppercase()
            } else {
                capitalize_words(&word.to_lowercase())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty segment around `separator`, trimmed
pub fn first_segment(text: &str, separator: char) -> &str {
    if !text.contains(separator) {
        return text;
    }
    text.split(separator)
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// Final label pass: collapse whitespace, tidy punctuation left behind by
/// earlier rules, trim separators from both ends, capitalize words
pub fn clean_label(label: &str) -> String {
    let mut label = WHITESPACE_RE.replace_all(label, " ").into_owned();
    // nested "(())" empties one level per replacement
    while EMPTY_PARENS_RE.is_match(&label) {
        label = EMPTY_PARENS_RE.replace_all(&label, "").into_owned();
    }
    let label = OPEN_PAREN_SPACE_RE.replace_all(&label, "(");
    let label = CLOSE_PAREN_SPACE_RE.replace_all(&label, ")");
    let label = SPACE_BEFORE_PUNCT_RE.replace_all(&label, "${1}");
    let label = REPEATED_COMMA_RE.replace_all(&label, ",");
    let label = REPEATED_DASH_RE.replace_all(&label, "-");
    let label = label.trim_matches(|c: char| c.is_whitespace() || EDGE_SEPARATORS.contains(&c));
    let label = WHITESPACE_RE.replace_all(label, " ");
    capitalize_words(&label)
}

/// Drop everything up to the last " to " and everything from the first " via "
pub fn keep_to_and_remove_via_rules() -> Result<Vec<NormalizationRule>> {
    Ok(vec![
        NormalizationRule::pattern("keep_to", r"(?s)^.*\sto\s", "")?,
        NormalizationRule::pattern("remove_via", r"(?s)\svia\s.*$", "")?,
    ])
}

pub fn saint_rule() -> Result<NormalizationRule> {
    NormalizationRule::pattern("saint", r"\bsaint\b", "St")
}

/// "and" becomes "&", and every "&" gets single spaces around it
pub fn and_rules() -> Result<Vec<NormalizationRule>> {
    Ok(vec![
        NormalizationRule::pattern("clean_and", r"\band\b", "&")?,
        NormalizationRule::pattern("space_and", r"\s*&\s*", " & ")?,
    ])
}

/// "at" becomes "@", and every "@" gets single spaces around it
pub fn at_rules() -> Result<Vec<NormalizationRule>> {
    Ok(vec![
        NormalizationRule::pattern("clean_at", r"\bat\b", "@")?,
        NormalizationRule::pattern("space_at", r"\s*@\s*", " @ ")?,
    ])
}

const BOUNDS: &[(&str, &str, &str)] = &[
    ("bound_east", r"\b(?:east\s*bound|eb)\b", "EB"),
    ("bound_west", r"\b(?:west\s*bound|wb)\b", "WB"),
    ("bound_north", r"\b(?:north\s*bound|nb)\b", "NB"),
    ("bound_south", r"\b(?:south\s*bound|sb)\b", "SB"),
    ("bound_in", r"\b(?:in\s*bound|ib)\b", "IB"),
    ("bound_out", r"\b(?:out\s*bound|ob)\b", "OB"),
];

/// "Eastbound" / "east bound" / "eb" -> "EB" and so on
pub fn bounds_rules() -> Result<Vec<NormalizationRule>> {
    BOUNDS
        .iter()
        .map(|(name, pattern, replacement)| NormalizationRule::pattern(name, pattern, replacement))
        .collect()
}

/// (rule name, spellings, short form)
const STREET_TYPES: &[(&str, &str, &str)] = &[
    ("street_avenue", "avenue|ave", "Ave"),
    ("street_boulevard", "boulevard|blvd", "Blvd"),
    ("street_centre", "centre|center|ctr", "Ctr"),
    ("street_circle", "circle|cir", "Cir"),
    ("street_close", "close", "Cl"),
    ("street_court", "court|ct", "Ct"),
    ("street_crescent", "crescent|cres", "Cres"),
    ("street_drive", "drive|dr", "Dr"),
    ("street_highway", "highway|hwy", "Hwy"),
    ("street_lane", "lane|ln", "Ln"),
    ("street_parkway", "parkway|pkwy", "Pkwy"),
    ("street_place", "place|pl", "Pl"),
    ("street_road", "road|rd", "Rd"),
    ("street_street", "street|st", "St"),
    ("street_terrace", "terrace|terr", "Terr"),
    ("street_trail", "trail|trl", "Trl"),
];

/// Street-type words to their short form ("Street" -> "St", "Avenue" -> "Ave").
/// A trailing period is dropped only where it ends the word ("St. Albert").
pub fn street_types_rules() -> Result<Vec<NormalizationRule>> {
    STREET_TYPES
        .iter()
        .map(|(name, spellings, short)| {
            NormalizationRule::pattern(
                name,
                &format!(r"\b(?:{spellings})\b(?:\.(\s|$))?"),
                &format!("{short}${{1}}"),
            )
        })
        .collect()
}

const ORDINAL_WORDS: &[(&str, &str, &str)] = &[
    ("number_first", r"\bfirst\b", "1st"),
    ("number_second", r"\bsecond\b", "2nd"),
    ("number_third", r"\bthird\b", "3rd"),
    ("number_fourth", r"\bfourth\b", "4th"),
    ("number_fifth", r"\bfifth\b", "5th"),
    ("number_sixth", r"\bsixth\b", "6th"),
    ("number_seventh", r"\bseventh\b", "7th"),
    ("number_eighth", r"\beighth\b", "8th"),
    ("number_ninth", r"\bninth\b", "9th"),
    ("number_tenth", r"\btenth\b", "10th"),
];

/// Ordinal words to digits, and ordinal suffixes to lower case ("1ST" -> "1st")
pub fn numbers_rules() -> Result<Vec<NormalizationRule>> {
    let mut rules = ORDINAL_WORDS
        .iter()
        .map(|(name, pattern, replacement)| NormalizationRule::pattern(name, pattern, replacement))
        .collect::<Result<Vec<_>>>()?;

    for suffix in ["st", "nd", "rd", "th"] {
        rules.push(NormalizationRule::pattern(
            &format!("number_suffix_{suffix}"),
            &format!(r"\b(\d+){suffix}\b"),
            &format!("${{1}}{suffix}"),
        )?);
    }
    Ok(rules)
}

/// Keep a single name out of slash-separated alternates
pub fn slashes_rule() -> NormalizationRule {
    NormalizationRule::first_segment("clean_slashes", '/')
}
