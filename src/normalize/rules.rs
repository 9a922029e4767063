use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::fmt;

use super::clean;
use crate::common::error::{AdapterError, Result};

/// How a single rule rewrites its input
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// Replace every non-overlapping match of `matcher` with `replacement`
    /// (`${n}` refers to capture groups)
    Pattern { matcher: Regex, replacement: String },
    /// Lower-case the text and capitalize each word, upper-casing ignored words verbatim
    TitleCase { ignored_words: Vec<String> },
    /// Keep only the first non-empty segment around `separator`
    FirstSegment { separator: char },
    /// Generic label cleanup: whitespace, punctuation artifacts and word capitals
    Label,
}

/// A named rewrite step. Rules are constant once a pipeline is built.
#[derive(Debug, Clone)]
pub struct NormalizationRule {
    name: String,
    rewrite: Rewrite,
}

impl NormalizationRule {
    /// Compile a case-insensitive pattern rule
    pub fn pattern(name: &str, pattern: &str, replacement: &str) -> Result<Self> {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| AdapterError::InvalidRule {
                rule: name.to_string(),
                source,
            })?;

        Ok(Self {
            name: name.to_string(),
            rewrite: Rewrite::Pattern {
                matcher,
                replacement: replacement.to_string(),
            },
        })
    }

    pub fn title_case<S: AsRef<str>>(ignored_words: &[S]) -> Self {
        Self {
            name: "title_case".to_string(),
            rewrite: Rewrite::TitleCase {
                ignored_words: ignored_words.iter().map(|w| w.as_ref().to_string()).collect(),
            },
        }
    }

    pub fn first_segment(name: &str, separator: char) -> Self {
        Self {
            name: name.to_string(),
            rewrite: Rewrite::FirstSegment { separator },
        }
    }

    pub fn label() -> Self {
        Self {
            name: "clean_label".to_string(),
            rewrite: Rewrite::Label,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rewrite(&self) -> &Rewrite {
        &self.rewrite
    }

    /// Apply this rule once. An unmatched rule returns its input borrowed.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.rewrite {
            Rewrite::Pattern {
                matcher,
                replacement,
            } => matcher.replace_all(text, replacement.as_str()),
            Rewrite::TitleCase { ignored_words } => {
                Cow::Owned(clean::title_case_words(text, ignored_words))
            }
            Rewrite::FirstSegment { separator } => {
                // the segment is a subslice, so equal length means unchanged
                let segment = clean::first_segment(text, *separator);
                if segment.len() == text.len() {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(segment.to_string())
                }
            }
            Rewrite::Label => Cow::Owned(clean::clean_label(text)),
        }
    }
}

/// The label kinds an agency normalizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    Headsign,
    StopName,
    StopId,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Headsign => "headsign",
            PipelineKind::StopName => "stop_name",
            PipelineKind::StopId => "stop_id",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered chain of rules. Each rule sees the output of the previous one,
/// so the order is part of the pipeline's meaning.
#[derive(Debug, Clone)]
pub struct Pipeline {
    kind: PipelineKind,
    rules: Vec<NormalizationRule>,
}

impl Pipeline {
    pub fn new(kind: PipelineKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    pub fn with(mut self, rule: NormalizationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_all(mut self, rules: impl IntoIterator<Item = NormalizationRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    /// Position of the named rule in the chain
    pub fn order_of(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule once, in order
    pub fn apply_once(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            current = rewritten;
        }
        current
    }
}

/// The three pipelines of one agency, built once and shared read-only
#[derive(Debug, Clone)]
pub struct RuleTable {
    headsign: Pipeline,
    stop_name: Pipeline,
    stop_id: Pipeline,
}

impl RuleTable {
    pub fn new(headsign: Pipeline, stop_name: Pipeline, stop_id: Pipeline) -> Self {
        Self {
            headsign,
            stop_name,
            stop_id,
        }
    }

    pub fn pipeline(&self, kind: PipelineKind) -> &Pipeline {
        match kind {
            PipelineKind::Headsign => &self.headsign,
            PipelineKind::StopName => &self.stop_name,
            PipelineKind::StopId => &self.stop_id,
        }
    }

    pub fn normalize(&self, kind: PipelineKind, text: &str) -> String {
        super::normalize(self.pipeline(kind), text)
    }
}
