//! Matcher contract and the regex-backed matcher used by every locale pack.

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use crate::candidate::{Candidate, Span, Tag};
use crate::components::ComponentStore;
use crate::error::ConfigError;

/// Something that finds candidate date/time spans in text.
///
/// Implementations must be deterministic. They may return overlapping
/// candidates; overlap is settled later in the refinement chain.
pub trait Matcher: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Tags every candidate from this matcher carries.
    fn produces(&self) -> &[Tag];

    /// Scan the whole text and return every match.
    fn find(&self, text: &str, reference: NaiveDateTime) -> Vec<Candidate>;
}

/// Fields read from one regex match.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub start: ComponentStore,
    pub end: Option<ComponentStore>,
}

impl Extracted {
    pub fn single(start: ComponentStore) -> Self {
        Self { start, end: None }
    }

    pub fn range(start: ComponentStore, end: ComponentStore) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// Turns a regex match into fields. Returning `None` drops the match.
pub type ExtractFn = fn(&Captures<'_>, NaiveDateTime) -> Option<Extracted>;

/// Uncompiled matcher definition, as written in a locale pack.
#[derive(Clone)]
pub struct MatcherDef {
    pub name: &'static str,
    pub pattern: String,
    pub tags: &'static [Tag],
    pub extract: ExtractFn,
}

impl MatcherDef {
    pub fn new(
        name: &'static str,
        pattern: impl Into<String>,
        tags: &'static [Tag],
        extract: ExtractFn,
    ) -> Self {
        Self {
            name,
            pattern: pattern.into(),
            tags,
            extract,
        }
    }
}

/// A compiled regex plus an extraction function.
///
/// If the pattern has a capture group named `m`, that group is the reported
/// span; otherwise the whole match is. This lets a pattern consume leading
/// context (a word boundary the regex engine cannot look behind for) without
/// reporting it.
pub struct PatternMatcher {
    name: &'static str,
    regex: Regex,
    tags: &'static [Tag],
    extract: ExtractFn,
}

impl PatternMatcher {
    pub fn compile(def: &MatcherDef) -> Result<Self, ConfigError> {
        let regex = Regex::new(&def.pattern).map_err(|source| ConfigError::Pattern {
            name: def.name.to_string(),
            source,
        })?;
        Ok(Self {
            name: def.name,
            regex,
            tags: def.tags,
            extract: def.extract,
        })
    }
}

impl Matcher for PatternMatcher {
    fn name(&self) -> &str {
        self.name
    }

    fn produces(&self) -> &[Tag] {
        self.tags
    }

    fn find(&self, text: &str, reference: NaiveDateTime) -> Vec<Candidate> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.name("m").or_else(|| caps.get(0))?;
                if whole.as_str().is_empty() {
                    return None;
                }
                let extracted = (self.extract)(&caps, reference)?;
                let span = Span::from_range(whole.start(), whole.end());
                let mut candidate = Candidate::new(text, span, reference, extracted.start)
                    .with_tags(self.tags);
                candidate.end = extracted.end;
                Some(candidate)
            })
            .collect()
    }
}

// ============================================================================
// Capture helpers
// ============================================================================

/// Parse a capture group as an integer, accepting full-width digits.
pub fn capture_int(caps: &Captures<'_>, group: usize) -> Option<i32> {
    caps.get(group)
        .and_then(|m| crate::locales::numerals::parse_number(m.as_str()))
}

/// Parse a named capture group as an integer.
pub fn capture_named_int(caps: &Captures<'_>, name: &str) -> Option<i32> {
    caps.name(name)
        .and_then(|m| crate::locales::numerals::parse_number(m.as_str()))
}

/// Lowercased text of a capture group.
pub fn capture_lower(caps: &Captures<'_>, group: usize) -> Option<String> {
    caps.get(group).map(|m| m.as_str().to_lowercase())
}
