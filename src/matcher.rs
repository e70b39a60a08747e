use std::sync::Arc;

use tracing::trace;

use crate::catalog::Catalog;
use crate::model::{FaqEntry, Match, MatchSource};

/// Maps free text to at most one catalog entry.
///
/// Two passes, first success wins:
/// 1. question pass: the lowercased question contains the input, or the input
///    contains the question without its trailing `?`;
/// 2. keyword pass: the first keyword (declaration order) found in the input.
///
/// Declaration order is the only tie-break.
#[derive(Debug, Clone)]
pub struct QuestionMatcher {
    catalog: Arc<Catalog>,
}

impl QuestionMatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn find(&self, input: &str) -> Option<&FaqEntry> {
        self.explain(input).map(|m| m.entry)
    }

    pub fn explain(&self, input: &str) -> Option<Match<'_>> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return None;
        }

        let found = self
            .question_pass(&normalized)
            .or_else(|| self.keyword_pass(&normalized));
        trace!(
            input = %normalized,
            matched = found.map(|m| m.entry.id.as_str()),
            "matched input"
        );
        found
    }

    fn question_pass(&self, normalized: &str) -> Option<Match<'_>> {
        self.catalog
            .entries()
            .iter()
            .find(|entry| {
                let question = entry.question.to_lowercase();
                let stripped = question.strip_suffix('?').unwrap_or(&question);
                question.contains(normalized) || normalized.contains(stripped)
            })
            .map(|entry| Match {
                entry,
                kind: MatchSource::Question,
            })
    }

    fn keyword_pass(&self, normalized: &str) -> Option<Match<'_>> {
        self.catalog
            .keyword_targets()
            .filter(|(rule, _)| normalized.contains(rule.keyword.as_str()))
            .find_map(|(rule, entry)| {
                entry.map(|entry| Match {
                    entry,
                    kind: MatchSource::Keyword(rule.keyword.as_str()),
                })
            })
    }
}

pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
