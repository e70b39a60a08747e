//! Static lint of a loaded catalog.
//!
//! Matching is first-hit in declaration order, so a keyword can be answered
//! by a different entry than the one it names. Those overrides are reported
//! as warnings; failed self-matches and dangling keywords are errors.

use serde::Serialize;

use crate::matcher::QuestionMatcher;
use crate::model::MatchKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCheck {
    pub id: String,
    pub self_match: bool,
    pub case_insensitive: bool,
}

impl EntryCheck {
    pub fn passed(&self) -> bool {
        self.self_match && self.case_insensitive
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeywordStatus {
    Resolves,
    Shadowed { by: String, via: MatchKind },
    Dangling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCheck {
    pub keyword: String,
    pub target: String,
    #[serde(flatten)]
    pub status: KeywordStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub entries: Vec<EntryCheck>,
    pub keywords: Vec<KeywordCheck>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.entries.iter().all(EntryCheck::passed)
            && !self
                .keywords
                .iter()
                .any(|k| k.status == KeywordStatus::Dangling)
    }

    pub fn shadowed(&self) -> impl Iterator<Item = &KeywordCheck> {
        self.keywords
            .iter()
            .filter(|k| matches!(k.status, KeywordStatus::Shadowed { .. }))
    }
}

pub fn check_catalog(matcher: &QuestionMatcher) -> CheckReport {
    let catalog = matcher.catalog();

    let entries = catalog
        .entries()
        .iter()
        .map(|entry| {
            let hit = |input: &str| matcher.find(input).is_some_and(|e| e.id == entry.id);
            EntryCheck {
                id: entry.id.clone(),
                self_match: hit(&entry.question),
                case_insensitive: hit(&entry.question.to_uppercase()),
            }
        })
        .collect();

    let keywords = catalog
        .keyword_targets()
        .map(|(rule, target)| {
            let status = match (target, matcher.explain(&rule.keyword)) {
                (None, _) => KeywordStatus::Dangling,
                (Some(target), Some(found)) if found.entry.id != target.id => {
                    KeywordStatus::Shadowed {
                        by: found.entry.id.clone(),
                        via: found.kind.to_kind(),
                    }
                }
                (Some(_), _) => KeywordStatus::Resolves,
            };
            KeywordCheck {
                keyword: rule.keyword.clone(),
                target: rule.target.clone(),
                status,
            }
        })
        .collect();

    CheckReport { entries, keywords }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{Catalog, Strictness};
    use crate::model::{FaqEntry, KeywordRule};

    #[test]
    fn builtin_catalog_passes_with_one_override() {
        let matcher = QuestionMatcher::new(Arc::new(Catalog::builtin().expect("builtin")));
        let report = check_catalog(&matcher);

        assert!(report.passed());
        assert!(report.entries.iter().all(EntryCheck::passed));

        let shadowed: Vec<_> = report.shadowed().collect();
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].keyword, "web");
        assert_eq!(
            shadowed[0].status,
            KeywordStatus::Shadowed {
                by: "mantenimiento".to_string(),
                via: MatchKind::Question,
            }
        );
    }

    #[test]
    fn dangling_keyword_fails_the_report() {
        let entry = FaqEntry {
            id: "a".into(),
            question: "¿Alpha?".into(),
            answer: "A".into(),
            icon: String::new(),
            category: None,
            topic: None,
        };
        let catalog = Catalog::from_parts(
            vec![entry],
            vec![KeywordRule::new("beta", "¿Beta?")],
            String::new(),
            Strictness::Lenient,
        )
        .expect("catalog");
        let report = check_catalog(&QuestionMatcher::new(Arc::new(catalog)));

        assert!(!report.passed());
        assert_eq!(report.keywords[0].status, KeywordStatus::Dangling);
    }

    #[test]
    fn later_entry_contained_in_earlier_question_fails_self_match() {
        let mk = |id: &str, q: &str| FaqEntry {
            id: id.into(),
            question: q.into(),
            answer: String::new(),
            icon: String::new(),
            category: None,
            topic: None,
        };
        let catalog = Catalog::from_parts(
            vec![mk("long", "Do you ship abroad?"), mk("short", "ship")],
            vec![],
            String::new(),
            Strictness::Strict,
        )
        .expect("catalog");
        let report = check_catalog(&QuestionMatcher::new(Arc::new(catalog)));

        assert!(!report.passed());
        assert!(report.entries[0].passed());
        assert!(!report.entries[1].self_match);
    }
}
