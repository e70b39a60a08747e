use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::builtin;
use crate::error::{FaqError, Result};
use crate::model::{FaqEntry, KeywordRule};

/// On-disk catalog layout (TOML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_prefix: Option<String>,
    #[serde(default)]
    pub entries: Vec<FaqEntry>,
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Dangling keyword targets are a configuration error.
    Strict,
    /// Dangling keyword targets are logged and skipped at match time.
    Lenient,
}

/// Immutable FAQ catalog with its keyword index resolved to entry positions.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<FaqEntry>,
    keywords: Vec<KeywordRule>,
    resolved: Vec<Option<usize>>,
    fallback_prefix: String,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        let file = CatalogFile {
            fallback_prefix: Some(builtin::FALLBACK_PREFIX.to_string()),
            entries: builtin::entries(),
            keywords: builtin::keywords(),
        };
        Self::from_file(file, Strictness::Strict)
    }

    pub fn load(path: &Path, strictness: Strictness) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&contents)?;
        debug!(
            path = %path.display(),
            entries = file.entries.len(),
            keywords = file.keywords.len(),
            "loaded catalog file"
        );
        Self::from_file(file, strictness)
    }

    pub fn from_file(file: CatalogFile, strictness: Strictness) -> Result<Self> {
        let prefix = file
            .fallback_prefix
            .unwrap_or_else(|| builtin::FALLBACK_PREFIX.to_string());
        Self::from_parts(file.entries, file.keywords, prefix, strictness)
    }

    pub fn from_parts(
        entries: Vec<FaqEntry>,
        keywords: Vec<KeywordRule>,
        fallback_prefix: String,
        strictness: Strictness,
    ) -> Result<Self> {
        validate_entries(&entries)?;

        let mut normalized = Vec::with_capacity(keywords.len());
        let mut resolved = Vec::with_capacity(keywords.len());
        for rule in keywords {
            let keyword = rule.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(FaqError::InvalidCatalog(format!(
                    "empty keyword for target '{}'",
                    rule.target
                )));
            }

            let position = resolve_target(&entries, &rule.target);
            if position.is_none() {
                match strictness {
                    Strictness::Strict => {
                        return Err(FaqError::DanglingKeyword {
                            keyword,
                            target: rule.target,
                        });
                    }
                    Strictness::Lenient => {
                        warn!(%keyword, target = %rule.target, "keyword target not in catalog");
                    }
                }
            }

            normalized.push(KeywordRule {
                keyword,
                target: rule.target,
            });
            resolved.push(position);
        }

        Ok(Self {
            entries,
            keywords: normalized,
            resolved,
            fallback_prefix,
        })
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn keywords(&self) -> &[KeywordRule] {
        &self.keywords
    }

    /// Keyword rules paired with the entry they point at, in declaration order.
    pub fn keyword_targets(&self) -> impl Iterator<Item = (&KeywordRule, Option<&FaqEntry>)> {
        self.keywords
            .iter()
            .zip(&self.resolved)
            .map(|(rule, pos)| (rule, pos.map(|idx| &self.entries[idx])))
    }

    pub fn dangling_keywords(&self) -> Vec<&KeywordRule> {
        self.keyword_targets()
            .filter_map(|(rule, entry)| entry.is_none().then_some(rule))
            .collect()
    }

    /// Distinct topic labels, in catalog order.
    pub fn topics(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter_map(FaqEntry::topic_label)
            .filter(|topic| seen.insert(*topic))
            .collect()
    }

    /// Reply used when nothing matches; always lists the topics of this catalog.
    pub fn fallback_message(&self) -> String {
        let topics = self.topics();
        let prefix = self.fallback_prefix.trim_end().trim_end_matches(':');
        if topics.is_empty() {
            format!("{prefix}.")
        } else {
            format!("{prefix}: {}.", enumerate_topics(&topics))
        }
    }
}

fn validate_entries(entries: &[FaqEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(FaqError::InvalidCatalog("catalog has no entries".to_string()));
    }

    let mut ids = HashSet::new();
    let mut questions = HashSet::new();
    for entry in entries {
        if entry.id.trim().is_empty() {
            return Err(FaqError::InvalidCatalog(format!(
                "entry '{}' has an empty id",
                entry.question
            )));
        }
        if entry.question.trim().is_empty() {
            return Err(FaqError::InvalidCatalog(format!(
                "entry '{}' has an empty question",
                entry.id
            )));
        }
        if !ids.insert(entry.id.as_str()) {
            return Err(FaqError::InvalidCatalog(format!(
                "duplicate entry id '{}'",
                entry.id
            )));
        }
        if !questions.insert(entry.question.as_str()) {
            return Err(FaqError::InvalidCatalog(format!(
                "duplicate question '{}'",
                entry.question
            )));
        }
    }
    Ok(())
}

fn resolve_target(entries: &[FaqEntry], target: &str) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.id == target)
        .or_else(|| entries.iter().position(|e| e.question == target))
}

/// `a`, `a o b`, `a, b, o c`.
fn enumerate_topics(topics: &[&str]) -> String {
    match topics {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} o {second}"),
        [head @ .., last] => format!("{}, o {last}", head.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_entry(id: &str, question: &str) -> FaqEntry {
        FaqEntry {
            id: id.to_string(),
            question: question.to_string(),
            answer: format!("answer-{id}"),
            icon: String::new(),
            category: None,
            topic: Some(id.to_string()),
        }
    }

    #[test]
    fn builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin().expect("builtin");
        assert_eq!(catalog.entries().len(), 8);
        assert_eq!(catalog.keywords().len(), 22);
        assert!(catalog.dangling_keywords().is_empty());
    }

    #[test]
    fn builtin_fallback_lists_all_topics() {
        let catalog = Catalog::builtin().expect("builtin");
        assert_eq!(
            catalog.fallback_message(),
            "Lo siento, solo puedo responder preguntas específicas. Por favor, selecciona una \
             de las preguntas sugeridas o pregunta sobre: horarios, ubicación, servicios, \
             contacto, planes de precios, mantenimiento web, hosting y dominio, o métodos de pago."
        );
    }

    #[test]
    fn keyword_targets_resolve_by_id_or_question() {
        let entries = vec![mk_entry("a", "Question A?"), mk_entry("b", "Question B?")];
        let keywords = vec![KeywordRule::new("alpha", "a"), KeywordRule::new("beta", "Question B?")];
        let catalog =
            Catalog::from_parts(entries, keywords, "sorry".into(), Strictness::Strict).expect("catalog");

        let targets: Vec<_> = catalog
            .keyword_targets()
            .map(|(rule, entry)| (rule.keyword.as_str(), entry.map(|e| e.id.as_str())))
            .collect();
        assert_eq!(targets, vec![("alpha", Some("a")), ("beta", Some("b"))]);
    }

    #[test]
    fn strict_rejects_dangling_keyword() {
        let entries = vec![mk_entry("a", "Question A?")];
        let keywords = vec![KeywordRule::new("ghost", "¿Pregunta borrada?")];
        let err = Catalog::from_parts(entries, keywords, "sorry".into(), Strictness::Strict)
            .expect_err("dangling");
        assert!(matches!(err, FaqError::DanglingKeyword { ref keyword, .. } if keyword == "ghost"));
    }

    #[test]
    fn lenient_keeps_dangling_keyword_unresolved() {
        let entries = vec![mk_entry("a", "Question A?")];
        let keywords = vec![KeywordRule::new("ghost", "missing"), KeywordRule::new("a", "a")];
        let catalog = Catalog::from_parts(entries, keywords, "sorry".into(), Strictness::Lenient)
            .expect("catalog");
        let dangling = catalog.dangling_keywords();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].keyword, "ghost");
    }

    #[test]
    fn keywords_are_normalized() {
        let entries = vec![mk_entry("a", "Question A?")];
        let keywords = vec![KeywordRule::new("  HoRaRiO ", "a")];
        let catalog =
            Catalog::from_parts(entries, keywords, "sorry".into(), Strictness::Strict).expect("catalog");
        assert_eq!(catalog.keywords()[0].keyword, "horario");
    }

    #[test]
    fn rejects_duplicates_and_blank_keywords() {
        let dup_id = vec![mk_entry("a", "One?"), mk_entry("a", "Two?")];
        assert!(matches!(
            Catalog::from_parts(dup_id, vec![], String::new(), Strictness::Strict),
            Err(FaqError::InvalidCatalog(_))
        ));

        let dup_question = vec![mk_entry("a", "Same?"), mk_entry("b", "Same?")];
        assert!(matches!(
            Catalog::from_parts(dup_question, vec![], String::new(), Strictness::Strict),
            Err(FaqError::InvalidCatalog(_))
        ));

        let blank = vec![KeywordRule::new("   ", "a")];
        assert!(matches!(
            Catalog::from_parts(vec![mk_entry("a", "A?")], blank, String::new(), Strictness::Lenient),
            Err(FaqError::InvalidCatalog(_))
        ));

        assert!(matches!(
            Catalog::from_parts(vec![], vec![], String::new(), Strictness::Lenient),
            Err(FaqError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn topics_fall_back_to_category_and_dedupe() {
        let mut a = mk_entry("a", "A?");
        a.topic = None;
        a.category = Some("general".into());
        let mut b = mk_entry("b", "B?");
        b.topic = None;
        b.category = Some("general".into());
        let c = mk_entry("c", "C?");
        let catalog =
            Catalog::from_parts(vec![a, b, c], vec![], "Ask about:".into(), Strictness::Strict)
                .expect("catalog");
        assert_eq!(catalog.topics(), vec!["general", "c"]);
        assert_eq!(catalog.fallback_message(), "Ask about: general o c.");
    }

    #[test]
    fn enumerates_topics() {
        assert_eq!(enumerate_topics(&[]), "");
        assert_eq!(enumerate_topics(&["a"]), "a");
        assert_eq!(enumerate_topics(&["a", "b"]), "a o b");
        assert_eq!(enumerate_topics(&["a", "b", "c"]), "a, b, o c");
    }

    #[test]
    fn parses_toml_catalog() {
        let toml = r#"
fallback_prefix = "Solo sé de"

[[entries]]
id = "horario"
question = "¿Horario?"
answer = "9 a 5"
icon = "🕐"
topic = "horarios"

[[keywords]]
keyword = "hora"
question = "¿Horario?"
"#;
        let file: CatalogFile = toml::from_str(toml).expect("toml");
        let catalog = Catalog::from_file(file, Strictness::Strict).expect("catalog");
        assert_eq!(catalog.entries()[0].answer, "9 a 5");
        assert_eq!(catalog.keywords()[0].target, "¿Horario?");
        assert_eq!(catalog.fallback_message(), "Solo sé de: horarios.");
    }
}
