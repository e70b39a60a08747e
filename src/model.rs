use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Label listed in the fallback message. Falls back to `category`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl FaqEntry {
    pub fn topic_label(&self) -> Option<&str> {
        self.topic.as_deref().or(self.category.as_deref())
    }
}

/// A trigger fragment pointing at one entry, by id or by exact question text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    #[serde(alias = "question")]
    pub target: String,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pass", rename_all = "snake_case")]
pub enum MatchKind {
    Question,
    Keyword { keyword: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub entry: &'a FaqEntry,
    pub kind: MatchSource<'a>,
}

/// Borrowed form of [`MatchKind`], returned by the matcher without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource<'a> {
    Question,
    Keyword(&'a str),
}

impl MatchSource<'_> {
    pub fn to_kind(self) -> MatchKind {
        match self {
            MatchSource::Question => MatchKind::Question,
            MatchSource::Keyword(keyword) => MatchKind::Keyword {
                keyword: keyword.to_string(),
            },
        }
    }
}
