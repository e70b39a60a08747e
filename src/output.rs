use std::io::{self, Write};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::check::{CheckReport, KeywordStatus};
use crate::error::{FaqError, Result};
use crate::eval::EvalSummary;
use crate::model::{Match, MatchKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(FaqError::InvalidArg(format!(
                "Unknown output format: {other}"
            ))),
        }
    }
}

#[derive(Serialize)]
struct JsonAnswer<'a> {
    input: &'a str,
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    via: Option<MatchKind>,
    answer: &'a str,
}

pub fn write_answer(
    out: &mut impl Write,
    format: Format,
    input: &str,
    found: Option<Match<'_>>,
    fallback: &str,
) -> Result<()> {
    let answer = found.map_or(fallback, |m| m.entry.answer.as_str());
    match format {
        Format::Text => writeln!(out, "{answer}")?,
        Format::Json => {
            let json = JsonAnswer {
                input,
                matched: found.is_some(),
                entry_id: found.map(|m| m.entry.id.as_str()),
                question: found.map(|m| m.entry.question.as_str()),
                via: found.map(|m| m.kind.to_kind()),
                answer,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }
    Ok(())
}

pub fn write_check(out: &mut impl Write, format: Format, report: &CheckReport) -> Result<()> {
    if format == Format::Json {
        #[derive(Serialize)]
        struct JsonCheck<'a> {
            passed: bool,
            #[serde(flatten)]
            report: &'a CheckReport,
        }
        let json = JsonCheck {
            passed: report.passed(),
            report,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    for entry in &report.entries {
        writeln!(
            out,
            "entry={} self_match={} case_insensitive={}",
            entry.id, entry.self_match, entry.case_insensitive
        )?;
    }
    for keyword in &report.keywords {
        match &keyword.status {
            KeywordStatus::Resolves => {
                writeln!(out, "keyword={} target={} ok", keyword.keyword, keyword.target)?
            }
            KeywordStatus::Shadowed { by, via } => {
                let via = match via {
                    MatchKind::Question => "question".to_string(),
                    MatchKind::Keyword { keyword } => format!("keyword:{keyword}"),
                };
                writeln!(
                    out,
                    "keyword={} target={} shadowed_by={} via={}",
                    keyword.keyword, keyword.target, by, via
                )?
            }
            KeywordStatus::Dangling => writeln!(
                out,
                "keyword={} target={} dangling",
                keyword.keyword, keyword.target
            )?,
        }
    }
    writeln!(
        out,
        "passed={} shadowed={}",
        report.passed(),
        report.shadowed().count()
    )?;
    Ok(())
}

pub fn write_eval(
    out: &mut impl Write,
    format: Format,
    summary: &EvalSummary,
    required_pass_rate: f32,
) -> Result<()> {
    if format == Format::Json {
        #[derive(Serialize)]
        struct JsonEval<'a> {
            required_pass_rate: f32,
            meets_threshold: bool,
            #[serde(flatten)]
            summary: &'a EvalSummary,
        }
        let json = JsonEval {
            required_pass_rate,
            meets_threshold: summary.meets(required_pass_rate),
            summary,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "total={} passed={} failed={} pass_rate={:.4} required={:.4} meets_threshold={}",
        summary.total,
        summary.passed,
        summary.failed,
        summary.pass_rate,
        required_pass_rate,
        summary.meets(required_pass_rate)
    )?;
    for o in &summary.outcomes {
        writeln!(
            out,
            "case={} passed={} expected={} actual={} latency={:.3}ms",
            o.case_id,
            o.passed,
            o.expected.as_deref().unwrap_or("null"),
            o.actual.as_deref().unwrap_or("null"),
            o.latency_ms
        )?;
    }
    Ok(())
}

pub fn write_topics(out: &mut impl Write, format: Format, catalog: &Catalog) -> Result<()> {
    match format {
        Format::Text => {
            for entry in catalog.entries() {
                writeln!(out, "{} {} [{}]", entry.icon, entry.question, entry.id)?;
            }
            writeln!(out)?;
            writeln!(out, "{}", catalog.fallback_message())?;
        }
        Format::Json => {
            #[derive(Serialize)]
            struct JsonTopics<'a> {
                topics: Vec<&'a str>,
                questions: Vec<&'a str>,
                fallback: String,
            }
            let json = JsonTopics {
                topics: catalog.topics(),
                questions: catalog
                    .entries()
                    .iter()
                    .map(|e| e.question.as_str())
                    .collect(),
                fallback: catalog.fallback_message(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }
    Ok(())
}

pub fn stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use super::*;
    use crate::matcher::QuestionMatcher;

    fn matcher() -> QuestionMatcher {
        QuestionMatcher::new(Arc::new(Catalog::builtin().expect("builtin")))
    }

    #[test]
    fn parses_formats() {
        assert_eq!(Format::parse("text").expect("text"), Format::Text);
        assert_eq!(Format::parse("json").expect("json"), Format::Json);
        assert!(matches!(Format::parse("yaml"), Err(FaqError::InvalidArg(_))));
    }

    #[test]
    fn json_answer_reports_keyword_pass() {
        let matcher = matcher();
        let mut buf = Vec::new();
        let input = "cuanto cuesta un plan";
        write_answer(&mut buf, Format::Json, input, matcher.explain(input), "fallback")
            .expect("write");

        let json: Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(json["matched"], true);
        assert_eq!(json["entry_id"], "planes");
        assert_eq!(json["via"]["pass"], "keyword");
        assert_eq!(json["via"]["keyword"], "plan");
    }

    #[test]
    fn text_answer_uses_fallback_on_miss() {
        let mut buf = Vec::new();
        write_answer(&mut buf, Format::Text, "zzz", None, "sin respuesta").expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "sin respuesta\n");
    }

    #[test]
    fn text_check_lists_shadowed_keyword() {
        let report = crate::check::check_catalog(&matcher());
        let mut buf = Vec::new();
        write_check(&mut buf, Format::Text, &report).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("keyword=web target=servicios shadowed_by=mantenimiento via=question"));
        assert!(text.ends_with("passed=true shadowed=1\n"));
    }
}
