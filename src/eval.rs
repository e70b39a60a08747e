use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FaqError, Result};
use crate::matcher::QuestionMatcher;
use crate::model::MatchKind;

pub const DEFAULT_REQUIRED_PASS_RATE: f32 = 1.0;

/// One labelled input. `expected` is an entry id, or `null`/absent for "no match".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub question: String,
    #[serde(default)]
    pub expected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub expected: Option<String>,
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MatchKind>,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f32,
    pub outcomes: Vec<EvalOutcome>,
}

impl EvalSummary {
    pub fn meets(&self, required_pass_rate: f32) -> bool {
        self.pass_rate >= required_pass_rate
    }

    pub fn ensure(&self, required_pass_rate: f32) -> Result<()> {
        if self.meets(required_pass_rate) {
            Ok(())
        } else {
            Err(FaqError::BelowRequiredPassRate {
                actual: self.pass_rate,
                required: required_pass_rate,
            })
        }
    }
}

pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>> {
    let file = File::open(path)?;
    let cases = serde_json::from_reader(BufReader::new(file))?;
    Ok(cases)
}

pub fn evaluate_cases(matcher: &QuestionMatcher, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let found = matcher.explain(&case.question);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let actual = found.map(|m| m.entry.id.clone());
        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed: actual == case.expected,
            expected: case.expected.clone(),
            actual,
            kind: found.map(|m| m.kind.to_kind()),
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f32 / total as f32
    };
    info!(total, passed, failed, "evaluation finished");

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;

    fn matcher() -> QuestionMatcher {
        QuestionMatcher::new(Arc::new(Catalog::builtin().expect("builtin")))
    }

    fn case(id: &str, question: &str, expected: Option<&str>) -> EvalCase {
        EvalCase {
            case_id: id.to_string(),
            question: question.to_string(),
            expected: expected.map(str::to_string),
        }
    }

    #[test]
    fn scores_hits_and_misses() {
        let cases = vec![
            case("c1", "cuanto cuesta un plan", Some("planes")),
            case("c2", "asdkjashdkj", None),
            case("c3", "horario", Some("pagos")),
        ];
        let summary = evaluate_cases(&matcher(), &cases);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert!((summary.pass_rate - 2.0 / 3.0).abs() < 1e-6);
        assert!(!summary.outcomes[2].passed);
        assert_eq!(summary.outcomes[2].actual.as_deref(), Some("horario"));
        assert_eq!(
            summary.outcomes[0].kind,
            Some(MatchKind::Keyword {
                keyword: "plan".to_string()
            })
        );
        assert!(summary.outcomes[1].kind.is_none());
    }

    #[test]
    fn required_pass_rate_is_enforced() {
        let summary = evaluate_cases(&matcher(), &[case("c1", "xyz", Some("horario"))]);
        assert!(!summary.meets(0.5));
        assert!(matches!(
            summary.ensure(0.5),
            Err(FaqError::BelowRequiredPassRate { .. })
        ));
        assert!(summary.ensure(0.0).is_ok());
    }

    #[test]
    fn empty_case_list_has_zero_pass_rate() {
        let summary = evaluate_cases(&matcher(), &[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pass_rate, 0.0);
    }

    #[test]
    fn missing_expected_means_no_match() {
        let cases: Vec<EvalCase> =
            serde_json::from_str(r#"[{"case_id":"a","question":"q"},{"case_id":"b","question":"q","expected":null}]"#)
                .expect("json");
        assert!(cases.iter().all(|c| c.expected.is_none()));
    }
}
