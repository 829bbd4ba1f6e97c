use crate::runner::{LinterRunResult, RunStatus};
use crate::types::EnrichedViolation;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Output of `lintent run`
#[derive(Debug, Serialize)]
pub struct Report {
    pub violations: Vec<EnrichedViolation>,
    pub linters: LintersSection,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct LintersSection {
    /// Linters found by detection, before config overrides
    pub detected: Vec<String>,
    pub results: Vec<LinterResultSummary>,
}

#[derive(Debug, Serialize)]
pub struct LinterResultSummary {
    pub name: String,
    pub status: RunStatus,
    pub violations_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub with_semantic: usize,
    pub without_semantic: usize,
    pub by_tool: BTreeMap<String, usize>,
    pub files_affected: usize,
}

/// Error envelope printed instead of a result
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: bool,
    pub code: String,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Assemble the run report from enriched violations and per-linter results
pub fn format_report(
    violations: Vec<EnrichedViolation>,
    results: &[LinterRunResult],
    detected: Vec<String>,
) -> Report {
    let summary = summarize(&violations);
    let results = results
        .iter()
        .map(|r| LinterResultSummary {
            name: r.tool.name().to_string(),
            status: r.status,
            violations_count: r.violations.len(),
            error: r.error.clone(),
        })
        .collect();

    Report {
        violations,
        linters: LintersSection { detected, results },
        summary,
    }
}

fn summarize(violations: &[EnrichedViolation]) -> Summary {
    let with_semantic = violations.iter().filter(|v| v.semantic.is_some()).count();

    let mut by_tool: BTreeMap<String, usize> = BTreeMap::new();
    for v in violations {
        *by_tool.entry(v.violation.tool.name().to_string()).or_default() += 1;
    }

    let files_affected = violations
        .iter()
        .map(|v| v.violation.file.as_str())
        .collect::<HashSet<_>>()
        .len();

    Summary {
        total: violations.len(),
        with_semantic,
        without_semantic: violations.len() - with_semantic,
        by_tool,
        files_affected,
    }
}

/// Serialize `value` as compact or two-space indented JSON
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SemanticRule, Tool, Violation};

    fn enriched(tool: Tool, file: &str, with_rule: bool) -> EnrichedViolation {
        EnrichedViolation {
            violation: Violation::new(tool, file, 1, 1, "X", "m"),
            semantic: with_rule.then(|| SemanticRule {
                illegal: "i".into(),
                legal: "l".into(),
                why: "w".into(),
            }),
        }
    }

    fn run_result(tool: Tool, status: RunStatus, count: usize) -> LinterRunResult {
        LinterRunResult {
            tool,
            status,
            violations: (0..count)
                .map(|i| Violation::new(tool, format!("f{}", i), 1, 1, "X", "m"))
                .collect(),
            error: (status != RunStatus::Success).then(|| "boom".to_string()),
            command: tool.command().to_string(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let violations = vec![
            enriched(Tool::Ruff, "a.py", true),
            enriched(Tool::Ruff, "a.py", false),
            enriched(Tool::Pyright, "b.py", true),
            enriched(Tool::Eslint, "c.js", false),
        ];
        let report = format_report(violations, &[], vec![]);
        assert_eq!(
            report.summary,
            Summary {
                total: 4,
                with_semantic: 2,
                without_semantic: 2,
                by_tool: BTreeMap::from([
                    ("eslint".to_string(), 1),
                    ("pyright".to_string(), 1),
                    ("ruff".to_string(), 2),
                ]),
                files_affected: 3,
            }
        );
    }

    #[test]
    fn test_empty_report() {
        let report = format_report(vec![], &[], vec!["ruff".into()]);
        let json: serde_json::Value = serde_json::from_str(&to_json(&report, false)).unwrap();
        assert_eq!(json["summary"]["total"], 0);
        assert_eq!(json["summary"]["by_tool"], serde_json::json!({}));
        assert_eq!(json["linters"]["detected"], serde_json::json!(["ruff"]));
        assert_eq!(json["violations"], serde_json::json!([]));
    }

    #[test]
    fn test_linter_results_section() {
        let results = vec![
            run_result(Tool::Ruff, RunStatus::Success, 2),
            run_result(Tool::Eslint, RunStatus::NotFound, 0),
        ];
        let report = format_report(vec![], &results, vec!["ruff".into(), "eslint".into()]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["linters"]["results"],
            serde_json::json!([
                {"name": "ruff", "status": "success", "violations_count": 2},
                {"name": "eslint", "status": "not_found", "violations_count": 0, "error": "boom"},
            ])
        );
    }

    #[test]
    fn test_to_json_pretty_and_compact() {
        let error = ErrorReport::new("NO_LINTERS", "nothing to run");
        assert_eq!(
            to_json(&error, false),
            r#"{"error":true,"code":"NO_LINTERS","message":"nothing to run"}"#
        );
        assert_eq!(
            to_json(&error, true),
            "{\n  \"error\": true,\n  \"code\": \"NO_LINTERS\",\n  \"message\": \"nothing to run\"\n}"
        );
    }
}
