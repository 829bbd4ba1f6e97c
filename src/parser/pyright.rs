use crate::types::{Tool, Violation};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Array of diagnostics in the top level of `pyright --outputjson`
const DIAGNOSTICS_FIELD: &str = "generalDiagnostics";

#[derive(Deserialize)]
struct PyrightDiagnostic {
    file: String,
    severity: String,
    message: String,
    // Omitted for diagnostics with an empty range, such as file-level ones
    #[serde(default)]
    range: Option<PyrightRange>,
    #[serde(default)]
    rule: Option<String>,
}

#[derive(Deserialize)]
struct PyrightRange {
    start: PyrightPosition,
}

/// 0-indexed position
#[derive(Deserialize)]
struct PyrightPosition {
    line: u32,
    character: u32,
}

/// Parse pyright JSON output, shifting its 0-indexed positions to 1-indexed
pub fn parse(output: &str) -> Vec<Violation> {
    let Some(mut root) = super::decode(Tool::Pyright, output) else {
        return vec![];
    };
    let items = match root.get_mut(DIAGNOSTICS_FIELD).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => {
            debug!("Discarding pyright output: no '{}' array", DIAGNOSTICS_FIELD);
            return vec![];
        }
    };

    super::decode_each::<PyrightDiagnostic>(Tool::Pyright, items)
        .into_iter()
        .map(|d| {
            let code = match d.rule {
                Some(rule) if !rule.is_empty() => rule,
                _ => format!("pyright-{}", d.severity),
            };
            let (line, column) = d.range.map_or((1, 1), |r| {
                (
                    r.start.line.saturating_add(1),
                    r.start.character.saturating_add(1),
                )
            });
            Violation::new(Tool::Pyright, d.file, line, column, code, &d.message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(line: u32, character: u32, rule: Option<&str>) -> String {
        let rule = rule
            .map(|r| format!(r#","rule":"{}""#, r))
            .unwrap_or_default();
        format!(
            r#"{{"version":"1.1.0","generalDiagnostics":[{{"file":"src/main.py","severity":"error","message":"bad","range":{{"start":{{"line":{line},"character":{character}}},"end":{{"line":{line},"character":{character}}}}}{rule}}}],"summary":{{"filesAnalyzed":1}}}}"#
        )
    }

    #[test]
    fn test_parse_shifts_origin_to_one() {
        let violations = parse(&diagnostic(0, 0, Some("X1")));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
        assert_eq!(violations[0].column, 1);
    }

    #[test]
    fn test_parse_shifts_interior_position() {
        let violations = parse(&diagnostic(10, 4, Some("X1")));
        assert_eq!(
            violations,
            vec![Violation {
                file: "src/main.py".into(),
                line: 11,
                column: 5,
                tool: Tool::Pyright,
                code: "X1".into(),
                message: "bad".into(),
            }]
        );
    }

    #[test]
    fn test_parse_missing_rule_uses_severity_placeholder() {
        let violations = parse(&diagnostic(3, 2, None));
        assert_eq!(violations[0].code, "pyright-error");
    }

    #[test]
    fn test_parse_preserves_order() {
        let output = r#"{"generalDiagnostics":[
          {"file":"b.py","severity":"warning","message":"second?","range":{"start":{"line":5,"character":0},"end":{"line":5,"character":1}},"rule":"reportUnusedVariable"},
          {"file":"a.py","severity":"information","message":"third","range":{"start":{"line":1,"character":2},"end":{"line":1,"character":3}}}
        ]}"#;
        let violations = parse(output);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].file, "b.py");
        assert_eq!(violations[0].code, "reportUnusedVariable");
        assert_eq!(violations[1].file, "a.py");
        assert_eq!(violations[1].code, "pyright-information");
    }

    #[test]
    fn test_parse_diagnostic_without_range() {
        let output = r#"{"generalDiagnostics":[
          {"file":"a.py","severity":"error","message":"bad","range":{"start":{"line":2,"character":4},"end":{"line":2,"character":9}},"rule":"reportGeneralTypeIssues"},
          {"file":"b.py","severity":"error","message":"Import cycle"}
        ]}"#;
        let violations = parse(output);
        assert_eq!(violations.len(), 2);
        assert_eq!((violations[0].line, violations[0].column), (3, 5));
        assert_eq!(violations[1].file, "b.py");
        assert_eq!((violations[1].line, violations[1].column), (1, 1));
        assert_eq!(violations[1].code, "pyright-error");
    }

    #[test]
    fn test_parse_skips_malformed_diagnostic() {
        let output = r#"{"generalDiagnostics":[
          {"file":"a.py","severity":"error","message":"first","rule":"R1"},
          {"file":"b.py","message":"no severity"},
          {"file":"c.py","severity":"warning","message":"third","range":{"start":{"line":"x"}}},
          {"file":"d.py","severity":"warning","message":"fourth","rule":"R4"}
        ]}"#;
        let files: Vec<_> = parse(output).into_iter().map(|v| v.file).collect();
        assert_eq!(files, ["a.py", "d.py"]);
    }

    #[test]
    fn test_parse_missing_or_wrong_diagnostics_field() {
        assert!(parse(r#"{"version":"1.1.0"}"#).is_empty());
        assert!(parse(r#"{"generalDiagnostics":{}}"#).is_empty());
        assert!(parse(r#"{"generalDiagnostics":[]}"#).is_empty());
        assert!(parse("[]").is_empty());
    }
}
