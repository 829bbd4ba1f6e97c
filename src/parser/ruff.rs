use crate::types::{Tool, Violation};
use serde::Deserialize;

/// Code used when ruff reports a diagnostic without a rule (e.g. syntax errors)
pub const NULL_RULE_CODE: &str = "ruff-error";

/// One entry of `ruff check --output-format json`
#[derive(Deserialize)]
struct RuffDiagnostic {
    #[serde(default)]
    code: Option<String>,
    filename: String,
    location: RuffLocation,
    message: String,
}

/// 1-indexed position
#[derive(Deserialize)]
struct RuffLocation {
    row: u32,
    column: u32,
}

/// Parse ruff JSON output (top-level array, coordinates already 1-indexed)
pub fn parse(output: &str) -> Vec<Violation> {
    let items = super::array_items(Tool::Ruff, super::decode(Tool::Ruff, output));

    super::decode_each::<RuffDiagnostic>(Tool::Ruff, items)
        .into_iter()
        .map(|d| {
            let code = match d.code {
                Some(code) if !code.is_empty() => code,
                _ => NULL_RULE_CODE.to_string(),
            };
            Violation::new(
                Tool::Ruff,
                d.filename,
                d.location.row,
                d.location.column,
                code,
                &d.message,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_diagnostic() {
        let output = r#"[{"code":"F401","filename":"a.py","location":{"column":8,"row":1},"message":"unused"}]"#;
        let violations = parse(output);
        assert_eq!(
            violations,
            vec![Violation {
                file: "a.py".into(),
                line: 1,
                column: 8,
                tool: Tool::Ruff,
                code: "F401".into(),
                message: "unused".into(),
            }]
        );
    }

    #[test]
    fn test_parse_full_ruff_records_in_order() {
        let output = r#"[
          {
            "cell": null,
            "code": "F401",
            "end_location": {"column": 10, "row": 1},
            "filename": "src/main.py",
            "fix": null,
            "location": {"column": 8, "row": 1},
            "message": "`os` imported but unused",
            "noqa_row": 1,
            "url": "https://docs.astral.sh/ruff/rules/unused-import"
          },
          {
            "cell": null,
            "code": "E501",
            "end_location": {"column": 120, "row": 15},
            "filename": "src/main.py",
            "fix": null,
            "location": {"column": 89, "row": 15},
            "message": "Line too long (120 > 88)",
            "noqa_row": 15,
            "url": "https://docs.astral.sh/ruff/rules/line-too-long"
          }
        ]"#;
        let violations = parse(output);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].code, "F401");
        assert_eq!(violations[1].code, "E501");
        assert_eq!((violations[1].line, violations[1].column), (15, 89));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse("[]").is_empty());
    }

    #[test]
    fn test_parse_non_array_top_level() {
        assert!(parse(r#"{"code":"F401"}"#).is_empty());
        assert!(parse("42").is_empty());
    }

    #[test]
    fn test_parse_null_code_gets_placeholder() {
        let output = r#"[
          {"code":"F401","filename":"a.py","location":{"column":8,"row":1},"message":"unused"},
          {"code":null,"filename":"b.py","location":{"column":5,"row":3},"message":"SyntaxError: Expected an expression"}
        ]"#;
        let violations = parse(output);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].code, "F401");
        assert_eq!(violations[1].code, NULL_RULE_CODE);
        assert_eq!(violations[1].file, "b.py");
        assert_eq!((violations[1].line, violations[1].column), (3, 5));
    }

    #[test]
    fn test_parse_skips_malformed_element() {
        let output = r#"[
          {"code":"F401","filename":"a.py","location":{"column":8,"row":1},"message":"unused"},
          {"code":"E501","filename":"a.py","message":"no location"},
          {"code":"F841","filename":"c.py","location":{"column":1,"row":9},"message":"unused var"}
        ]"#;
        let codes: Vec<_> = parse(output).into_iter().map(|v| v.code).collect();
        assert_eq!(codes, ["F401", "F841"]);
    }
}
