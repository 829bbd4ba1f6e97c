use crate::types::{Tool, Violation};
use serde::Deserialize;
use serde_json::Value;

/// Code used when ESLint reports a message without a rule (e.g. parse errors)
pub const NULL_RULE_CODE: &str = "eslint-error";

/// Per-file entry of `eslint --format json`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintResult {
    file_path: String,
    messages: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EslintMessage {
    rule_id: Option<String>,
    message: String,
    // Absent on file-level messages such as "File ignored"
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    column: Option<u32>,
}

/// Parse ESLint JSON output, flattening messages file by file
pub fn parse(output: &str) -> Vec<Violation> {
    let items = super::array_items(Tool::Eslint, super::decode(Tool::Eslint, output));

    super::decode_each::<EslintResult>(Tool::Eslint, items)
        .into_iter()
        .flat_map(|result| {
            let file = result.file_path;
            let messages = super::decode_each::<EslintMessage>(Tool::Eslint, result.messages);
            messages.into_iter().map(move |m| {
                let code = match m.rule_id {
                    Some(rule) if !rule.is_empty() => rule,
                    _ => NULL_RULE_CODE.to_string(),
                };
                Violation::new(
                    Tool::Eslint,
                    file.clone(),
                    m.line.unwrap_or(1),
                    m.column.unwrap_or(1),
                    code,
                    &m.message,
                )
            })
        })
        .collect()
}
