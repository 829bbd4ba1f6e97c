//! Parsers that normalize each tool's native output into [`Violation`]s.
//!
//! Every parser is total. Empty or garbled output, or a top level of the
//! wrong shape, yields an empty list. Individual entries that do not match
//! are skipped, so one odd diagnostic never hides the others.

pub mod eslint;
pub mod pyright;
pub mod ruff;
pub mod typescript;

use crate::types::{Tool, Violation};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Parse raw output from `tool` into violations
pub fn parse(tool: Tool, output: &str) -> Vec<Violation> {
    match tool {
        Tool::Ruff => ruff::parse(output),
        Tool::Pyright => pyright::parse(output),
        Tool::Eslint => eslint::parse(output),
        Tool::Typescript => typescript::parse(output),
    }
}

/// Decode JSON output into a value, or `None` if it is blank or not JSON
fn decode(tool: Tool, output: &str) -> Option<Value> {
    let output = output.trim();
    if output.is_empty() {
        return None;
    }
    match serde_json::from_str(output) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Discarding malformed {} output: {}", tool, e);
            None
        }
    }
}

/// Elements of `value` if it is an array, otherwise none
fn array_items(tool: Tool, value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        Some(_) => {
            debug!("Discarding {} output: expected a JSON array", tool);
            vec![]
        }
        None => vec![],
    }
}

/// Decode each element into the tool's typed shape, skipping the ones that
/// do not match
fn decode_each<T: DeserializeOwned>(tool: Tool, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!("Skipping malformed {} entry {}: {}", tool, i, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_parsers_accept_empty_and_garbage() {
        for tool in Tool::ALL {
            assert!(parse(tool, "").is_empty(), "{} on empty", tool);
            assert!(parse(tool, "   \n").is_empty(), "{} on blank", tool);
            assert!(parse(tool, "not json").is_empty(), "{} on garbage", tool);
            assert!(parse(tool, "{\"x\":").is_empty(), "{} on truncated", tool);
        }
    }

    #[test]
    fn test_dispatch_tags_violations_with_tool() {
        let ruff = r#"[{"code":"F401","filename":"a.py","location":{"column":8,"row":1},"message":"unused"}]"#;
        let violations = parse(Tool::Ruff, ruff);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].tool, Tool::Ruff);

        let tsc = "src/i.ts(5,3): error TS2322: Type mismatch.";
        let violations = parse(Tool::Typescript, tsc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].tool, Tool::Typescript);
    }
}
