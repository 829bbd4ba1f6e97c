use crate::types::SemanticRule;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lintent.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse lintent.yaml: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Parsed and validated lintent.yaml
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LintentConfig {
    /// Per-linter overrides keyed by linter name
    pub linters: BTreeMap<String, LinterOverride>,
    /// Semantic rules in file order
    pub rules: Vec<RuleEntry>,
}

/// Override for a detected (or undetected) linter
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct LinterOverride {
    /// false disables a detected linter, true forces an undetected one
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Explicit config file passed to the linter
    #[serde(default)]
    pub config: Option<String>,
    /// Paths to lint instead of the linter's defaults
    #[serde(default)]
    pub paths: Option<Vec<String>>,
    /// Kill the linter after this many seconds (no limit by default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// A semantic rule together with the key it is defined under
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub tool: String,
    pub code: String,
    pub rule: SemanticRule,
}

impl RuleEntry {
    /// Lookup key: "tool/code"
    pub fn key(&self) -> String {
        format!("{}/{}", self.tool, self.code)
    }
}

impl LintentConfig {
    /// Load config from `path`; a missing file yields the empty default
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;
        debug!(
            "Loaded {} rules and {} linter overrides from {}",
            config.rules.len(),
            config.linters.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate YAML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let root: Value = serde_yaml_ng::from_str(content)?;
        let root = match root {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(m) => m,
            _ => return Err(invalid("Config must be a mapping")),
        };

        Ok(Self {
            linters: parse_linters(&root)?,
            rules: parse_rules(&root)?,
        })
    }

    /// (tool, code) of every rule, in file order
    pub fn rule_keys(&self) -> Vec<(&str, &str)> {
        self.rules
            .iter()
            .map(|r| (r.tool.as_str(), r.code.as_str()))
            .collect()
    }

    /// Distinct tools that have rules, in first-seen order
    pub fn rule_tools(&self) -> Vec<&str> {
        let mut tools: Vec<&str> = Vec::new();
        for entry in &self.rules {
            if !tools.contains(&entry.tool.as_str()) {
                tools.push(&entry.tool);
            }
        }
        tools
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn section<'a>(root: &'a Mapping, name: &str) -> Result<Option<&'a Mapping>, ConfigError> {
    match root.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(m)) => Ok(Some(m)),
        Some(_) => Err(invalid(format!("'{}' must be a mapping", name))),
    }
}

fn key_string(key: &Value) -> Result<String, ConfigError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(format!("Config keys must be strings, got {:?}", other))),
    }
}

fn parse_linters(root: &Mapping) -> Result<BTreeMap<String, LinterOverride>, ConfigError> {
    let Some(linters) = section(root, "linters")? else {
        return Ok(BTreeMap::new());
    };

    linters
        .iter()
        .map(|(name, value)| {
            let name = key_string(name)?;
            let linter_override = match value {
                Value::Null => LinterOverride::default(),
                Value::Mapping(_) => serde_yaml_ng::from_value(value.clone()).map_err(|e| {
                    invalid(format!("Linter '{}' override is invalid: {}", name, e))
                })?,
                _ => return Err(invalid(format!("Linter '{}' must be a mapping", name))),
            };
            Ok((name, linter_override))
        })
        .collect()
}

fn parse_rules(root: &Mapping) -> Result<Vec<RuleEntry>, ConfigError> {
    let Some(rules) = section(root, "rules")? else {
        return Ok(vec![]);
    };

    let mut entries = Vec::new();
    for (tool, codes) in rules {
        let tool = key_string(tool)?;
        let Value::Mapping(codes) = codes else {
            return Err(invalid(format!("Rules for '{}' must be a mapping", tool)));
        };
        for (code, rule) in codes {
            let code = key_string(code)?;
            let rule = parse_rule(&tool, &code, rule)?;
            entries.push(RuleEntry { tool: tool.clone(), code, rule });
        }
    }
    Ok(entries)
}

fn parse_rule(tool: &str, code: &str, rule: &Value) -> Result<SemanticRule, ConfigError> {
    let Value::Mapping(fields) = rule else {
        return Err(invalid(format!("Rule '{}/{}' must be a mapping", tool, code)));
    };

    let field = |name: &str| match fields.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(invalid(format!(
            "Rule '{}/{}' has empty '{}'",
            tool, code, name
        ))),
        _ => Err(invalid(format!(
            "Rule '{}/{}' must have '{}' string",
            tool, code, name
        ))),
    };

    Ok(SemanticRule {
        illegal: field("illegal")?,
        legal: field("legal")?,
        why: field("why")?,
    })
}
