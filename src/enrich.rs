use crate::config::LintentConfig;
use crate::types::{EnrichedViolation, SemanticRule, Violation};
use std::collections::HashMap;
use tracing::debug;

/// Read-only lookup from "tool/code" to its semantic rule
#[derive(Debug, Default, Clone)]
pub struct RuleTable {
    rules: HashMap<String, SemanticRule>,
}

impl RuleTable {
    /// Build the table from a validated config
    pub fn from_config(config: &LintentConfig) -> Self {
        let rules: HashMap<_, _> = config
            .rules
            .iter()
            .map(|entry| (entry.key(), entry.rule.clone()))
            .collect();
        debug!("Built rule table with {} rules", rules.len());
        Self { rules }
    }

    /// Look up a rule by its exact, case-sensitive "tool/code" key
    pub fn get(&self, key: &str) -> Option<&SemanticRule> {
        self.rules.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, SemanticRule)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (String, SemanticRule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Attach the matching semantic rule (or none) to each violation, in order
pub fn enrich(violations: &[Violation], rules: &RuleTable) -> Vec<EnrichedViolation> {
    violations
        .iter()
        .map(|v| EnrichedViolation {
            violation: v.clone(),
            semantic: rules.get(&v.rule_key()).cloned(),
        })
        .collect()
}
