use super::Outcome;
use crate::cli::RunArgs;
use crate::config::LintentConfig;
use crate::detect;
use crate::enrich::{RuleTable, enrich};
use crate::error::LintentError;
use crate::report;
use crate::runner::{self, LinterRunResult};
use crate::types::Violation;
use std::path::Path;
use tracing::{debug, info};

/// Detect, run, and enrich all configured linters
///
/// Fails the process when any violation is reported or any linter could not run.
pub async fn run(args: &RunArgs, cwd: &Path) -> Result<Outcome, LintentError> {
    let config_path = super::config_path(cwd, args.config.as_deref());
    let config = LintentConfig::load(&config_path)?;
    let rules = RuleTable::from_config(&config);
    if rules.is_empty() {
        debug!("No semantic rules configured in {}", config_path.display());
    }

    let detected = detect::detect_linters(cwd);
    let detected_names: Vec<String> = detected.iter().map(|l| l.tool.name().to_string()).collect();
    let mut linters = detect::merge_overrides(detected, &config.linters);

    if let Some(tool) = &args.tool {
        linters.retain(|l| l.tool.name() == tool);
        if linters.is_empty() {
            return Err(LintentError::LinterNotFound(tool.clone()));
        }
    }

    if linters.is_empty() {
        return Err(LintentError::NoLinters);
    }

    let results = runner::run_all(&linters, cwd).await;
    Ok(assemble(&results, detected_names, &rules))
}

/// Enrich every violation and build the report
fn assemble(results: &[LinterRunResult], detected: Vec<String>, rules: &RuleTable) -> Outcome {
    let violations: Vec<Violation> = results
        .iter()
        .flat_map(|r| r.violations.iter().cloned())
        .collect();
    let enriched = enrich(&violations, rules);
    let any_failed = results.iter().any(|r| r.is_failure());
    info!(
        "{} violations, {} with semantic rules",
        enriched.len(),
        enriched.iter().filter(|v| v.semantic.is_some()).count()
    );

    let report = report::format_report(enriched, results, detected);
    Outcome::new(&report, violations.is_empty() && !any_failed)
}
