use super::Outcome;
use crate::cli::ConfigArgs;
use crate::config::LintentConfig;
use crate::error::LintentError;
use serde_json::json;
use std::path::Path;
use tracing::warn;

/// Check lintent.yaml and report either a summary or the validation error
pub fn validate(args: &ConfigArgs, cwd: &Path) -> Result<Outcome, LintentError> {
    let path = super::config_path(cwd, args.config.as_deref());
    if !path.exists() {
        return Err(LintentError::ConfigNotFound(path.display().to_string()));
    }

    match LintentConfig::load(&path) {
        Ok(config) => Ok(Outcome::new(
            &json!({
                "valid": true,
                "linters": config.rule_tools(),
                "rules_count": config.rules.len(),
            }),
            true,
        )),
        Err(e) => {
            warn!("Invalid config {}: {}", path.display(), e);
            Ok(Outcome::new(
                &json!({
                    "valid": false,
                    "errors": [{ "message": e.to_string() }],
                }),
                false,
            ))
        }
    }
}
