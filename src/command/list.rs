use super::Outcome;
use crate::cli::ConfigArgs;
use crate::config::LintentConfig;
use crate::error::LintentError;
use serde_json::json;
use std::path::Path;

/// List the (tool, code) of every semantic rule, in file order
pub fn list(args: &ConfigArgs, cwd: &Path) -> Result<Outcome, LintentError> {
    let path = super::config_path(cwd, args.config.as_deref());
    if !path.exists() {
        return Err(LintentError::ConfigNotFound(path.display().to_string()));
    }

    let config = LintentConfig::load(&path)?;
    let rules: Vec<_> = config
        .rule_keys()
        .into_iter()
        .map(|(tool, code)| json!({ "tool": tool, "code": code }))
        .collect();

    Ok(Outcome::new(
        &json!({ "count": rules.len(), "rules": rules }),
        true,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> ConfigArgs {
        ConfigArgs {
            config: None,
            pretty: false,
        }
    }

    #[test]
    fn test_list_in_file_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("lintent.yaml"),
            "rules:\n  typescript:\n    TS2322: {illegal: a, legal: b, why: c}\n  eslint:\n    no-var: {illegal: a, legal: b, why: c}\n",
        )
        .unwrap();

        let outcome = list(&args(), dir.path()).unwrap();

        assert_eq!(
            outcome.body,
            json!({
                "rules": [
                    {"tool": "typescript", "code": "TS2322"},
                    {"tool": "eslint", "code": "no-var"},
                ],
                "count": 2,
            })
        );
    }

    #[test]
    fn test_list_missing_config() {
        let dir = TempDir::new().unwrap();
        assert_eq!(list(&args(), dir.path()).unwrap_err().code(), "CONFIG_NOT_FOUND");
    }

    #[test]
    fn test_list_invalid_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lintent.yaml"), "rules: nope\n").unwrap();
        assert_eq!(list(&args(), dir.path()).unwrap_err().code(), "INVALID_CONFIG");
    }
}
