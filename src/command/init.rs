use super::Outcome;
use crate::cli::InitArgs;
use crate::error::LintentError;
use crate::preset;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write a starter lintent.yaml from a preset
pub fn init(args: &InitArgs, cwd: &Path) -> Result<Outcome, LintentError> {
    let path = cwd.join(&args.config);
    let display = args.config.display().to_string();

    if path.exists() && !args.r#override {
        return Err(LintentError::ConfigExists(display));
    }

    let preset =
        preset::find(&args.preset).ok_or_else(|| LintentError::InvalidPreset(args.preset.clone()))?;

    fs::write(&path, preset.content).map_err(|source| LintentError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("Created {} from preset '{}'", path.display(), preset.name);

    Ok(Outcome::new(
        &json!({
            "created": [display],
            "preset": preset.name,
            "next_steps": [
                format!("Install linter: {}", preset.install),
                "Run: lintent run --pretty",
                "Edit rules in lintent.yaml, then check them with: lintent validate",
            ],
        }),
        true,
    ))
}
