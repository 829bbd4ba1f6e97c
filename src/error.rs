use crate::config::ConfigError;
use crate::report::ErrorReport;

/// Errors surfaced to the user by a command
#[derive(Debug, thiserror::Error)]
pub enum LintentError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("{0} already exists. Delete it first or pass --override to reinitialize.")]
    ConfigExists(String),

    #[error("Unknown preset '{0}'. Available: python, typescript")]
    InvalidPreset(String),

    #[error("Linter '{0}' not found or not configured")]
    LinterNotFound(String),

    #[error(
        "No linters detected. To fix: 1) Install a linter (pip install ruff, npm install eslint), \
         2) Create config file (pyproject.toml, eslint.config.js), \
         3) Run 'lintent init' to create lintent.yaml"
    )]
    NoLinters,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

impl LintentError {
    /// Stable category code for machine consumers
    pub fn code(&self) -> &'static str {
        match self {
            LintentError::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            LintentError::ConfigExists(_) => "CONFIG_EXISTS",
            LintentError::InvalidPreset(_) => "INVALID_PRESET",
            LintentError::LinterNotFound(_) => "LINTER_NOT_FOUND",
            LintentError::NoLinters => "NO_LINTERS",
            LintentError::Config(_) => "INVALID_CONFIG",
            LintentError::Write { .. } => "INIT_ERROR",
            LintentError::WorkingDir(_) => "RUNTIME_ERROR",
        }
    }

    pub fn to_report(&self) -> ErrorReport {
        ErrorReport::new(self.code(), self.to_string())
    }
}
