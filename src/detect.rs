use crate::config::LinterOverride;
use crate::types::Tool;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace, warn};

const PYPROJECT: &str = "pyproject.toml";

const ESLINT_CONFIG_FILES: [&str; 8] = [
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.json",
    ".eslintrc.yml",
    ".eslintrc.yaml",
];

/// How to invoke one linter
#[derive(Debug, Clone, PartialEq)]
pub struct LinterSpec {
    pub tool: Tool,
    /// Config file the linter was detected from, or the explicit override
    pub config_path: Option<PathBuf>,
    /// Whether `config_path` came from lintent.yaml and must be passed to the tool
    pub explicit_config: bool,
    pub command: String,
    pub args: Vec<String>,
    pub paths: Vec<String>,
    pub timeout: Option<Duration>,
}

impl LinterSpec {
    /// Default invocation for `tool`
    pub fn new(tool: Tool, config_path: Option<PathBuf>) -> Self {
        Self {
            tool,
            config_path,
            explicit_config: false,
            command: tool.command().to_string(),
            args: tool.default_args().iter().map(|a| a.to_string()).collect(),
            paths: tool.default_paths(),
            timeout: None,
        }
    }

    /// Full argument list: format args, explicit config, then target paths
    pub fn full_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        if self.explicit_config {
            if let Some(path) = &self.config_path {
                args.push(self.tool.config_flag().to_string());
                args.push(path.display().to_string());
            }
        }
        // tsc rejects file arguments alongside --project
        let skip_paths = self.explicit_config && self.tool == Tool::Typescript;
        if !skip_paths {
            args.extend(self.paths.iter().cloned());
        }
        args
    }

    /// Human-readable command line for reports
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.clone())
            .chain(self.full_args())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Detect configured linters in `cwd`, in fixed order: ruff, pyright, eslint, typescript
pub fn detect_linters(cwd: &Path) -> Vec<LinterSpec> {
    let detected: Vec<LinterSpec> = [
        detect_ruff(cwd),
        detect_pyright(cwd),
        detect_eslint(cwd),
        detect_typescript(cwd),
    ]
    .into_iter()
    .flatten()
    .collect();
    debug!(
        "Detected linters: {:?}",
        detected.iter().map(|l| l.tool.name()).collect::<Vec<_>>()
    );
    detected
}

fn detect_ruff(cwd: &Path) -> Option<LinterSpec> {
    let ruff_toml = cwd.join("ruff.toml");
    if ruff_toml.exists() {
        return Some(LinterSpec::new(Tool::Ruff, Some(ruff_toml)));
    }
    pyproject_has_tool(cwd, "ruff")
        .then(|| LinterSpec::new(Tool::Ruff, Some(cwd.join(PYPROJECT))))
}

fn detect_pyright(cwd: &Path) -> Option<LinterSpec> {
    let pyright_config = cwd.join("pyrightconfig.json");
    if pyright_config.exists() {
        return Some(LinterSpec::new(Tool::Pyright, Some(pyright_config)));
    }
    pyproject_has_tool(cwd, "pyright")
        .then(|| LinterSpec::new(Tool::Pyright, Some(cwd.join(PYPROJECT))))
}

fn detect_eslint(cwd: &Path) -> Option<LinterSpec> {
    if let Some(config) = ESLINT_CONFIG_FILES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.exists())
    {
        return Some(LinterSpec::new(Tool::Eslint, Some(config)));
    }

    let package_json = cwd.join("package.json");
    if !package_json.exists() {
        return None;
    }
    match package_json_has_eslint(&package_json) {
        Ok(true) => Some(LinterSpec::new(Tool::Eslint, None)),
        Ok(false) => None,
        Err(e) => {
            debug!("Ignoring package.json: {:#}", e);
            None
        }
    }
}

fn detect_typescript(cwd: &Path) -> Option<LinterSpec> {
    let tsconfig = cwd.join("tsconfig.json");
    tsconfig
        .exists()
        .then(|| LinterSpec::new(Tool::Typescript, Some(tsconfig)))
}

/// Whether pyproject.toml has a `[tool.<name>]` table
fn pyproject_has_tool(cwd: &Path, name: &str) -> bool {
    let path = cwd.join(PYPROJECT);
    if !path.exists() {
        return false;
    }
    match read_pyproject(&path) {
        Ok(table) => table
            .get("tool")
            .and_then(|tool| tool.get(name))
            .is_some_and(|section| section.is_table()),
        Err(e) => {
            debug!("Ignoring {}: {:#}", PYPROJECT, e);
            false
        }
    }
}

fn read_pyproject(path: &Path) -> anyhow::Result<toml::Table> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn package_json_has_eslint(path: &Path) -> anyhow::Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let package: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(["dependencies", "devDependencies"]
        .iter()
        .any(|section| package.get(section).and_then(|deps| deps.get("eslint")).is_some()))
}

/// Apply lintent.yaml overrides to the detected linters.
///
/// `enabled: false` removes a detected linter, `enabled: true` adds one that
/// was not detected, and `config`/`paths`/`timeout_secs` replace the defaults.
pub fn merge_overrides(
    detected: Vec<LinterSpec>,
    overrides: &BTreeMap<String, LinterOverride>,
) -> Vec<LinterSpec> {
    for name in overrides.keys() {
        if name.parse::<Tool>().is_err() {
            warn!("Ignoring override for unknown linter '{}'", name);
        }
    }

    let detected_tools: Vec<Tool> = detected.iter().map(|l| l.tool).collect();

    let mut merged: Vec<LinterSpec> = detected
        .into_iter()
        .filter_map(|spec| match overrides.get(spec.tool.name()) {
            Some(o) if o.enabled == Some(false) => {
                debug!("Linter '{}' disabled by config", spec.tool);
                None
            }
            Some(o) => Some(apply_override(spec, o)),
            None => Some(spec),
        })
        .collect();

    for tool in Tool::ALL {
        if detected_tools.contains(&tool) {
            continue;
        }
        if let Some(o) = overrides.get(tool.name()) {
            if o.enabled == Some(true) {
                debug!("Linter '{}' force-enabled by config", tool);
                merged.push(apply_override(LinterSpec::new(tool, None), o));
            }
        }
    }

    trace!("Merged linters: {:?}", merged);
    merged
}

fn apply_override(mut spec: LinterSpec, o: &LinterOverride) -> LinterSpec {
    if let Some(config) = &o.config {
        spec.config_path = Some(PathBuf::from(config));
        spec.explicit_config = true;
    }
    if let Some(paths) = &o.paths {
        spec.paths = paths.clone();
    }
    if let Some(secs) = o.timeout_secs {
        spec.timeout = Some(Duration::from_secs(secs));
    }
    spec
}
