use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A code-quality tool lintent knows how to run and parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Ruff,
    Pyright,
    Eslint,
    Typescript,
}

impl Tool {
    /// All tools in detection order
    pub const ALL: [Tool; 4] = [Tool::Ruff, Tool::Pyright, Tool::Eslint, Tool::Typescript];

    /// Identifier used in reports and rule keys
    pub fn name(self) -> &'static str {
        match self {
            Tool::Ruff => "ruff",
            Tool::Pyright => "pyright",
            Tool::Eslint => "eslint",
            Tool::Typescript => "typescript",
        }
    }

    /// Binary to spawn
    pub fn command(self) -> &'static str {
        match self {
            Tool::Ruff => "ruff",
            Tool::Pyright => "pyright",
            Tool::Eslint => "eslint",
            Tool::Typescript => "tsc",
        }
    }

    /// Arguments that make the tool emit its machine-readable format
    pub fn default_args(self) -> &'static [&'static str] {
        match self {
            Tool::Ruff => &["check", "--output-format", "json"],
            Tool::Pyright => &["--outputjson"],
            Tool::Eslint => &["--format", "json"],
            Tool::Typescript => &["--noEmit", "--pretty", "false"],
        }
    }

    /// Target paths appended after the arguments.
    /// tsc takes its inputs from tsconfig.json, so it gets none.
    pub fn default_paths(self) -> Vec<String> {
        match self {
            Tool::Typescript => vec![],
            _ => vec![".".to_string()],
        }
    }

    /// Flag that points the tool at an explicit config file
    pub fn config_flag(self) -> &'static str {
        match self {
            Tool::Ruff | Tool::Eslint => "--config",
            Tool::Pyright | Tool::Typescript => "--project",
        }
    }

    /// Highest exit code that still means "ran and reported findings"
    pub fn max_normal_exit_code(self) -> i32 {
        match self {
            Tool::Ruff | Tool::Pyright | Tool::Eslint => 1,
            // tsc uses 2 for "diagnostics present, outputs generated"
            Tool::Typescript => 2,
        }
    }

    /// How to install the tool, shown when its binary is missing
    pub fn install_hint(self) -> &'static str {
        match self {
            Tool::Ruff => "pip install ruff (or: brew install ruff)",
            Tool::Pyright => "pip install pyright (or: npm install -g pyright)",
            Tool::Eslint => "npm install eslint",
            Tool::Typescript => "npm install typescript",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown linter '{}'", s))
    }
}

/// A single diagnostic normalized from any tool's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// File path as reported by the tool
    pub file: String,
    /// Line (1-indexed)
    pub line: u32,
    /// Column (1-indexed)
    pub column: u32,
    /// Tool that reported the violation
    pub tool: Tool,
    /// Rule identifier, never empty
    pub code: String,
    /// Tool message, trimmed
    pub message: String,
}

impl Violation {
    /// Build a violation, clamping coordinates to 1 and trimming the message
    pub fn new(
        tool: Tool,
        file: impl Into<String>,
        line: u32,
        column: u32,
        code: impl Into<String>,
        message: &str,
    ) -> Self {
        Self {
            file: file.into(),
            line: line.max(1),
            column: column.max(1),
            tool,
            code: code.into(),
            message: message.trim().to_string(),
        }
    }

    /// Key into the rule table: "tool/code"
    pub fn rule_key(&self) -> String {
        format!("{}/{}", self.tool, self.code)
    }
}

/// Human-authored meaning of a lint rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRule {
    /// The pattern the rule forbids
    pub illegal: String,
    /// The pattern to use instead, possibly with "or ..." exceptions
    pub legal: String,
    /// Why the rule exists
    pub why: String,
}

/// A violation with the semantic rule attached, if one is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedViolation {
    #[serde(flatten)]
    pub violation: Violation,
    pub semantic: Option<SemanticRule>,
}
