pub mod init;
pub mod list;
pub mod run;
pub mod validate;

use crate::config::CONFIG_FILE_NAME;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a command prints, and whether the process should exit successfully
#[derive(Debug)]
pub struct Outcome {
    pub body: serde_json::Value,
    pub success: bool,
}

impl Outcome {
    pub fn new<T: Serialize>(body: &T, success: bool) -> Self {
        Self {
            body: serde_json::to_value(body).unwrap_or_default(),
            success,
        }
    }
}

/// Config path from the command line, or lintent.yaml in `cwd`
fn config_path(cwd: &Path, arg: Option<&Path>) -> PathBuf {
    match arg {
        Some(path) => cwd.join(path),
        None => cwd.join(CONFIG_FILE_NAME),
    }
}
