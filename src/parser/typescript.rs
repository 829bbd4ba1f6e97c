use crate::types::{Tool, Violation};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `path(line,col): error TSnnnn: message`, anchored to the whole line
static TSC_DIAGNOSTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^(]+?)\((\d+),(\d+)\):\s*error\s+(TS\d+):\s*(.+)$")
        .expect("tsc diagnostic pattern is valid")
});

/// Parse `tsc --pretty false` text output, one diagnostic per line.
/// Lines that do not match (banners, blank lines, continuation lines) are skipped.
pub fn parse(output: &str) -> Vec<Violation> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Violation> {
    let caps = TSC_DIAGNOSTIC.captures(line)?;
    let (Ok(line_no), Ok(column)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
        trace!("Skipping tsc line with out-of-range position: {}", line);
        return None;
    };
    Some(Violation::new(
        Tool::Typescript,
        caps[1].trim(),
        line_no,
        column,
        &caps[4],
        &caps[5],
    ))
}
