//! Output path resolution and the post-run summary.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::removal::RemovalOutcome;

/// Suffix appended to the input stem for the default output file.
const OUTPUT_SUFFIX: &str = "_transparent";

/// Sibling of `input` named `<stem>_transparent.png`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map_or_else(|| "image".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.png"))
}

/// Resolve the output path: use the explicit path or derive one from the input.
#[must_use]
pub fn resolve_output_path(explicit: Option<&Path>, input: &Path) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => default_output_path(input),
    }
}

/// Lines describing a finished run: file sizes and how to replace the original.
///
/// The tool never renames anything itself; the last line is a hint.
/// The summary is informational: an unreadable input drops the size line
/// with a warning instead of failing a run whose output is already written.
#[must_use]
pub fn summary_lines(input: &Path, outcome: &RemovalOutcome) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    match std::fs::metadata(input) {
        Ok(meta) => {
            lines.push(format!("Original file: {} ({} bytes)", input.display(), meta.len()));
        }
        Err(e) => warn!(input = %input.display(), "cannot read input size: {e}"),
    }
    lines.push(format!(
        "New file: {} ({} bytes)",
        outcome.output.display(),
        outcome.bytes_written
    ));
    lines.push(format!(
        "To replace the original, run: mv \"{}\" \"{}\"",
        outcome.output.display(),
        input.display()
    ));
    lines
}
