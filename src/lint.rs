//! External linter adapter.
//!
//! Shells out to a linter over the analyzed file's on-disk path and
//! normalizes its diagnostic stream into [`Suggestion`] records. Every
//! failure mode (missing binary, non-zero exit, garbage output) collapses
//! to an empty suggestion list; lint problems never abort an analysis run.

use std::path::Path;
use std::process::Command;

use crate::analysis::Suggestion;

/// Produces suggestions for a file on disk.
pub trait Linter: Send + Sync {
    fn lint(&self, path: &Path) -> anyhow::Result<Vec<Suggestion>>;
}

/// Linter that invokes an external command and parses its stdout.
///
/// Expected line shape: `path:line:col:code:message`, colon-delimited,
/// where the message may itself contain colons.
pub struct ExternalLinter {
    program: String,
    args: Vec<String>,
}

impl ExternalLinter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// pylint configured to emit the expected line shape.
    pub fn pylint() -> Self {
        Self::new(
            "pylint",
            vec![
                "--msg-template={path}:{line}:{column}:{msg_id}:{msg}".to_string(),
                "--score=n".to_string(),
            ],
        )
    }
}

impl Linter for ExternalLinter {
    fn lint(&self, path: &Path) -> anyhow::Result<Vec<Suggestion>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()?;

        // pylint exits non-zero whenever it has findings; only the stream
        // matters here.
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter_map(parse_line).collect())
    }
}

/// Parse one diagnostic line, splitting on the first four colons only.
///
/// Lines that don't produce five fields are skipped.
pub fn parse_line(line: &str) -> Option<Suggestion> {
    let fields: Vec<&str> = line.splitn(5, ':').collect();
    if fields.len() != 5 {
        return None;
    }

    Some(Suggestion {
        line: fields[1].trim().parse().ok(),
        code: fields[3].trim().to_string(),
        message: fields[4].trim().to_string(),
    })
}
