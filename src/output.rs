//! Workflow output emission
//!
//! Outputs go to the file named by `GITHUB_OUTPUT` when the runner provides
//! one, otherwise to stdout as legacy `set-output` workflow commands.
//!
//! File outputs use the multiline form `name<<DELIMITER`, value, `DELIMITER`
//! with a fresh random delimiter, so a value holding newlines cannot add
//! outputs of its own.

use anyhow::{Context, Result, bail};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use crate::gate::GateOutcome;
use crate::reputation::format_score;

/// Destination for step outputs
#[derive(Debug, Clone)]
pub enum OutputSink {
    File(PathBuf),
    Stdout,
}

impl OutputSink {
    pub fn new(github_output: Option<PathBuf>) -> Self {
        match github_output {
            Some(path) => OutputSink::File(path),
            None => OutputSink::Stdout,
        }
    }

    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        debug!(output = name, value = value, "Setting step output");
        match self {
            OutputSink::File(path) => {
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                if value.contains(&delimiter) {
                    bail!("Output {} contains its delimiter {}", name, delimiter);
                }
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {}", path.display()))?;
                write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
                    .with_context(|| format!("Failed to write output {}", name))?;
            }
            OutputSink::Stdout => {
                println!("::set-output name={}::{}", name, escape_data(value));
            }
        }
        Ok(())
    }

    /// Emit the `score`, `grade`, `tier`, `passed` and `entity-type` outputs.
    pub fn emit_outcome(&self, outcome: &GateOutcome) -> Result<()> {
        for (name, value) in outcome_outputs(outcome) {
            self.set_output(name, &value)?;
        }
        Ok(())
    }
}

/// Output pairs for an outcome, in emission order.
pub fn outcome_outputs(outcome: &GateOutcome) -> Vec<(&'static str, String)> {
    let normalized = &outcome.verdict.normalized;
    vec![
        ("score", format_score(normalized.score)),
        ("grade", normalized.grade.clone()),
        ("tier", normalized.tier.clone().unwrap_or_default()),
        ("passed", outcome.verdict.passed.to_string()),
        ("entity-type", outcome.entity.kind.as_str().to_string()),
    ]
}

/// Mark the step as failed with an `::error::` annotation.
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Escape a workflow-command payload.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
