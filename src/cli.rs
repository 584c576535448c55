use clap::Parser;

use crate::config::GateConfig;

/// reputation-gate: fail a CI check when an agent or team reputation is
/// below the configured score or grade floor.
///
/// Inputs default to the GitHub Actions `INPUT_*` environment variables;
/// flags given here take precedence.
#[derive(Debug, Default, Parser)]
#[command(name = "reputation-gate", version, about, long_about = None)]
pub struct Cli {
    /// Agent to check (exclusive with --team-id).
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Team to check (exclusive with --agent-id).
    #[arg(long)]
    pub team_id: Option<String>,

    /// Minimum score; 0 disables the score check.
    #[arg(long)]
    pub min_score: Option<u32>,

    /// Minimum grade (AAA, AA, A, BBB, BB, B, CCC, NR).
    #[arg(long)]
    pub min_grade: Option<String>,

    /// Rating service base URL.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Post the report as a pull-request comment.
    #[arg(long)]
    pub comment: bool,

    /// Reject an unrecognized --min-grade instead of ignoring it.
    #[arg(long)]
    pub strict_grade: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Overlay flags onto an environment-derived configuration.
    pub fn apply(&self, config: &mut GateConfig) {
        if let Some(agent_id) = &self.agent_id {
            config.inputs.agent_id = Some(agent_id.clone());
        }
        if let Some(team_id) = &self.team_id {
            config.inputs.team_id = Some(team_id.clone());
        }
        if let Some(min_score) = self.min_score {
            config.inputs.min_score = min_score;
        }
        if let Some(min_grade) = &self.min_grade {
            config.inputs.min_grade = Some(min_grade.clone());
        }
        if let Some(api_url) = &self.api_url {
            config.api.api_url = api_url.clone();
        }
        if self.comment {
            config.inputs.comment = true;
        }
        if self.strict_grade {
            config.inputs.strict_grade = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
