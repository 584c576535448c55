//! Gate Runner
//!
//! Composes one gate run: lookup → evaluate → emit outputs → optional
//! annotation, and maps its result to the process exit status.
//!
//! Fatal errors stop the run before any output is emitted.

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::api::github::{Annotator, GitHubAnnotator};
use crate::api::http::{Lookup, ReputationClient, ReputationSource};
use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::output::{self, OutputSink};
use crate::report::GateReport;
use crate::reputation::{EntityRef, Policy, Verdict, format_score};

/// Exit status for a passing gate
pub const EXIT_PASSED: u8 = 0;
/// Exit status for a complete evaluation that did not pass, including
/// entities the rating service has no record for
pub const EXIT_GATE_FAILED: u8 = 1;
/// Exit status for configuration, transport and output errors
pub const EXIT_FATAL: u8 = 2;

/// Complete result of a gate run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateOutcome {
    pub entity: EntityRef,
    pub verdict: Verdict,
    /// The rating service had no record; the verdict is the sentinel failure
    pub not_found: bool,
}

impl GateOutcome {
    pub fn passed(&self) -> bool {
        self.verdict.passed
    }

    /// One-line summary for the step log or failure annotation.
    pub fn summary(&self) -> String {
        if self.not_found {
            return format!("{} has no reputation score", self.entity);
        }
        let normalized = &self.verdict.normalized;
        if self.verdict.passed {
            format!(
                "Reputation check passed: score={}, grade={}",
                format_score(normalized.score),
                normalized.grade
            )
        } else {
            format!(
                "Reputation check failed: {}",
                self.verdict.reasons.join("; ")
            )
        }
    }
}

/// Runs the gate for a single entity against one policy
pub struct GateRunner<S> {
    source: S,
    policy: Policy,
    api_base: Url,
    report_base: Url,
}

impl<S: ReputationSource> GateRunner<S> {
    /// Create a runner. Fails on a policy that strict mode rejects, before
    /// any lookup happens.
    pub fn new(source: S, policy: Policy, api_base: Url, report_base: Url) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            source,
            policy,
            api_base,
            report_base,
        })
    }

    /// Look up `entity` and evaluate it. Transport failures are returned as
    /// errors; a missing record becomes a failing outcome.
    pub async fn evaluate(&self, entity: &EntityRef) -> Result<GateOutcome> {
        let outcome = match self.source.lookup(entity).await? {
            Lookup::Found(record) => GateOutcome {
                entity: entity.clone(),
                verdict: self.policy.evaluate(&record),
                not_found: false,
            },
            Lookup::NotFound => GateOutcome {
                entity: entity.clone(),
                verdict: Verdict::not_found(entity),
                not_found: true,
            },
        };

        info!(
            entity_type = %entity.kind,
            entity_id = %entity.id,
            passed = outcome.verdict.passed,
            reasons = outcome.verdict.reasons.len(),
            "Gate evaluated"
        );
        Ok(outcome)
    }

    /// Evaluate, emit the step outputs to `sink`, then post the report
    /// through `annotator` if one is given.
    pub async fn run<A: Annotator>(
        &self,
        entity: &EntityRef,
        sink: &OutputSink,
        annotator: Option<&A>,
    ) -> Result<GateOutcome> {
        let outcome = self.evaluate(entity).await?;
        sink.emit_outcome(&outcome).map_err(|e| GateError::Output(format!("{:#}", e)))?;
        if let Some(annotator) = annotator {
            self.annotate_best_effort(&outcome, annotator).await;
        }
        Ok(outcome)
    }

    /// Post the report for `outcome`. Errors are logged as warnings and never
    /// change the outcome. Not-found outcomes are not annotated.
    async fn annotate_best_effort<A: Annotator>(
        &self,
        outcome: &GateOutcome,
        annotator: &A,
    ) {
        if outcome.not_found {
            return;
        }
        if let Err(e) = self.annotate(outcome, annotator).await {
            warn!("{}", e);
            output::warning(&e.to_string());
        }
    }

    async fn annotate<A: Annotator>(&self, outcome: &GateOutcome, annotator: &A) -> Result<()> {
        let report = GateReport::new(
            &outcome.entity,
            &outcome.verdict,
            &self.api_base,
            &self.report_base,
        )
        .map_err(|e| GateError::Annotation(e.to_string()))?;
        annotator.annotate(&report).await
    }
}

/// Run the gate described by a fully overridden `config`.
pub async fn execute(config: &GateConfig) -> anyhow::Result<GateOutcome> {
    config.validate()?;

    let entity = EntityRef::resolve(
        config.inputs.agent_id.as_deref(),
        config.inputs.team_id.as_deref(),
    )?;

    let api_base = config.api_base()?;
    let client = ReputationClient::new(api_base.clone(), config.http_config())?;
    let runner = GateRunner::new(client, config.policy(), api_base, config.report_base()?)?;

    let sink = OutputSink::new(config.github.output_path.clone());
    let annotator = if config.inputs.comment {
        GitHubAnnotator::from_context(&config.github_context())
    } else {
        None
    };

    Ok(runner.run(&entity, &sink, annotator.as_ref()).await?)
}

/// Map the result of a run to the process exit status.
pub fn exit_status(result: &anyhow::Result<GateOutcome>) -> u8 {
    match result {
        Ok(outcome) if outcome.passed() => EXIT_PASSED,
        Ok(_) => EXIT_GATE_FAILED,
        Err(_) => EXIT_FATAL,
    }
}
