//! Gate report rendered for pull-request comments.

use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::reputation::{EntityRef, Verdict, format_score};

/// Everything an annotator needs to describe one gate run
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    pub entity: EntityRef,
    pub score: f64,
    pub grade: String,
    pub tier: Option<String>,
    pub passed: bool,
    pub reasons: Vec<String>,
    pub badge_url: Url,
    pub report_url: Url,
}

impl GateReport {
    pub fn new(
        entity: &EntityRef,
        verdict: &Verdict,
        api_base: &Url,
        report_base: &Url,
    ) -> Result<Self> {
        Ok(Self {
            entity: entity.clone(),
            score: verdict.normalized.score,
            grade: verdict.normalized.grade.clone(),
            tier: verdict.normalized.tier.clone(),
            passed: verdict.passed,
            reasons: verdict.reasons.clone(),
            badge_url: entity.badge_url(api_base)?,
            report_url: entity.report_url(report_base)?,
        })
    }

    pub fn status(&self) -> &'static str {
        if self.passed { "✅ Passed" } else { "❌ Failed" }
    }

    /// Markdown body for a PR comment.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "## Mnemom Trust Score".to_string(),
            String::new(),
            format!("![Trust Score]({})", self.badge_url),
            String::new(),
            "| Metric | Value |".to_string(),
            "|--------|-------|".to_string(),
            format!("| {} | {} |", self.entity.kind.label(), self.entity.id),
            format!("| Score | {} |", format_score(self.score)),
            format!("| Grade | {} |", self.grade),
        ];
        if let Some(tier) = &self.tier {
            lines.push(format!("| Tier | {} |", tier));
        }
        lines.push(format!("| Status | {} |", self.status()));
        if !self.reasons.is_empty() {
            lines.push(format!("| Reason | {} |", self.reasons.join(", ")));
        }
        lines.push(String::new());
        lines.push(format!("[View Full Report]({})", self.report_url));
        lines.join("\n")
    }
}
