//! GitHub pull-request annotation
//!
//! Posts the gate report as a PR comment. Annotation is best-effort: the
//! runner downgrades any error from here to a warning.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::mask_secret;
use crate::error::{GateError, Result};
use crate::report::GateReport;

/// Sink for the optional gate report
pub trait Annotator {
    fn annotate(&self, report: &GateReport) -> impl Future<Output = Result<()>> + Send;
}

/// Workflow context needed to comment on a pull request
#[derive(Debug, Clone, Default)]
pub struct GitHubContext {
    pub api_url: Option<Url>,
    /// `owner/repo`
    pub repository: Option<String>,
    pub token: Option<String>,
    pub pull_request: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    number: u64,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

/// Read the pull-request number from a workflow event payload, if the
/// event is about a pull request.
pub fn pull_request_number(event_path: &Path) -> anyhow::Result<Option<u64>> {
    let raw = std::fs::read_to_string(event_path)?;
    let payload: EventPayload = serde_json::from_str(&raw)?;
    Ok(payload.pull_request.map(|pr| pr.number))
}

/// Annotator that posts an issue comment through the GitHub REST API
pub struct GitHubAnnotator {
    client: Client,
    comments_url: Url,
    token: String,
}

impl GitHubAnnotator {
    /// Build an annotator when the context has everything a comment needs.
    pub fn from_context(context: &GitHubContext) -> Option<Self> {
        let Some(number) = context.pull_request else {
            debug!("Not a pull request event, skipping PR comment");
            return None;
        };
        let Some(token) = context.token.clone().filter(|t| !t.is_empty()) else {
            debug!("GITHUB_TOKEN not set, skipping PR comment");
            return None;
        };
        let Some((owner, repo)) = context
            .repository
            .as_deref()
            .and_then(|r| r.split_once('/'))
        else {
            debug!("GITHUB_REPOSITORY not set, skipping PR comment");
            return None;
        };
        let api_url = context
            .api_url
            .clone()
            .or_else(|| Url::parse("https://api.github.com").ok())?;

        let number = number.to_string();
        let base = api_url.to_string();
        let mut comments_url = api_url;
        {
            let Ok(mut segments) = comments_url.path_segments_mut() else {
                warn!("GitHub API URL {} cannot be a base, skipping PR comment", base);
                return None;
            };
            segments.pop_if_empty().extend([
                "repos",
                owner,
                repo,
                "issues",
                number.as_str(),
                "comments",
            ]);
        }

        let client = match Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("reputation-gate/", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to create GitHub client, skipping PR comment: {}", e);
                return None;
            }
        };

        debug!(
            "PR comment target {} (token {})",
            comments_url,
            mask_secret(&token)
        );

        Some(Self {
            client,
            comments_url,
            token,
        })
    }

    pub fn comments_url(&self) -> &Url {
        &self.comments_url
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        let response = self
            .client
            .post(self.comments_url.as_str())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&CommentRequest { body })
            .send()
            .await
            .map_err(|e| GateError::Annotation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GateError::Annotation(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        info!("Posted reputation report to {}", self.comments_url);
        Ok(())
    }
}

impl Annotator for GitHubAnnotator {
    fn annotate(&self, report: &GateReport) -> impl Future<Output = Result<()>> + Send {
        let body = report.to_markdown();
        async move { self.post_comment(&body).await }
    }
}
