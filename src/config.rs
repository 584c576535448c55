use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use url::Url;

use crate::api::github::{GitHubContext, pull_request_number};
use crate::api::http::HttpSecurityConfig;
use crate::reputation::{GradeMode, Policy};

pub const DEFAULT_API_URL: &str = "https://api.mnemom.ai";
pub const DEFAULT_REPORT_URL: &str = "https://www.mnemom.ai";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Configuration for a reputation gate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Action inputs
    pub inputs: InputConfig,
    /// Rating service configuration
    pub api: ApiConfig,
    /// GitHub workflow context
    pub github: GitHubConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Agent to check (exclusive with team_id)
    pub agent_id: Option<String>,
    /// Team to check (exclusive with agent_id)
    pub team_id: Option<String>,
    /// Minimum score, 0 disables the score check
    pub min_score: u32,
    /// Minimum grade, empty disables the grade check
    pub min_grade: Option<String>,
    /// Reject unrecognized minimum grades instead of ignoring them
    pub strict_grade: bool,
    /// Post the report as a PR comment
    pub comment: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Rating service base URL
    pub api_url: String,
    /// Public site hosting full reputation reports
    pub report_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Require HTTPS for the rating service
    pub require_https: bool,
    /// Maximum accepted response size in bytes
    pub max_response_size: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Token used for PR comments
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// `owner/repo`
    pub repository: Option<String>,
    /// Path to the workflow event payload
    pub event_path: Option<PathBuf>,
    /// GitHub REST API base URL
    pub api_url: String,
    /// Step output file
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            report_url: DEFAULT_REPORT_URL.to_string(),
            timeout_secs: 30,
            require_https: false,
            max_response_size: 1024 * 1024, // 1MB
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            inputs: InputConfig::default(),
            api: ApiConfig::default(),
            github: GitHubConfig {
                api_url: DEFAULT_GITHUB_API_URL.to_string(),
                ..GitHubConfig::default()
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl GateConfig {
    /// Load configuration from environment variables. Only parse errors are
    /// reported here; call [`GateConfig::validate`] once overrides are applied.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        // Action inputs
        config.inputs.agent_id = var("INPUT_AGENT-ID");
        config.inputs.team_id = var("INPUT_TEAM-ID");

        if let Some(min_score) = var("INPUT_MIN-SCORE") {
            config.inputs.min_score = min_score
                .trim()
                .parse()
                .with_context(|| format!("Invalid INPUT_MIN-SCORE value: {}", min_score))?;
        }

        config.inputs.min_grade = var("INPUT_MIN-GRADE").map(|g| g.trim().to_string());
        config.inputs.comment = var("INPUT_COMMENT").is_some_and(|v| v.trim() == "true");
        config.inputs.strict_grade = var("INPUT_STRICT-GRADE").is_some_and(|v| v.trim() == "true");

        if let Some(api_url) = var("INPUT_API-URL") {
            config.api.api_url = api_url.trim().to_string();
        }

        // Rating service configuration
        if let Some(report_url) = var("REPUTATION_GATE_REPORT_URL") {
            config.api.report_url = report_url;
        }

        if let Some(timeout) = var("REPUTATION_GATE_TIMEOUT_SECS") {
            config.api.timeout_secs = timeout
                .parse()
                .context("Invalid REPUTATION_GATE_TIMEOUT_SECS value")?;
        }

        if let Some(require_https) = var("REPUTATION_GATE_REQUIRE_HTTPS") {
            config.api.require_https = require_https
                .parse()
                .context("Invalid REPUTATION_GATE_REQUIRE_HTTPS value")?;
        }

        // GitHub workflow context
        config.github.token = var("GITHUB_TOKEN");
        config.github.repository = var("GITHUB_REPOSITORY");
        config.github.event_path = var("GITHUB_EVENT_PATH").map(PathBuf::from);
        config.github.output_path = var("GITHUB_OUTPUT").map(PathBuf::from);
        if let Some(api_url) = var("GITHUB_API_URL") {
            config.github.api_url = api_url;
        }

        // Logging configuration
        if let Some(level) = var("REPUTATION_GATE_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Validate URLs and limits
    pub fn validate(&self) -> Result<()> {
        let api_url = self.api_base()?;
        if api_url.host_str().is_none() {
            return Err(anyhow::anyhow!(
                "API URL must have a valid host: {}",
                self.api.api_url
            ));
        }

        if self.api.require_https && api_url.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "HTTPS is required but API URL is not HTTPS: {}",
                self.api.api_url
            ));
        }

        self.report_base()?;

        if self.api.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Request timeout must be non-zero"));
        }

        if self.api.max_response_size == 0 {
            return Err(anyhow::anyhow!("Maximum response size must be non-zero"));
        }

        Ok(())
    }

    pub fn api_base(&self) -> Result<Url> {
        Url::parse(&self.api.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api.api_url))
    }

    pub fn report_base(&self) -> Result<Url> {
        Url::parse(&self.api.report_url)
            .with_context(|| format!("Invalid report URL: {}", self.api.report_url))
    }

    /// Gate policy built from the inputs
    pub fn policy(&self) -> Policy {
        let grade_mode = if self.inputs.strict_grade {
            GradeMode::Strict
        } else {
            GradeMode::Lenient
        };
        Policy::new(self.inputs.min_score, self.inputs.min_grade.clone())
            .with_grade_mode(grade_mode)
    }

    pub fn http_config(&self) -> HttpSecurityConfig {
        HttpSecurityConfig {
            require_https: self.api.require_https,
            timeout_secs: self.api.timeout_secs,
            max_response_size: self.api.max_response_size,
        }
    }

    /// GitHub context for PR comments. An unreadable event payload disables
    /// commenting instead of failing the run.
    pub fn github_context(&self) -> GitHubContext {
        let pull_request = self.github.event_path.as_deref().and_then(|path| {
            pull_request_number(path)
                .map_err(|e| warn!("Failed to read event payload {}: {}", path.display(), e))
                .ok()
                .flatten()
        });

        let api_url = Url::parse(&self.github.api_url)
            .map_err(|e| warn!("Invalid GITHUB_API_URL {}: {}", self.github.api_url, e))
            .ok();

        if let Some(token) = &self.github.token {
            info!("GitHub token available ({})", mask_secret(token));
        }

        GitHubContext {
            api_url,
            repository: self.github.repository.clone(),
            token: self.github.token.clone(),
            pull_request,
        }
    }
}

/// Mask a secret for logging, keeping only a short prefix
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() > 12 {
        let prefix: String = secret.chars().take(4).collect();
        format!("{}***", prefix)
    } else {
        "***".to_string()
    }
}
