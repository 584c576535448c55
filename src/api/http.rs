use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GateError, Result};
use crate::reputation::{AgentReputation, EntityKind, EntityRef, ReputationRecord, TeamReputation};

/// HTTP settings for the rating-service client
#[derive(Debug, Clone)]
pub struct HttpSecurityConfig {
    /// Require HTTPS for the rating service
    pub require_https: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum response size in bytes
    pub max_response_size: usize,
}

impl Default for HttpSecurityConfig {
    fn default() -> Self {
        Self {
            require_https: false,
            timeout_secs: 30,
            max_response_size: 1024 * 1024, // 1MB max
        }
    }
}

/// Outcome of a reputation lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(ReputationRecord),
    /// The service has no record for the entity (HTTP 404)
    NotFound,
}

/// Source of reputation records
pub trait ReputationSource {
    fn lookup(&self, entity: &EntityRef) -> impl Future<Output = Result<Lookup>> + Send;
}

/// Client for the external rating service
#[derive(Clone)]
pub struct ReputationClient {
    client: Client,
    api_base: Url,
    config: HttpSecurityConfig,
}

impl ReputationClient {
    /// Create a client for the service rooted at `api_base`
    pub fn new(api_base: Url, config: HttpSecurityConfig) -> Result<Self> {
        if config.require_https && api_base.scheme() != "https" {
            return Err(GateError::configuration(format!(
                "HTTPS is required but API URL uses {}: {}",
                api_base.scheme(),
                api_base
            )));
        }

        let mut client_builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("reputation-gate/", env!("CARGO_PKG_VERSION")));

        if config.require_https {
            client_builder = client_builder.https_only(true);
            info!("HTTPS enforcement enabled for rating service requests");
        }

        let client = client_builder.build().map_err(|e| {
            GateError::configuration(format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            api_base,
            config,
        })
    }

    /// Fetch and normalize the reputation of `entity`
    pub async fn fetch(&self, entity: &EntityRef) -> Result<Lookup> {
        let url = entity.lookup_url(&self.api_base)?;
        info!(
            entity_type = %entity.kind,
            entity_id = %entity.id,
            "Checking reputation for {}",
            entity
        );
        debug!("Fetching reputation from {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| GateError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(entity_id = %entity.id, "No reputation record for {}", entity);
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(GateError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content_length = response.content_length().unwrap_or(0);
        if content_length > self.config.max_response_size as u64 {
            return Err(GateError::Decode {
                url: url.to_string(),
                message: format!(
                    "response too large: {} bytes (max: {})",
                    content_length, self.config.max_response_size
                ),
            });
        }

        let body = response.bytes().await.map_err(|e| GateError::Decode {
            url: url.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

        if body.len() > self.config.max_response_size {
            return Err(GateError::Decode {
                url: url.to_string(),
                message: format!(
                    "response body too large: {} bytes (max: {})",
                    body.len(),
                    self.config.max_response_size
                ),
            });
        }

        let record = decode_record(entity, &body).map_err(|e| GateError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!(
            score = record.score,
            grade = %record.grade,
            "Received reputation record"
        );
        Ok(Lookup::Found(record))
    }
}

impl ReputationSource for ReputationClient {
    fn lookup(&self, entity: &EntityRef) -> impl Future<Output = Result<Lookup>> + Send {
        self.fetch(entity)
    }
}

/// Decode a response body using the shape that matches the entity kind
pub fn decode_record(entity: &EntityRef, body: &[u8]) -> serde_json::Result<ReputationRecord> {
    match entity.kind {
        EntityKind::Agent => serde_json::from_slice::<AgentReputation>(body)
            .map(|agent| agent.into_record(entity)),
        EntityKind::Team => serde_json::from_slice::<TeamReputation>(body)
            .map(|team| team.into_record(entity)),
    }
}
