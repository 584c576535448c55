//! Entity Resolution
//!
//! The caller names exactly one agent or one team. The chosen kind decides
//! which rating-service endpoint is queried and which response shape to
//! expect.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{GateError, Result};

/// Kind of rated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Agent,
    Team,
}

impl EntityKind {
    /// Lowercase name used for the `entity-type` output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Agent => "agent",
            EntityKind::Team => "team",
        }
    }

    /// Capitalized name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Agent => "Agent",
            EntityKind::Team => "Team",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single entity a gate run is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    /// Select the target entity from the caller's identifiers.
    ///
    /// Exactly one of `agent_id` / `team_id` must be non-empty. Whitespace
    /// around an identifier is ignored.
    pub fn resolve(agent_id: Option<&str>, team_id: Option<&str>) -> Result<Self> {
        let agent_id = agent_id.map(str::trim).filter(|id| !id.is_empty());
        let team_id = team_id.map(str::trim).filter(|id| !id.is_empty());

        match (agent_id, team_id) {
            (Some(agent), Some(team)) => Err(GateError::configuration(format!(
                "provide either agent-id or team-id, not both (agent-id={}, team-id={})",
                agent, team
            ))),
            (None, None) => Err(GateError::configuration(
                "either agent-id or team-id is required",
            )),
            (Some(agent), None) => Ok(Self {
                kind: EntityKind::Agent,
                id: agent.to_string(),
            }),
            (None, Some(team)) => Ok(Self {
                kind: EntityKind::Team,
                id: team.to_string(),
            }),
        }
    }

    /// Reputation lookup endpoint for this entity under `api_base`.
    ///
    /// Agents: `/v1/reputation/{id}`, teams: `/v1/teams/{id}/reputation`.
    pub fn lookup_url(&self, api_base: &Url) -> Result<Url> {
        match self.kind {
            EntityKind::Agent => join_segments(api_base, &["v1", "reputation", &self.id]),
            EntityKind::Team => join_segments(api_base, &["v1", "teams", &self.id, "reputation"]),
        }
    }

    /// Score/grade badge served by the rating service.
    pub fn badge_url(&self, api_base: &Url) -> Result<Url> {
        let mut url = match self.kind {
            EntityKind::Agent => {
                join_segments(api_base, &["v1", "reputation", &self.id, "badge.svg"])?
            }
            EntityKind::Team => join_segments(api_base, &["v1", "teams", &self.id, "badge.svg"])?,
        };
        url.set_query(Some("variant=score_grade"));
        Ok(url)
    }

    /// Public report page for this entity.
    pub fn report_url(&self, report_base: &Url) -> Result<Url> {
        match self.kind {
            EntityKind::Agent => join_segments(report_base, &["reputation", &self.id]),
            EntityKind::Team => join_segments(report_base, &["teams", &self.id]),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.id)
    }
}

/// Append path segments to `base`, percent-encoding each one.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            GateError::configuration(format!("API URL cannot be a base: {}", base))
        })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}
