//! Reputation Records
//!
//! The rating service answers with one JSON shape for agents and another
//! for teams. Both are normalized into a [`ReputationRecord`] so the gate
//! evaluates them with the same logic.
//!
//! Only `score` is required on the wire. The entity id comes from the
//! lookup, and a missing or null grade normalizes to `NR`.

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, EntityRef};
use super::grade::NOT_RATED;

/// Agent reputation as returned by `/v1/reputation/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReputation {
    #[serde(default)]
    pub agent_id: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub is_eligible: Option<bool>,
    /// Passed through untouched; the gate does not interpret it
    #[serde(default)]
    pub computed_at: Option<String>,
}

/// Team reputation as returned by `/v1/teams/{id}/reputation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamReputation {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub is_eligible: Option<bool>,
    #[serde(default)]
    pub computed_at: Option<String>,
}

/// Normalized reputation of one agent or team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationRecord {
    pub entity_id: String,
    pub entity_kind: EntityKind,
    pub score: f64,
    pub grade: String,
    /// Only agents carry a tier
    pub tier: Option<String>,
}

impl ReputationRecord {
    /// Zero-trust record used when the service has no data for the entity.
    pub fn sentinel(entity: &EntityRef) -> Self {
        Self {
            entity_id: entity.id.clone(),
            entity_kind: entity.kind,
            score: 0.0,
            grade: NOT_RATED.to_string(),
            tier: None,
        }
    }
}

impl AgentReputation {
    /// Normalize into a record for the agent that was looked up.
    pub fn into_record(self, entity: &EntityRef) -> ReputationRecord {
        ReputationRecord {
            entity_id: entity.id.clone(),
            entity_kind: EntityKind::Agent,
            score: self.score,
            grade: normalize_grade(self.grade),
            tier: self.tier.filter(|tier| !tier.is_empty()),
        }
    }
}

impl TeamReputation {
    /// Normalize into a record for the team that was looked up.
    pub fn into_record(self, entity: &EntityRef) -> ReputationRecord {
        ReputationRecord {
            entity_id: entity.id.clone(),
            entity_kind: EntityKind::Team,
            score: self.score,
            grade: normalize_grade(self.grade),
            tier: None,
        }
    }
}

fn normalize_grade(grade: Option<String>) -> String {
    grade
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| NOT_RATED.to_string())
}

/// Render a score the way the rating service shows it: integral scores
/// without a fractional part.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        score.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> EntityRef {
        EntityRef::resolve(Some("x42"), None).unwrap()
    }

    #[test]
    fn test_agent_shape_normalizes_with_tier() {
        let json = r#"{
            "agent_id": "x42",
            "score": 72,
            "grade": "BBB",
            "tier": "Established",
            "is_eligible": true,
            "computed_at": "2026-01-15T10:00:00Z"
        }"#;
        let reputation: AgentReputation = serde_json::from_str(json).unwrap();
        let record = reputation.into_record(&agent());

        assert_eq!(record.entity_kind, EntityKind::Agent);
        assert_eq!(record.entity_id, "x42");
        assert_eq!(record.score, 72.0);
        assert_eq!(record.tier.as_deref(), Some("Established"));
    }

    #[test]
    fn test_team_shape_normalizes_without_tier() {
        let json = r#"{
            "team_id": "core",
            "team_name": "Core Agents",
            "score": 88.5,
            "grade": "AA",
            "confidence": 0.92,
            "is_eligible": true,
            "computed_at": "2026-01-15T10:00:00Z"
        }"#;
        let team = EntityRef::resolve(None, Some("core")).unwrap();
        let reputation: TeamReputation = serde_json::from_str(json).unwrap();
        let record = reputation.into_record(&team);

        assert_eq!(record.entity_kind, EntityKind::Team);
        assert_eq!(record.grade, "AA");
        assert_eq!(record.tier, None);
    }

    #[test]
    fn test_missing_or_null_grade_is_not_rated() {
        let missing: AgentReputation =
            serde_json::from_str(r#"{"agent_id":"x42","score":90,"tier":"Emerging"}"#).unwrap();
        assert_eq!(missing.into_record(&agent()).grade, "NR");

        let null: AgentReputation =
            serde_json::from_str(r#"{"agent_id":"x42","score":90,"grade":null}"#).unwrap();
        assert_eq!(null.into_record(&agent()).grade, "NR");
    }

    #[test]
    fn test_id_and_timestamp_are_not_required() {
        let reputation: AgentReputation = serde_json::from_str(
            r#"{"score":55,"grade":"BB","computed_at":"2026-01-15 10:00:00"}"#,
        )
        .unwrap();
        let record = reputation.into_record(&agent());
        assert_eq!(record.entity_id, "x42");
        assert_eq!(record.grade, "BB");

        let team: TeamReputation = serde_json::from_str(r#"{"score":10}"#).unwrap();
        let record = team.into_record(&EntityRef::resolve(None, Some("core")).unwrap());
        assert_eq!(record.entity_id, "core");
        assert_eq!(record.grade, "NR");
    }

    #[test]
    fn test_sentinel_record() {
        let record = ReputationRecord::sentinel(&agent());
        assert_eq!(record.score, 0.0);
        assert_eq!(record.grade, "NR");
        assert_eq!(record.tier, None);
        assert_eq!(record.entity_kind, EntityKind::Agent);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(72.0), "72");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(88.5), "88.5");
    }
}
