//! Gate Policy and Evaluation
//!
//! A policy has two independent floors: a numeric score and an ordinal
//! grade. Both checks always run so a single evaluation reports every
//! failed dimension, score first.

use serde::{Deserialize, Serialize};

use super::entity::EntityRef;
use super::grade;
use super::record::{ReputationRecord, format_score};
use crate::error::{GateError, Result};

/// How an unrecognized `min_grade` is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeMode {
    /// Unrecognized minimum grades silently disable the grade check.
    #[default]
    Lenient,
    /// Unrecognized minimum grades are rejected by [`Policy::validate`].
    Strict,
}

/// Thresholds a reputation record must meet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Score floor; 0 disables the score check
    pub min_score: u32,
    /// Grade floor; empty or absent disables the grade check
    pub min_grade: Option<String>,
    pub grade_mode: GradeMode,
}

impl Policy {
    pub fn new(min_score: u32, min_grade: Option<String>) -> Self {
        Self {
            min_score,
            min_grade: min_grade.filter(|g| !g.is_empty()),
            grade_mode: GradeMode::Lenient,
        }
    }

    pub fn with_grade_mode(mut self, grade_mode: GradeMode) -> Self {
        self.grade_mode = grade_mode;
        self
    }

    /// Grade floor that actually applies, if any.
    ///
    /// An unrecognized grade yields `None`: the check is skipped rather than
    /// failing every record.
    pub fn effective_min_grade(&self) -> Option<(&str, u8)> {
        let min_grade = self.min_grade.as_deref().filter(|g| !g.is_empty())?;
        grade::ordinal(min_grade).map(|required| (min_grade, required))
    }

    /// Reject an unrecognized minimum grade in strict mode.
    pub fn validate(&self) -> Result<()> {
        if self.grade_mode == GradeMode::Strict
            && let Some(min_grade) = self.min_grade.as_deref().filter(|g| !g.is_empty())
            && !grade::is_recognized(min_grade)
        {
            return Err(GateError::configuration(format!(
                "unrecognized min-grade '{}' (expected one of AAA, AA, A, BBB, BB, B, CCC, NR)",
                min_grade
            )));
        }
        Ok(())
    }

    /// Evaluate a record against this policy.
    pub fn evaluate(&self, record: &ReputationRecord) -> Verdict {
        let mut passed = true;
        let mut reasons = Vec::new();

        if self.min_score > 0 && record.score < f64::from(self.min_score) {
            passed = false;
            reasons.push(format!(
                "Score {} is below minimum {}",
                format_score(record.score),
                self.min_score
            ));
        }

        if let Some((min_grade, required)) = self.effective_min_grade() {
            let actual = grade::rank(&record.grade);
            if actual < required {
                passed = false;
                reasons.push(format!(
                    "Grade {} is below minimum {}",
                    record.grade, min_grade
                ));
            }
        }

        Verdict {
            passed,
            reasons,
            normalized: NormalizedFields::from(record),
        }
    }
}

/// Record fields carried through to outputs and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFields {
    pub score: f64,
    pub grade: String,
    pub tier: Option<String>,
}

impl From<&ReputationRecord> for NormalizedFields {
    fn from(record: &ReputationRecord) -> Self {
        Self {
            score: record.score,
            grade: record.grade.clone(),
            tier: record.tier.clone(),
        }
    }
}

/// Result of one gate evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    /// One entry per failed dimension, in check order
    pub reasons: Vec<String>,
    pub normalized: NormalizedFields,
}

impl Verdict {
    /// Failing verdict for an entity the rating service does not know.
    pub fn not_found(entity: &EntityRef) -> Self {
        let sentinel = ReputationRecord::sentinel(entity);
        Self {
            passed: false,
            reasons: vec![format!("{} has no reputation score", entity)],
            normalized: NormalizedFields::from(&sentinel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reputation::EntityKind;

    fn record(score: f64, grade: &str) -> ReputationRecord {
        ReputationRecord {
            entity_id: "agent-1".to_string(),
            entity_kind: EntityKind::Agent,
            score,
            grade: grade.to_string(),
            tier: Some("Verified".to_string()),
        }
    }

    #[test]
    fn test_score_below_minimum() {
        let policy = Policy::new(80, Some(String::new()));
        let verdict = policy.evaluate(&record(72.0, "BBB"));
        assert!(!verdict.passed);
        assert_eq!(verdict.reasons, vec!["Score 72 is below minimum 80"]);
    }

    #[test]
    fn test_grade_below_minimum() {
        let policy = Policy::new(0, Some("A".to_string()));
        let verdict = policy.evaluate(&record(90.0, "B"));
        assert!(!verdict.passed);
        assert_eq!(verdict.reasons, vec!["Grade B is below minimum A"]);
    }

    #[test]
    fn test_both_floors_met() {
        let policy = Policy::new(50, Some("AA".to_string()));
        let verdict = policy.evaluate(&record(95.0, "AAA"));
        assert!(verdict.passed);
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.normalized.grade, "AAA");
        assert_eq!(verdict.normalized.tier.as_deref(), Some("Verified"));
    }

    #[test]
    fn test_score_reason_precedes_grade_reason() {
        let policy = Policy::new(80, Some("AA".to_string()));
        let verdict = policy.evaluate(&record(40.0, "CCC"));
        assert!(!verdict.passed);
        assert_eq!(
            verdict.reasons,
            vec![
                "Score 40 is below minimum 80",
                "Grade CCC is below minimum AA"
            ]
        );
    }

    #[test]
    fn test_zero_min_score_never_fails() {
        let policy = Policy::default();
        for (score, grade) in [(0.0, "NR"), (0.0, "ZZZ"), (12.5, "CCC"), (100.0, "AAA")] {
            let verdict = policy.evaluate(&record(score, grade));
            assert!(verdict.passed);
            assert!(verdict.reasons.is_empty());
        }
    }

    #[test]
    fn test_equal_values_pass() {
        let policy = Policy::new(80, Some("BBB".to_string()));
        assert!(policy.evaluate(&record(80.0, "BBB")).passed);
    }

    #[test]
    fn test_unrecognized_min_grade_disables_check() {
        let policy = Policy::new(10, Some("ZZZ".to_string()));
        for grade in ["NR", "CCC", "AAA", "unknown"] {
            let verdict = policy.evaluate(&record(50.0, grade));
            assert!(verdict.passed, "grade {} should pass", grade);
        }
        // Still lenient for validation unless strict
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_strict_mode_rejects_unrecognized_min_grade() {
        let policy = Policy::new(0, Some("ZZZ".to_string())).with_grade_mode(GradeMode::Strict);
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("ZZZ"));

        let ok = Policy::new(0, Some("BB".to_string())).with_grade_mode(GradeMode::Strict);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_unknown_record_grade_fails_any_floor() {
        let policy = Policy::new(0, Some("CCC".to_string()));
        let verdict = policy.evaluate(&record(99.0, "Z+"));
        assert!(!verdict.passed);
        assert_eq!(verdict.reasons, vec!["Grade Z+ is below minimum CCC"]);
    }

    #[test]
    fn test_min_grade_nr_never_fails() {
        let policy = Policy::new(0, Some("NR".to_string()));
        assert!(policy.evaluate(&record(1.0, "unknown")).passed);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let policy = Policy::new(75, Some("A".to_string()));
        let rec = record(61.25, "BB");
        let first = serde_json::to_string(&policy.evaluate(&rec)).unwrap();
        let second = serde_json::to_string(&policy.evaluate(&rec)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_not_found_verdict() {
        let entity = EntityRef::resolve(Some("x42"), None).unwrap();
        let verdict = Verdict::not_found(&entity);
        assert!(!verdict.passed);
        assert_eq!(verdict.reasons, vec!["Agent x42 has no reputation score"]);
        assert_eq!(verdict.normalized.score, 0.0);
        assert_eq!(verdict.normalized.grade, "NR");
        assert_eq!(verdict.normalized.tier, None);
    }
}
