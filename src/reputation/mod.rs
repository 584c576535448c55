//! Reputation Gate Core
//!
//! Normalizes agent and team reputation into one record shape and gates it
//! against a score floor and a grade floor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ EntityRef       │────►│ ReputationRecord │────►│ Policy          │
//! │ (agent | team)  │     │ (normalized)     │     │ (score, grade)  │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                                                          │
//!                                                          ▼
//!                                                  ┌─────────────────┐
//!                                                  │ Verdict         │
//!                                                  │ (pass, reasons) │
//!                                                  └─────────────────┘
//! ```
//!
//! ## Grade Model
//!
//! - Grades rank `AAA`(7) > `AA` > `A` > `BBB` > `BB` > `B` > `CCC` > `NR`(0)
//! - Record grades outside the table rank as `NR`
//! - A minimum grade outside the table disables the grade check

mod entity;
pub mod grade;
mod policy;
mod record;

pub use entity::{EntityKind, EntityRef};
pub use grade::{GRADE_ORDINALS, NOT_RATED};
pub use policy::{GradeMode, NormalizedFields, Policy, Verdict};
pub use record::{AgentReputation, ReputationRecord, TeamReputation, format_score};
