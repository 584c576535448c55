//! Reputation Gate
//!
//! CI policy gate that fetches an agent or team reputation from the rating
//! service and fails the check when it is below a score or grade floor.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - CLI entrypoint
//! ├── cli.rs         - Command-line overrides
//! ├── config.rs      - Configuration from action inputs and environment
//! ├── error.rs       - Error taxonomy
//! ├── gate.rs        - Gate runner and exit status
//! ├── output.rs      - Step outputs and workflow commands
//! ├── report.rs      - PR comment report
//! ├── reputation/    - Evaluation core
//! │   ├── entity.rs  - Agent/team resolution and endpoints
//! │   ├── grade.rs   - Grade ordinal table
//! │   ├── record.rs  - Wire shapes and normalized record
//! │   └── policy.rs  - Policy, verdict and evaluator
//! └── api/           - External collaborators
//!     ├── http.rs    - Rating service client
//!     └── github.rs  - PR comment annotator
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod output;
pub mod report;
pub mod reputation;

// Re-export main types for convenience
pub use config::GateConfig;
pub use error::{GateError, Result};
pub use gate::{GateOutcome, GateRunner};
pub use report::GateReport;

pub use api::{
    Annotator, GitHubAnnotator, GitHubContext, HttpSecurityConfig, Lookup, ReputationClient,
    ReputationSource,
};

pub use reputation::{
    EntityKind, EntityRef, GradeMode, NormalizedFields, Policy, ReputationRecord, Verdict,
};
