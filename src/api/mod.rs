//! External collaborators of the gate
//!
//! - Rating service lookup client
//! - GitHub pull-request annotation

pub mod github;
pub mod http;

pub use github::{Annotator, GitHubAnnotator, GitHubContext};
pub use http::{HttpSecurityConfig, Lookup, ReputationClient, ReputationSource};
