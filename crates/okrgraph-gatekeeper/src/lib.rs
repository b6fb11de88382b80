//! okrgraph Gatekeeper
//!
//! Validates relation writes before they reach the store.
//!
//! The Gatekeeper checks:
//! - The relation type belongs to the taxonomy
//! - An objective is never related to itself
//! - Weights lie in [0, 1] and impact percentages in [0, 100]
//! - Descriptions stay within the configured length
//!
//! Validation is pure: no store access, no side effects. A successful check
//! returns a `Valid*` wrapper, the only input the engine's deduplicator
//! accepts.
//!
//! # Examples
//!
//! ```
//! use okrgraph_domain::{ObjectiveId, ObjectiveRelationDraft};
//! use okrgraph_gatekeeper::{Gatekeeper, ValidationError};
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let draft = ObjectiveRelationDraft {
//!     origin: ObjectiveId::new(1),
//!     destination: ObjectiveId::new(1),
//!     relation_type: "contribuye_a".to_string(),
//!     weight: 0.5,
//!     description: None,
//! };
//!
//! assert!(matches!(
//!     gatekeeper.validate_objective_relation(&draft),
//!     Err(ValidationError::SelfRelation(_))
//! ));
//! ```

#![warn(missing_docs)]

mod validator;
mod error;
mod config;

pub use validator::{Gatekeeper, ValidKeyResultRelation, ValidObjectiveRelation};
pub use error::ValidationError;
pub use config::ValidationConfig;
