//! Gatekeeper error types

use okrgraph_domain::ObjectiveId;
use thiserror::Error;

/// Reasons a relation write is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Origin and destination are the same objective
    #[error("Objective {0} cannot be related to itself")]
    SelfRelation(ObjectiveId),

    /// A numeric field is outside its domain (NaN and infinities included)
    #[error("{field} {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Rejected value
        value: f64,
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },

    /// Relation type name is not part of the taxonomy
    #[error("Unknown relation type: '{0}'")]
    UnknownRelationType(String),

    /// Description exceeds the configured maximum length
    #[error("Description is {len} characters long (max: {max})")]
    DescriptionTooLong {
        /// Length of the rejected description, in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },
}
