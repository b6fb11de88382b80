//! Error types for engine operations

use crate::hierarchy::Forest;
use okrgraph_domain::traits::{ClassifyStoreError, StoreErrorKind};
use okrgraph_domain::ObjectiveId;
use okrgraph_gatekeeper::ValidationError;
use std::fmt;
use thiserror::Error;

/// Bound that stopped a hierarchy traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalLimit {
    /// Maximum nesting depth
    Depth(usize),
    /// Maximum number of emitted nodes
    Nodes(usize),
}

impl fmt::Display for TraversalLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalLimit::Depth(max) => write!(f, "depth limit of {}", max),
            TraversalLimit::Nodes(max) => write!(f, "node limit of {}", max),
        }
    }
}

fn display_path(ids: &[ObjectiveId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Failures of a hierarchy build
///
/// Both variants carry the partial forest: everything reachable from the
/// roots before the traversal stopped, with cyclic back edges left out.
#[derive(Error, Debug, Clone)]
pub enum HierarchyError {
    /// The accepted hierarchical edges contain a cycle
    #[error("Cycle detected: {}", display_path(.cycle))]
    CycleDetected {
        /// Objectives on the cycle, parent to child, first id repeated at the end
        cycle: Vec<ObjectiveId>,
        /// Forest built without the cyclic edges
        partial: Box<Forest>,
    },

    /// The traversal hit a configured bound
    #[error("Hierarchy exceeds the {limit}")]
    LimitExceeded {
        /// Bound that was hit
        limit: TraversalLimit,
        /// Forest built up to the bound
        partial: Box<Forest>,
    },
}

impl HierarchyError {
    /// Borrow the partial forest
    pub fn partial(&self) -> &Forest {
        match self {
            HierarchyError::CycleDetected { partial, .. }
            | HierarchyError::LimitExceeded { partial, .. } => partial,
        }
    }

    /// Take the partial forest
    pub fn into_partial(self) -> Forest {
        match self {
            HierarchyError::CycleDetected { partial, .. }
            | HierarchyError::LimitExceeded { partial, .. } => *partial,
        }
    }
}

/// Errors that can occur during engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Relation rejected before any store access
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced objective, key result or relation does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Natural key stayed contended after the retry budget was spent
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Objective still referenced by active relations (restrict-delete)
    #[error("Objective {objective} is referenced by {relations} active relation(s)")]
    InUse {
        /// Objective that was to be deleted
        objective: ObjectiveId,
        /// Number of active relations referencing it
        relations: usize,
    },

    /// Hierarchy could not be built completely
    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// Caller input that is not a relation (objective, key result fields)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Map a store failure, keeping missing rows distinguishable
    pub fn from_store<E: fmt::Display + ClassifyStoreError>(e: E) -> Self {
        match e.kind() {
            StoreErrorKind::NotFound => EngineError::NotFound(e.to_string()),
            StoreErrorKind::ConstraintViolation | StoreErrorKind::Other => {
                EngineError::Store(e.to_string())
            }
        }
    }
}
