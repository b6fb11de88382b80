//! okrgraph Domain Layer
//!
//! This crate contains the model of the Objective/Key-Result relationship
//! engine. It carries no infrastructure dependencies (serde is an opt-in
//! feature) and defines the value objects, the relation type taxonomy and the
//! trait interface that storage adapters implement.
//!
//! ## Key Concepts
//!
//! - **Objective**: top-level goal at Company, Department or Team level
//! - **Key Result**: quantitative measure owned by exactly one objective
//! - **Relation**: typed, weighted, directed link between two objectives or
//!   between an objective and a key result
//! - **Relation Type**: closed taxonomy; hierarchical types drive the
//!   parent/child forest, informational types are only displayed
//! - **Relation State**: Active or Retired (soft delete)
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ids;
pub mod objective;
pub mod relation;
pub mod style;
pub mod traits;

// Re-exports for convenience
pub use ids::{KeyResultId, ObjectiveId, OwnerId, RelationId};
pub use objective::{KeyResult, Level, NewKeyResult, NewObjective, Objective, ObjectiveStatus};
pub use relation::{
    KeyResultRelation, KeyResultRelationDraft, KeyResultRelationKey, LifecycleScope,
    NewKeyResultRelation, NewObjectiveRelation, ObjectiveRelation, ObjectiveRelationDraft,
    ObjectiveRelationKey, RelationState, RelationType,
};
pub use style::{style_for, style_for_name, EdgeStyle, LineStyle};
pub use traits::{ClassifyStoreError, RelationStore, RelationUpdate, Snapshot, StoreErrorKind};
