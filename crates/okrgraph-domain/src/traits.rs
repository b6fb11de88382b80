//! Trait definitions for external interactions
//!
//! These traits define the boundary between the relationship engine and the
//! relational store. Infrastructure implementations live in other crates.

use crate::{
    KeyResult, KeyResultId, KeyResultRelation, KeyResultRelationKey, LifecycleScope,
    NewKeyResult, NewKeyResultRelation, NewObjective, NewObjectiveRelation, Objective,
    ObjectiveId, ObjectiveRelation, ObjectiveRelationKey, ObjectiveStatus, OwnerId, RelationId,
};

/// Coarse classification of a store failure
///
/// The engine only needs to tell these apart: a missing row, a uniqueness
/// violation (lost insert race), and everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Referenced row does not exist
    NotFound,

    /// A unique constraint rejected the write
    ConstraintViolation,

    /// Any other failure
    Other,
}

/// Implemented by store error types so callers can react to the failure kind
pub trait ClassifyStoreError {
    /// Classify this error
    fn kind(&self) -> StoreErrorKind;
}

/// Mutable fields of a relation, applied in place by an upsert
#[derive(Debug, Clone, PartialEq)]
pub struct RelationUpdate {
    /// New weight (objective relations) or contribution weight (key-result relations)
    pub weight: f64,

    /// New impact percentage; ignored for objective relations
    pub impact_percent: Option<f64>,

    /// New description (replaces the old one, `None` clears it)
    pub description: Option<String>,
}

/// Objectives and active objective relations read together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// All objectives in creation order
    pub objectives: Vec<Objective>,

    /// Active objective relations in id order
    pub relations: Vec<ObjectiveRelation>,
}

/// Trait for storing and retrieving objectives, key results and relations
///
/// Implemented by the infrastructure layer (okrgraph-store). Reads of relation
/// tables always state their lifecycle scope; `find_*` lookups only ever see
/// active rows because the natural-key rule only covers active rows.
pub trait RelationStore {
    /// Error type for store operations
    type Error: std::fmt::Display + ClassifyStoreError;

    /// Store a new objective
    fn insert_objective(&mut self, objective: NewObjective) -> Result<Objective, Self::Error>;

    /// Get an objective by ID
    fn get_objective(&self, id: ObjectiveId) -> Result<Option<Objective>, Self::Error>;

    /// All objectives in creation order
    fn list_objectives(&self) -> Result<Vec<Objective>, Self::Error>;

    /// Change the status of an objective
    fn update_objective_status(
        &mut self,
        id: ObjectiveId,
        status: ObjectiveStatus,
    ) -> Result<(), Self::Error>;

    /// Reassign the owner of an objective
    fn update_objective_owner(&mut self, id: ObjectiveId, owner: OwnerId)
        -> Result<(), Self::Error>;

    /// Remove an objective and the key results it owns
    fn delete_objective(&mut self, id: ObjectiveId) -> Result<(), Self::Error>;

    /// Store a new key result
    fn insert_key_result(&mut self, key_result: NewKeyResult) -> Result<KeyResult, Self::Error>;

    /// Get a key result by ID
    fn get_key_result(&self, id: KeyResultId) -> Result<Option<KeyResult>, Self::Error>;

    /// All key results in creation order
    fn list_key_results(&self) -> Result<Vec<KeyResult>, Self::Error>;

    /// Objective relations visible under `scope`, in id order
    fn list_objective_relations(
        &self,
        scope: LifecycleScope,
    ) -> Result<Vec<ObjectiveRelation>, Self::Error>;

    /// Key-result relations visible under `scope`, in id order
    fn list_key_result_relations(
        &self,
        scope: LifecycleScope,
    ) -> Result<Vec<KeyResultRelation>, Self::Error>;

    /// Active objective relation with the given natural key
    fn find_objective_relation(
        &self,
        key: &ObjectiveRelationKey,
    ) -> Result<Option<ObjectiveRelation>, Self::Error>;

    /// Active key-result relation with the given natural key
    fn find_key_result_relation(
        &self,
        key: &KeyResultRelationKey,
    ) -> Result<Option<KeyResultRelation>, Self::Error>;

    /// Insert an active objective relation
    ///
    /// Must fail with a `ConstraintViolation` error when an active relation
    /// with the same natural key already exists.
    fn insert_objective_relation(
        &mut self,
        relation: &NewObjectiveRelation,
    ) -> Result<ObjectiveRelation, Self::Error>;

    /// Insert an active key-result relation
    ///
    /// Must fail with a `ConstraintViolation` error when an active relation
    /// with the same natural key already exists.
    fn insert_key_result_relation(
        &mut self,
        relation: &NewKeyResultRelation,
    ) -> Result<KeyResultRelation, Self::Error>;

    /// Update the mutable fields of an active objective relation
    fn update_objective_relation(
        &mut self,
        id: RelationId,
        update: &RelationUpdate,
    ) -> Result<ObjectiveRelation, Self::Error>;

    /// Update the mutable fields of an active key-result relation
    fn update_key_result_relation(
        &mut self,
        id: RelationId,
        update: &RelationUpdate,
    ) -> Result<KeyResultRelation, Self::Error>;

    /// Move an objective relation to the retired state
    fn retire_objective_relation(&mut self, id: RelationId) -> Result<(), Self::Error>;

    /// Move a key-result relation to the retired state
    fn retire_key_result_relation(&mut self, id: RelationId) -> Result<(), Self::Error>;

    /// Read objectives and active objective relations consistently
    fn snapshot(&self) -> Result<Snapshot, Self::Error>;
}
