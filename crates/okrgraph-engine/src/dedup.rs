//! Relation deduplication
//!
//! A relation write is an upsert on the natural key. The store guarantees at
//! most one active row per key with a unique index; when an insert loses a race
//! against a concurrent writer the index rejects it and the lookup is re-run so
//! the winner's row is updated instead.

use crate::EngineError;
use okrgraph_domain::{
    ClassifyStoreError, KeyResultRelation, ObjectiveRelation, RelationStore, RelationUpdate,
    StoreErrorKind,
};
use okrgraph_gatekeeper::{ValidKeyResultRelation, ValidObjectiveRelation};
use std::fmt;

/// Whether an upsert created a row or changed an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No active relation had the key; a new row was written
    Inserted,

    /// The active relation with the key was updated in place
    Updated,
}

impl UpsertOutcome {
    /// Lowercase name for logs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Updated => "updated",
        }
    }
}

/// Relation written by an upsert
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<R> {
    /// The stored relation after the write
    pub relation: R,

    /// What the write did
    pub outcome: UpsertOutcome,

    /// Lookups re-run after losing a race
    pub retries: u32,
}

/// Resolves relation writes against existing active relations
#[derive(Debug, Clone)]
pub struct Deduplicator {
    retries: u32,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Result of one lookup-then-write attempt
enum Attempt<R> {
    Done(Upserted<R>),
    /// Lost a race; the key changed between lookup and write
    Raced(String),
}

impl Deduplicator {
    /// Create a deduplicator that re-runs a raced lookup up to `retries` times
    pub fn new(retries: u32) -> Self {
        Self { retries }
    }

    /// Insert or update an objective relation keyed by (origin, destination, type)
    pub fn upsert_objective_relation<S: RelationStore>(
        &self,
        store: &mut S,
        relation: ValidObjectiveRelation,
    ) -> Result<Upserted<ObjectiveRelation>, EngineError> {
        let relation = relation.into_inner();
        let key = relation.key();
        let update = RelationUpdate {
            weight: relation.weight,
            impact_percent: None,
            description: relation.description.clone(),
        };

        self.run(store, &key, |store: &mut S| {
            let existing = store
                .find_objective_relation(&key)
                .map_err(EngineError::from_store)?;
            match existing {
                Some(existing) => settle(
                    store.update_objective_relation(existing.id, &update),
                    UpsertOutcome::Updated,
                ),
                None => settle(
                    store.insert_objective_relation(&relation),
                    UpsertOutcome::Inserted,
                ),
            }
        })
    }

    /// Insert or update a key-result relation keyed by (objective, key result, type)
    pub fn upsert_key_result_relation<S: RelationStore>(
        &self,
        store: &mut S,
        relation: ValidKeyResultRelation,
    ) -> Result<Upserted<KeyResultRelation>, EngineError> {
        let relation = relation.into_inner();
        let key = relation.key();
        let update = RelationUpdate {
            weight: relation.contribution_weight,
            impact_percent: Some(relation.impact_percent),
            description: relation.description.clone(),
        };

        self.run(store, &key, |store: &mut S| {
            let existing = store
                .find_key_result_relation(&key)
                .map_err(EngineError::from_store)?;
            match existing {
                Some(existing) => settle(
                    store.update_key_result_relation(existing.id, &update),
                    UpsertOutcome::Updated,
                ),
                None => settle(
                    store.insert_key_result_relation(&relation),
                    UpsertOutcome::Inserted,
                ),
            }
        })
    }

    /// Drive `attempt` until it settles or the retry budget is spent
    fn run<S, K, R, F>(
        &self,
        store: &mut S,
        key: &K,
        mut attempt: F,
    ) -> Result<Upserted<R>, EngineError>
    where
        K: fmt::Display,
        F: FnMut(&mut S) -> Result<Attempt<R>, EngineError>,
    {
        let mut retries = 0;
        loop {
            match attempt(store)? {
                Attempt::Done(mut upserted) => {
                    upserted.retries = retries;
                    tracing::debug!(
                        %key,
                        outcome = upserted.outcome.as_str(),
                        retries,
                        "relation upserted"
                    );
                    return Ok(upserted);
                }
                Attempt::Raced(reason) if retries < self.retries => {
                    retries += 1;
                    tracing::warn!(%key, retry = retries, %reason, "upsert raced, retrying lookup");
                }
                Attempt::Raced(reason) => {
                    tracing::warn!(%key, retries, %reason, "upsert gave up");
                    return Err(EngineError::Conflict(format!(
                        "relation {} kept changing after {} retries: {}",
                        key, retries, reason
                    )));
                }
            }
        }
    }
}

/// Classify the result of a write
///
/// A uniqueness violation on insert, or a row that vanished before an update,
/// both mean a concurrent writer got there first.
fn settle<R, E>(result: Result<R, E>, outcome: UpsertOutcome) -> Result<Attempt<R>, EngineError>
where
    E: fmt::Display + ClassifyStoreError,
{
    match result {
        Ok(relation) => Ok(Attempt::Done(Upserted {
            relation,
            outcome,
            retries: 0,
        })),
        Err(e) => match (e.kind(), outcome) {
            (StoreErrorKind::ConstraintViolation, UpsertOutcome::Inserted)
            | (StoreErrorKind::NotFound, UpsertOutcome::Updated) => {
                Ok(Attempt::Raced(e.to_string()))
            }
            _ => Err(EngineError::from_store(e)),
        },
    }
}
