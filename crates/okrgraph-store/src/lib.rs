//! okrgraph Storage Layer
//!
//! Implements the `RelationStore` trait on SQLite.
//!
//! # Architecture
//!
//! - One table per record kind (objectives, key results, objective relations,
//!   key-result relations)
//! - Relation lifecycle is an explicit `state` column (`active` / `retired`)
//! - Partial unique indexes over the natural keys of *active* relations make
//!   a duplicate insert fail with [`StoreError::ConstraintViolation`], which
//!   is what lets the engine's upsert stay atomic under concurrent writers
//!
//! # Examples
//!
//! ```no_run
//! use okrgraph_store::SqliteStore;
//!
//! let store = SqliteStore::new("okr.db").unwrap();
//! // Store is now ready for relation operations
//! ```

#![warn(missing_docs)]

mod rows;

use okrgraph_domain::traits::{
    ClassifyStoreError, RelationStore, RelationUpdate, Snapshot, StoreErrorKind,
};
use okrgraph_domain::{
    KeyResult, KeyResultId, KeyResultRelation, KeyResultRelationKey, LifecycleScope,
    NewKeyResult, NewKeyResultRelation, NewObjective, NewObjectiveRelation, Objective,
    ObjectiveId, ObjectiveRelation, ObjectiveRelationKey, ObjectiveStatus, OwnerId, RelationId,
};
use rows::{
    key_result_from_row, key_result_relation_from_row, objective_from_row,
    objective_relation_from_row, KEY_RESULT_COLUMNS, KEY_RESULT_RELATION_COLUMNS,
    OBJECTIVE_COLUMNS, OBJECTIVE_RELATION_COLUMNS,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// How long a writer waits for a competing writer's lock before failing
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        let unique_violation = matches!(
            &e,
            rusqlite::Error::SqliteFailure(err, _)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        );

        if unique_violation {
            StoreError::ConstraintViolation(e.to_string())
        } else {
            StoreError::Database(e)
        }
    }
}

impl ClassifyStoreError for StoreError {
    fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::ConstraintViolation(_) => StoreErrorKind::ConstraintViolation,
            StoreError::Database(_) | StoreError::InvalidData(_) => StoreErrorKind::Other,
        }
    }
}

/// SQLite-based implementation of RelationStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should open its own
/// SqliteStore on the same database file; the busy timeout serializes their
/// writes and the unique indexes keep natural keys unique across them.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn scope_filter(scope: LifecycleScope) -> &'static str {
        match scope {
            LifecycleScope::ActiveOnly => " WHERE state = 'active'",
            LifecycleScope::IncludingRetired => "",
        }
    }

    fn expect_changed(changed: usize, what: impl FnOnce() -> String) -> Result<(), StoreError> {
        if changed == 0 {
            Err(StoreError::NotFound(what()))
        } else {
            Ok(())
        }
    }
}

impl RelationStore for SqliteStore {
    type Error = StoreError;

    fn insert_objective(&mut self, objective: NewObjective) -> Result<Objective, Self::Error> {
        self.conn.execute(
            "INSERT INTO objectives (title, description, level, status, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &objective.title,
                &objective.description,
                objective.level.as_str(),
                objective.status.as_str(),
                objective.owner_id.value(),
            ],
        )?;
        let id = ObjectiveId::new(self.conn.last_insert_rowid());
        tracing::debug!(%id, title = %objective.title, "objective inserted");
        Ok(objective.into_objective(id))
    }

    fn get_objective(&self, id: ObjectiveId) -> Result<Option<Objective>, Self::Error> {
        let sql = format!("SELECT {} FROM objectives WHERE id = ?1", OBJECTIVE_COLUMNS);
        let objective = self
            .conn
            .query_row(&sql, params![id.value()], objective_from_row)
            .optional()?;
        Ok(objective)
    }

    fn list_objectives(&self) -> Result<Vec<Objective>, Self::Error> {
        let sql = format!("SELECT {} FROM objectives ORDER BY id", OBJECTIVE_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let objectives = stmt
            .query_map([], objective_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(objectives)
    }

    fn update_objective_status(
        &mut self,
        id: ObjectiveId,
        status: ObjectiveStatus,
    ) -> Result<(), Self::Error> {
        let changed = self.conn.execute(
            "UPDATE objectives SET status = ?2 WHERE id = ?1",
            params![id.value(), status.as_str()],
        )?;
        Self::expect_changed(changed, || format!("objective {}", id))
    }

    fn update_objective_owner(
        &mut self,
        id: ObjectiveId,
        owner: OwnerId,
    ) -> Result<(), Self::Error> {
        let changed = self.conn.execute(
            "UPDATE objectives SET owner_id = ?2 WHERE id = ?1",
            params![id.value(), owner.value()],
        )?;
        Self::expect_changed(changed, || format!("objective {}", id))
    }

    fn delete_objective(&mut self, id: ObjectiveId) -> Result<(), Self::Error> {
        let changed = self
            .conn
            .execute("DELETE FROM objectives WHERE id = ?1", params![id.value()])?;
        Self::expect_changed(changed, || format!("objective {}", id))?;
        tracing::debug!(%id, "objective deleted");
        Ok(())
    }

    fn insert_key_result(&mut self, key_result: NewKeyResult) -> Result<KeyResult, Self::Error> {
        self.conn.execute(
            "INSERT INTO key_results (objective_id, description, target_value, unit)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                key_result.objective_id.value(),
                &key_result.description,
                key_result.target_value,
                &key_result.unit,
            ],
        )?;
        let id = KeyResultId::new(self.conn.last_insert_rowid());
        tracing::debug!(%id, objective = %key_result.objective_id, "key result inserted");
        Ok(key_result.into_key_result(id))
    }

    fn get_key_result(&self, id: KeyResultId) -> Result<Option<KeyResult>, Self::Error> {
        let sql = format!("SELECT {} FROM key_results WHERE id = ?1", KEY_RESULT_COLUMNS);
        let key_result = self
            .conn
            .query_row(&sql, params![id.value()], key_result_from_row)
            .optional()?;
        Ok(key_result)
    }

    fn list_key_results(&self) -> Result<Vec<KeyResult>, Self::Error> {
        let sql = format!("SELECT {} FROM key_results ORDER BY id", KEY_RESULT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let key_results = stmt
            .query_map([], key_result_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(key_results)
    }

    fn list_objective_relations(
        &self,
        scope: LifecycleScope,
    ) -> Result<Vec<ObjectiveRelation>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM objective_relations{} ORDER BY id",
            OBJECTIVE_RELATION_COLUMNS,
            Self::scope_filter(scope)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let relations = stmt
            .query_map([], objective_relation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(relations)
    }

    fn list_key_result_relations(
        &self,
        scope: LifecycleScope,
    ) -> Result<Vec<KeyResultRelation>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM key_result_relations{} ORDER BY id",
            KEY_RESULT_RELATION_COLUMNS,
            Self::scope_filter(scope)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let relations = stmt
            .query_map([], key_result_relation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(relations)
    }

    fn find_objective_relation(
        &self,
        key: &ObjectiveRelationKey,
    ) -> Result<Option<ObjectiveRelation>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM objective_relations
             WHERE origin = ?1 AND destination = ?2 AND relation_type = ?3 AND state = 'active'",
            OBJECTIVE_RELATION_COLUMNS
        );
        let relation = self
            .conn
            .query_row(
                &sql,
                params![
                    key.origin.value(),
                    key.destination.value(),
                    key.relation_type.as_str()
                ],
                objective_relation_from_row,
            )
            .optional()?;
        Ok(relation)
    }

    fn find_key_result_relation(
        &self,
        key: &KeyResultRelationKey,
    ) -> Result<Option<KeyResultRelation>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM key_result_relations
             WHERE objective_id = ?1 AND key_result_id = ?2 AND relation_type = ?3
               AND state = 'active'",
            KEY_RESULT_RELATION_COLUMNS
        );
        let relation = self
            .conn
            .query_row(
                &sql,
                params![
                    key.objective_id.value(),
                    key.key_result_id.value(),
                    key.relation_type.as_str()
                ],
                key_result_relation_from_row,
            )
            .optional()?;
        Ok(relation)
    }

    fn insert_objective_relation(
        &mut self,
        relation: &NewObjectiveRelation,
    ) -> Result<ObjectiveRelation, Self::Error> {
        self.conn.execute(
            "INSERT INTO objective_relations
             (origin, destination, relation_type, weight, description, state)
             VALUES (?1, ?2, ?3, ?4, ?5, 'active')",
            params![
                relation.origin.value(),
                relation.destination.value(),
                relation.relation_type.as_str(),
                relation.weight,
                &relation.description,
            ],
        )?;
        let id = RelationId::new(self.conn.last_insert_rowid());
        tracing::debug!(%id, key = %relation.key(), "objective relation inserted");
        Ok(relation.clone().into_relation(id))
    }

    fn insert_key_result_relation(
        &mut self,
        relation: &NewKeyResultRelation,
    ) -> Result<KeyResultRelation, Self::Error> {
        self.conn.execute(
            "INSERT INTO key_result_relations
             (objective_id, key_result_id, relation_type, contribution_weight, impact_percent,
              description, state)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active')",
            params![
                relation.objective_id.value(),
                relation.key_result_id.value(),
                relation.relation_type.as_str(),
                relation.contribution_weight,
                relation.impact_percent,
                &relation.description,
            ],
        )?;
        let id = RelationId::new(self.conn.last_insert_rowid());
        tracing::debug!(%id, key = %relation.key(), "key result relation inserted");
        Ok(relation.clone().into_relation(id))
    }

    fn update_objective_relation(
        &mut self,
        id: RelationId,
        update: &RelationUpdate,
    ) -> Result<ObjectiveRelation, Self::Error> {
        let sql = format!(
            "UPDATE objective_relations SET weight = ?2, description = ?3
             WHERE id = ?1 AND state = 'active'
             RETURNING {}",
            OBJECTIVE_RELATION_COLUMNS
        );
        self.conn
            .query_row(
                &sql,
                params![id.value(), update.weight, &update.description],
                objective_relation_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("active objective relation {}", id)))
    }

    fn update_key_result_relation(
        &mut self,
        id: RelationId,
        update: &RelationUpdate,
    ) -> Result<KeyResultRelation, Self::Error> {
        let sql = format!(
            "UPDATE key_result_relations
             SET contribution_weight = ?2,
                 impact_percent = COALESCE(?3, impact_percent),
                 description = ?4
             WHERE id = ?1 AND state = 'active'
             RETURNING {}",
            KEY_RESULT_RELATION_COLUMNS
        );
        self.conn
            .query_row(
                &sql,
                params![
                    id.value(),
                    update.weight,
                    update.impact_percent,
                    &update.description
                ],
                key_result_relation_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("active key result relation {}", id)))
    }

    fn retire_objective_relation(&mut self, id: RelationId) -> Result<(), Self::Error> {
        let changed = self.conn.execute(
            "UPDATE objective_relations SET state = 'retired' WHERE id = ?1 AND state = 'active'",
            params![id.value()],
        )?;
        Self::expect_changed(changed, || format!("active objective relation {}", id))
    }

    fn retire_key_result_relation(&mut self, id: RelationId) -> Result<(), Self::Error> {
        let changed = self.conn.execute(
            "UPDATE key_result_relations SET state = 'retired' WHERE id = ?1 AND state = 'active'",
            params![id.value()],
        )?;
        Self::expect_changed(changed, || format!("active key result relation {}", id))
    }

    fn snapshot(&self) -> Result<Snapshot, Self::Error> {
        // Both reads share one read transaction so they see the same commit
        let tx = self.conn.unchecked_transaction()?;
        let objectives = self.list_objectives()?;
        let relations = self.list_objective_relations(LifecycleScope::ActiveOnly)?;
        tx.commit()?;

        Ok(Snapshot {
            objectives,
            relations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okrgraph_domain::{Level, RelationType};

    #[test]
    fn test_unique_violation_is_classified() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let relation = NewObjectiveRelation {
            origin: ObjectiveId::new(2),
            destination: ObjectiveId::new(1),
            relation_type: RelationType::DependsOn,
            weight: 0.4,
            description: None,
        };

        store.insert_objective_relation(&relation).unwrap();
        let err = store.insert_objective_relation(&relation).unwrap_err();

        assert_eq!(err.kind(), StoreErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_check_violation_is_not_a_conflict() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let relation = NewObjectiveRelation {
            origin: ObjectiveId::new(1),
            destination: ObjectiveId::new(1),
            relation_type: RelationType::DependsOn,
            weight: 0.4,
            description: None,
        };

        let err = store.insert_objective_relation(&relation).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Other);
    }

    #[test]
    fn test_missing_rows_are_not_found() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let err = store
            .update_objective_status(ObjectiveId::new(99), ObjectiveStatus::Closed)
            .unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound);

        let err = store.retire_objective_relation(RelationId::new(5)).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
    }

    #[test]
    fn test_objective_updates() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let objective = store
            .insert_objective(NewObjective::new("Ship v2", Level::Team, OwnerId::new(1)))
            .unwrap();

        store
            .update_objective_status(objective.id, ObjectiveStatus::AtRisk)
            .unwrap();
        store.update_objective_owner(objective.id, OwnerId::new(8)).unwrap();

        let stored = store.get_objective(objective.id).unwrap().unwrap();
        assert_eq!(stored.status, ObjectiveStatus::AtRisk);
        assert_eq!(stored.owner_id, OwnerId::new(8));
    }
}
