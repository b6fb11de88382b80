//! Row mapping between SQLite rows and domain records

use crate::StoreError;
use okrgraph_domain::{
    KeyResult, KeyResultId, KeyResultRelation, Level, Objective, ObjectiveId, ObjectiveRelation,
    ObjectiveStatus, OwnerId, RelationId, RelationState, RelationType,
};
use rusqlite::types::Type;
use rusqlite::Row;

pub(crate) const OBJECTIVE_COLUMNS: &str = "id, title, description, level, status, owner_id";

pub(crate) const KEY_RESULT_COLUMNS: &str =
    "id, objective_id, description, target_value, unit";

pub(crate) const OBJECTIVE_RELATION_COLUMNS: &str =
    "id, origin, destination, relation_type, weight, description, state";

pub(crate) const KEY_RESULT_RELATION_COLUMNS: &str = "id, objective_id, key_result_id, \
     relation_type, contribution_weight, impact_percent, description, state";

/// Wrap a decoding failure so it surfaces through rusqlite's row mapping
fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        Box::new(StoreError::InvalidData(message)),
    )
}

fn text_column<T>(
    row: &Row<'_>,
    column: usize,
    parse: impl Fn(&str) -> Option<T>,
    what: &str,
) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    parse(&raw).ok_or_else(|| conversion_error(column, format!("Unknown {}: {}", what, raw)))
}

pub(crate) fn objective_from_row(row: &Row<'_>) -> rusqlite::Result<Objective> {
    Ok(Objective {
        id: ObjectiveId::new(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        level: text_column(row, 3, Level::parse, "level")?,
        status: text_column(row, 4, ObjectiveStatus::parse, "objective status")?,
        owner_id: OwnerId::new(row.get(5)?),
    })
}

pub(crate) fn key_result_from_row(row: &Row<'_>) -> rusqlite::Result<KeyResult> {
    Ok(KeyResult {
        id: KeyResultId::new(row.get(0)?),
        objective_id: ObjectiveId::new(row.get(1)?),
        description: row.get(2)?,
        target_value: row.get(3)?,
        unit: row.get(4)?,
    })
}

pub(crate) fn objective_relation_from_row(row: &Row<'_>) -> rusqlite::Result<ObjectiveRelation> {
    Ok(ObjectiveRelation {
        id: RelationId::new(row.get(0)?),
        origin: ObjectiveId::new(row.get(1)?),
        destination: ObjectiveId::new(row.get(2)?),
        relation_type: text_column(row, 3, RelationType::parse, "relation type")?,
        weight: row.get(4)?,
        description: row.get(5)?,
        state: text_column(row, 6, RelationState::parse, "relation state")?,
    })
}

pub(crate) fn key_result_relation_from_row(row: &Row<'_>) -> rusqlite::Result<KeyResultRelation> {
    Ok(KeyResultRelation {
        id: RelationId::new(row.get(0)?),
        objective_id: ObjectiveId::new(row.get(1)?),
        key_result_id: KeyResultId::new(row.get(2)?),
        relation_type: text_column(row, 3, RelationType::parse, "relation type")?,
        contribution_weight: row.get(4)?,
        impact_percent: row.get(5)?,
        description: row.get(6)?,
        state: text_column(row, 7, RelationState::parse, "relation state")?,
    })
}
