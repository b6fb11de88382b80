//! Objective and key result command implementations.

use super::Engine;
use crate::cli::{KeyResultAction, KeyResultArgs, ObjectiveAction, ObjectiveArgs};
use crate::error::Result;
use crate::output::Formatter;
use okrgraph_domain::{NewKeyResult, NewObjective, ObjectiveStatus, RelationStore};
use okrgraph_engine::EngineError;

/// Execute an objective subcommand.
pub fn execute_objective(
    args: ObjectiveArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        ObjectiveAction::Add {
            title,
            level,
            owner,
            description,
        } => {
            let mut objective = NewObjective::new(title, level.into(), owner);
            if let Some(description) = description {
                objective = objective.with_description(description);
            }
            let objective = engine.add_objective(objective)?;
            formatter.objective_added(&objective)
        }
        ObjectiveAction::List => {
            let objectives = engine
                .store()
                .list_objectives()
                .map_err(EngineError::from_store)?;
            formatter.objectives(&objectives)
        }
        ObjectiveAction::Status { id, status } => {
            let status: ObjectiveStatus = status.into();
            engine.set_objective_status(id, status)?;
            Ok(formatter.success(&format!("Objective {} is now {}", id, status.as_str())))
        }
        ObjectiveAction::Owner { id, owner } => {
            engine.set_objective_owner(id, owner)?;
            Ok(formatter.success(&format!("Objective {} is now owned by {}", id, owner)))
        }
    }
}

/// Execute a key result subcommand.
pub fn execute_key_result(
    args: KeyResultArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        KeyResultAction::Add {
            objective,
            description,
            target,
            unit,
        } => {
            let key_result = engine.add_key_result(NewKeyResult {
                objective_id: objective,
                description,
                target_value: target,
                unit,
            })?;
            formatter.key_result_added(&key_result)
        }
        KeyResultAction::List => {
            let key_results = engine
                .store()
                .list_key_results()
                .map_err(EngineError::from_store)?;
            formatter.key_results(&key_results)
        }
    }
}
