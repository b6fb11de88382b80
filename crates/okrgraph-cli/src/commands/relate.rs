//! Relation write command implementations.

use super::Engine;
use crate::cli::{RelateArgs, RelateKrArgs, RetireArgs};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the relate command.
pub fn execute_relate(
    args: RelateArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    let upserted = engine.create_or_update_objective_relation(
        args.origin,
        args.destination,
        &args.relation_type,
        args.weight,
        args.description,
    )?;
    formatter.objective_relation_upserted(&upserted)
}

/// Execute the relate-kr command.
pub fn execute_relate_kr(
    args: RelateKrArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    let upserted = engine.create_or_update_key_result_relation(
        args.objective,
        args.key_result,
        &args.relation_type,
        args.weight,
        args.impact,
        args.description,
    )?;
    formatter.key_result_relation_upserted(&upserted)
}

/// Execute the retire command.
pub fn execute_retire(
    args: RetireArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    if args.kr {
        engine.retire_key_result_relation(args.id)?;
    } else {
        engine.retire_objective_relation(args.id)?;
    }
    Ok(formatter.success(&format!("Relation {} retired", args.id)))
}
