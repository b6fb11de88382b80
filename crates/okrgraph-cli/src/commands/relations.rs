//! Relations command implementation.

use super::Engine;
use crate::cli::RelationsArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the relations command.
pub fn execute_relations(
    args: RelationsArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    let bundle = if args.all {
        engine.get_relation_history(args.id)?
    } else {
        engine.get_relations_for_objective(args.id)?
    };
    formatter.bundle(&bundle)
}
