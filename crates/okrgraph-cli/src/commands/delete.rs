//! Delete-objective command implementation.

use super::Engine;
use crate::cli::DeleteObjectiveArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the delete-objective command.
///
/// The delete policy comes from the engine configuration; `--cascade` is
/// applied when the engine is opened.
pub fn execute_delete_objective(
    args: DeleteObjectiveArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    let report = engine.delete_objective(args.id)?;
    formatter.deleted(&report)
}
