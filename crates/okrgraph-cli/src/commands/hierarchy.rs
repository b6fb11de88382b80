//! Hierarchy command implementation.

use super::Engine;
use crate::cli::HierarchyArgs;
use crate::error::Result;
use crate::output::Formatter;
use okrgraph_engine::EngineError;

/// Execute the hierarchy command.
///
/// When the build stops on a cycle or a limit, the partial forest is printed
/// before the error is returned.
pub fn execute_hierarchy(
    args: HierarchyArgs,
    engine: &mut Engine,
    formatter: &Formatter,
) -> Result<String> {
    match engine.get_hierarchy(args.root) {
        Ok(forest) => formatter.forest(&forest),
        Err(EngineError::Hierarchy(e)) => {
            println!("{}", formatter.forest(e.partial())?);
            if !formatter.is_json() {
                eprintln!("{}", formatter.warning("Hierarchy is incomplete"));
            }
            Err(EngineError::Hierarchy(e).into())
        }
        Err(e) => Err(e.into()),
    }
}
