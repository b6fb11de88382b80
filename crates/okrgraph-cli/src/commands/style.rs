//! Style command implementation.

use super::Engine;
use crate::cli::StyleArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the style command.
pub fn execute_style(args: StyleArgs, engine: &Engine, formatter: &Formatter) -> Result<String> {
    let style = engine.style_for_relation(&args.relation_type, args.weight);
    formatter.style(&args.relation_type, args.weight, &style)
}
