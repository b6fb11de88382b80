//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command against the file at `path`.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        ConfigAction::Init { force } => init_config(path, force, formatter),
        ConfigAction::Show => formatter.config(config),
        ConfigAction::Path => Ok(path.display().to_string()),
    }
}

/// Write the default configuration to `path`.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<String> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    tracing::info!(path = %path.display(), "config written");
    Ok(formatter.success(&format!("Config written to {}", path.display())))
}
