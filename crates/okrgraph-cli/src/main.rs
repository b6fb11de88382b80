//! okrgraph CLI - Command-line interface for the OKR relationship engine.

use clap::Parser;
use okrgraph_cli::commands::{self, Engine};
use okrgraph_cli::{Cli, CliError, Command, Config, Formatter};
use okrgraph_engine::DeletePolicy;
use okrgraph_store::SqliteStore;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> okrgraph_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };

    // An explicit config path must exist, except for `config init` creating it
    let managing_config = matches!(cli.command, Command::Config(_));
    if cli.config.is_some() && !managing_config && !config_path.exists() {
        return Err(CliError::Config(format!(
            "Config file {} does not exist",
            config_path.display()
        )));
    }
    let mut config = Config::load_from(&config_path)?;

    if let Command::DeleteObjective(args) = &cli.command {
        if args.cascade {
            config.engine.delete_policy = DeletePolicy::CascadeRetire;
        }
    }

    // Determine output format and color
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?
        }
        command => {
            let mut engine = open_engine(&config, cli.db.as_deref())?;
            let output = dispatch(command, &mut engine, &formatter)?;
            tracing::debug!(metrics = ?engine.metrics(), "command finished");
            output
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

/// Open the database and build the engine over it.
fn open_engine(config: &Config, explicit_db: Option<&Path>) -> okrgraph_cli::Result<Engine> {
    let db_path = config.database_path(explicit_db)?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    tracing::debug!(db = %db_path.display(), "opening database");
    let store = SqliteStore::new(&db_path)?;
    Ok(Engine::new(store, config.engine.clone())?)
}

/// Run an engine-backed command.
fn dispatch(
    command: Command,
    engine: &mut Engine,
    formatter: &Formatter,
) -> okrgraph_cli::Result<String> {
    match command {
        Command::Objective(args) => commands::execute_objective(args, engine, formatter),
        Command::Kr(args) => commands::execute_key_result(args, engine, formatter),
        Command::Relate(args) => commands::execute_relate(args, engine, formatter),
        Command::RelateKr(args) => commands::execute_relate_kr(args, engine, formatter),
        Command::Retire(args) => commands::execute_retire(args, engine, formatter),
        Command::Hierarchy(args) => commands::execute_hierarchy(args, engine, formatter),
        Command::Relations(args) => commands::execute_relations(args, engine, formatter),
        Command::Style(args) => commands::execute_style(args, engine, formatter),
        Command::DeleteObjective(args) => {
            commands::execute_delete_objective(args, engine, formatter)
        }
        Command::Config(_) => Err(CliError::Config(
            "config commands do not use the database".into(),
        )),
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
