//! Integration tests for the okrgraph CLI commands
//!
//! Commands are parsed the way the binary parses them and run against a
//! file-backed store.

use clap::Parser;
use okrgraph_cli::commands::{self, Engine};
use okrgraph_cli::config::OutputFormat;
use okrgraph_cli::{Cli, CliError, Command, Formatter};
use okrgraph_engine::{DeletePolicy, EngineConfig, EngineError};
use okrgraph_store::SqliteStore;
use std::path::Path;

fn open(path: &Path, config: EngineConfig) -> Engine {
    Engine::new(SqliteStore::new(path).unwrap(), config).unwrap()
}

fn run(engine: &mut Engine, args: &[&str]) -> okrgraph_cli::Result<String> {
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    let mut argv = vec!["okrgraph"];
    argv.extend_from_slice(args);

    match Cli::parse_from(argv).command {
        Command::Objective(args) => commands::execute_objective(args, engine, &formatter),
        Command::Kr(args) => commands::execute_key_result(args, engine, &formatter),
        Command::Relate(args) => commands::execute_relate(args, engine, &formatter),
        Command::RelateKr(args) => commands::execute_relate_kr(args, engine, &formatter),
        Command::Retire(args) => commands::execute_retire(args, engine, &formatter),
        Command::Hierarchy(args) => commands::execute_hierarchy(args, engine, &formatter),
        Command::Relations(args) => commands::execute_relations(args, engine, &formatter),
        Command::Style(args) => commands::execute_style(args, engine, &formatter),
        Command::DeleteObjective(args) => {
            commands::execute_delete_objective(args, engine, &formatter)
        }
        Command::Config(_) => panic!("config commands do not run against the engine"),
    }
}

#[test]
fn test_build_and_show_hierarchy() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = open(&dir.path().join("okr.db"), EngineConfig::default());

    assert_eq!(run(&mut engine, &["objective", "add", "Grow", "-l", "company"]).unwrap(), "O-1");
    assert_eq!(run(&mut engine, &["objective", "add", "Ship"]).unwrap(), "O-2");
    assert_eq!(
        run(&mut engine, &["relate", "2", "contribuye_a", "1", "-w", "0.6"]).unwrap(),
        "R-1"
    );
    // Same key again updates the same row
    assert_eq!(
        run(&mut engine, &["relate", "O-2", "contributes_to", "O-1", "-w", "0.9"]).unwrap(),
        "R-1"
    );

    assert_eq!(run(&mut engine, &["hierarchy"]).unwrap(), "O-1\n  O-2");
    assert_eq!(run(&mut engine, &["hierarchy", "--root", "2"]).unwrap(), "O-2");
    assert_eq!(run(&mut engine, &["relations", "1"]).unwrap(), "R-1");
}

#[test]
fn test_validation_errors_surface() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = open(&dir.path().join("okr.db"), EngineConfig::default());
    run(&mut engine, &["objective", "add", "Grow"]).unwrap();
    run(&mut engine, &["objective", "add", "Ship"]).unwrap();

    let err = run(&mut engine, &["relate", "2", "parent_of", "1"]).unwrap_err();
    assert!(matches!(err, CliError::Engine(EngineError::Validation(_))));

    let err = run(&mut engine, &["relate", "2", "depende_de", "1", "-w", "1.5"]).unwrap_err();
    assert!(err.to_string().contains("weight"));
}

#[test]
fn test_key_result_relations_and_retire() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = open(&dir.path().join("okr.db"), EngineConfig::default());
    run(&mut engine, &["objective", "add", "Grow"]).unwrap();
    assert_eq!(
        run(
            &mut engine,
            &["kr", "add", "1", "Reach 100 clients", "-t", "100", "-u", "clients"]
        )
        .unwrap(),
        "KR-1"
    );
    assert_eq!(
        run(
            &mut engine,
            &["relate-kr", "1", "contribuye_a", "KR-1", "-w", "0.5", "-i", "25"]
        )
        .unwrap(),
        "R-1"
    );

    run(&mut engine, &["retire", "R-1", "--kr"]).unwrap();

    assert_eq!(run(&mut engine, &["relations", "1"]).unwrap(), "");
    assert_eq!(run(&mut engine, &["relations", "1", "--all"]).unwrap(), "R-1");
}

#[test]
fn test_delete_policies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("okr.db");
    let mut engine = open(&path, EngineConfig::default());
    run(&mut engine, &["objective", "add", "Grow"]).unwrap();
    run(&mut engine, &["objective", "add", "Ship"]).unwrap();
    run(&mut engine, &["relate", "2", "alineado_con", "1"]).unwrap();

    let err = run(&mut engine, &["delete-objective", "1"]).unwrap_err();
    assert!(matches!(err, CliError::Engine(EngineError::InUse { .. })));
    drop(engine);

    let config = EngineConfig {
        delete_policy: DeletePolicy::CascadeRetire,
        ..EngineConfig::default()
    };
    let mut engine = open(&path, config);
    assert_eq!(run(&mut engine, &["delete-objective", "1"]).unwrap(), "O-1");
    assert_eq!(run(&mut engine, &["objective", "list"]).unwrap(), "O-2");
}

#[test]
fn test_style_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = open(&dir.path().join("okr.db"), EngineConfig::default());

    assert_eq!(
        run(&mut engine, &["style", "contribuye_a", "0.6"]).unwrap(),
        "#2e7d32 solid 2"
    );
    assert_eq!(
        run(&mut engine, &["style", "unknown", "0.0"]).unwrap(),
        "#9e9e9e solid 1"
    );
}
