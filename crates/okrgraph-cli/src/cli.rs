//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use okrgraph_domain::{KeyResultId, Level, ObjectiveId, ObjectiveStatus, OwnerId, RelationId};
use std::path::PathBuf;

/// okrgraph - Relate objectives and key results and view their hierarchy.
#[derive(Debug, Parser)]
#[command(name = "okrgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "OKRGRAPH_DB")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage objectives
    Objective(ObjectiveArgs),

    /// Manage key results
    Kr(KeyResultArgs),

    /// Relate two objectives (origin <type> destination)
    Relate(RelateArgs),

    /// Relate an objective and a key result
    RelateKr(RelateKrArgs),

    /// Retire a relation
    Retire(RetireArgs),

    /// Show the objective hierarchy
    Hierarchy(HierarchyArgs),

    /// List the relations touching an objective
    Relations(RelationsArgs),

    /// Show the edge style of a relation type and weight
    Style(StyleArgs),

    /// Delete an objective and its key results
    DeleteObjective(DeleteObjectiveArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for objective management.
#[derive(Debug, Parser)]
pub struct ObjectiveArgs {
    #[command(subcommand)]
    pub action: ObjectiveAction,
}

/// Objective management actions.
#[derive(Debug, Subcommand)]
pub enum ObjectiveAction {
    /// Add an objective
    Add {
        /// Title
        title: String,

        /// Organizational level
        #[arg(short, long, value_enum, default_value = "team")]
        level: LevelArg,

        /// Owner id
        #[arg(short, long, default_value = "1")]
        owner: OwnerId,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List objectives
    List,

    /// Change the status of an objective
    Status {
        /// Objective id (e.g. 3 or O-3)
        id: ObjectiveId,

        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Reassign the owner of an objective
    Owner {
        /// Objective id
        id: ObjectiveId,

        /// New owner id
        owner: OwnerId,
    },
}

/// Arguments for key result management.
#[derive(Debug, Parser)]
pub struct KeyResultArgs {
    #[command(subcommand)]
    pub action: KeyResultAction,
}

/// Key result management actions.
#[derive(Debug, Subcommand)]
pub enum KeyResultAction {
    /// Add a key result to an objective
    Add {
        /// Owning objective id
        objective: ObjectiveId,

        /// What is measured
        description: String,

        /// Target value
        #[arg(short, long)]
        target: f64,

        /// Unit of the target
        #[arg(short, long, default_value = "")]
        unit: String,
    },

    /// List key results
    List,
}

/// Arguments for the relate command.
#[derive(Debug, Parser)]
pub struct RelateArgs {
    /// Origin objective (the contributor)
    pub origin: ObjectiveId,

    /// Relation type (contribuye_a, depende_de, alineado_con, bloquea_a, sucede_a)
    pub relation_type: String,

    /// Destination objective
    pub destination: ObjectiveId,

    /// Relation weight (0.0-1.0)
    #[arg(short, long, default_value = "1.0")]
    pub weight: f64,

    /// Optional note
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for the relate-kr command.
#[derive(Debug, Parser)]
pub struct RelateKrArgs {
    /// Objective id
    pub objective: ObjectiveId,

    /// Relation type
    pub relation_type: String,

    /// Key result id (e.g. 4 or KR-4)
    pub key_result: KeyResultId,

    /// Contribution weight (0.0-1.0)
    #[arg(short, long, default_value = "1.0")]
    pub weight: f64,

    /// Expected impact in percent (0-100)
    #[arg(short, long, default_value = "0.0")]
    pub impact: f64,

    /// Optional note
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for the retire command.
#[derive(Debug, Parser)]
pub struct RetireArgs {
    /// Relation id (e.g. 7 or R-7)
    pub id: RelationId,

    /// The id names a key-result relation
    #[arg(long)]
    pub kr: bool,
}

/// Arguments for the hierarchy command.
#[derive(Debug, Parser)]
pub struct HierarchyArgs {
    /// Only show the subtree below this objective
    #[arg(short, long)]
    pub root: Option<ObjectiveId>,
}

/// Arguments for the relations command.
#[derive(Debug, Parser)]
pub struct RelationsArgs {
    /// Objective id
    pub id: ObjectiveId,

    /// Include retired relations
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the style command.
#[derive(Debug, Parser)]
pub struct StyleArgs {
    /// Relation type name; unknown names get the neutral style
    pub relation_type: String,

    /// Relation weight
    pub weight: f64,
}

/// Arguments for the delete-objective command.
#[derive(Debug, Parser)]
pub struct DeleteObjectiveArgs {
    /// Objective id
    pub id: ObjectiveId,

    /// Retire the relations that reference it instead of refusing
    #[arg(long)]
    pub cascade: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config file actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

/// Level argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LevelArg {
    /// Company-wide
    Company,
    /// Department
    Department,
    /// Team
    Team,
}

/// Status argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusArg {
    /// Being drafted
    Draft,
    /// In progress
    Active,
    /// Unlikely to be met
    AtRisk,
    /// Met
    Completed,
    /// Closed
    Closed,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<LevelArg> for Level {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Company => Level::Company,
            LevelArg::Department => Level::Department,
            LevelArg::Team => Level::Team,
        }
    }
}

impl From<StatusArg> for ObjectiveStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Draft => ObjectiveStatus::Draft,
            StatusArg::Active => ObjectiveStatus::Active,
            StatusArg::AtRisk => ObjectiveStatus::AtRisk,
            StatusArg::Completed => ObjectiveStatus::Completed,
            StatusArg::Closed => ObjectiveStatus::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relate_command() {
        let cli = Cli::parse_from(["okrgraph", "relate", "O-3", "contribuye_a", "1", "-w", "0.6"]);
        match cli.command {
            Command::Relate(args) => {
                assert_eq!(args.origin, ObjectiveId::new(3));
                assert_eq!(args.destination, ObjectiveId::new(1));
                assert_eq!(args.relation_type, "contribuye_a");
                assert_eq!(args.weight, 0.6);
            }
            _ => panic!("Expected Relate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "okrgraph",
            "hierarchy",
            "--root",
            "2",
            "--db",
            "okr.db",
            "-f",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("okr.db")));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Hierarchy(args) => assert_eq!(args.root, Some(ObjectiveId::new(2))),
            _ => panic!("Expected Hierarchy command"),
        }
    }

    #[test]
    fn test_config_init_command() {
        let cli = Cli::parse_from(["okrgraph", "config", "init", "--force"]);
        match cli.command {
            Command::Config(args) => {
                assert!(matches!(args.action, ConfigAction::Init { force: true }))
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_invalid_id_rejected() {
        let result = Cli::try_parse_from(["okrgraph", "relations", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_level_conversion() {
        let level: Level = LevelArg::Department.into();
        assert_eq!(level, Level::Department);
        let status: ObjectiveStatus = StatusArg::AtRisk.into();
        assert_eq!(status, ObjectiveStatus::AtRisk);
    }
}
