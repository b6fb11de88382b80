//! Command implementations.
//!
//! Each command runs against an open engine and returns the text to print.

pub mod config;
pub mod delete;
pub mod hierarchy;
pub mod objective;
pub mod relate;
pub mod relations;
pub mod style;

pub use self::config::execute_config;
pub use self::delete::execute_delete_objective;
pub use self::hierarchy::execute_hierarchy;
pub use self::objective::{execute_key_result, execute_objective};
pub use self::relate::{execute_relate, execute_relate_kr, execute_retire};
pub use self::relations::execute_relations;
pub use self::style::execute_style;

use okrgraph_engine::RelationEngine;
use okrgraph_store::SqliteStore;

/// Engine over the SQLite store the CLI opens.
pub type Engine = RelationEngine<SqliteStore>;
