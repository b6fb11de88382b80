//! okrgraph Engine
//!
//! Application layer of the Objective/Key-Result relationship engine.
//!
//! # Overview
//!
//! The engine is responsible for:
//! - **Relation writes**: validating relations through the Gatekeeper and
//!   upserting them on their natural key
//! - **Hierarchy building**: deriving a rooted forest from the hierarchical
//!   relations, safe against cycles and bounded in depth and size
//! - **Relation queries**: listing the relations touching one objective
//! - **Lifecycle**: retiring relations and deleting objectives under a
//!   configurable delete policy
//!
//! # Usage
//!
//! ```
//! use okrgraph_domain::{Level, NewObjective, OwnerId};
//! use okrgraph_engine::{EngineConfig, RelationEngine};
//! use okrgraph_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open_in_memory()?;
//! let mut engine = RelationEngine::new(store, EngineConfig::default())?;
//!
//! let company = engine.add_objective(NewObjective::new("Grow", Level::Company, OwnerId::new(1)))?;
//! let team = engine.add_objective(NewObjective::new("Ship", Level::Team, OwnerId::new(2)))?;
//! engine.create_or_update_objective_relation(team.id, company.id, "contribuye_a", 0.6, None)?;
//!
//! let forest = engine.get_hierarchy(None)?;
//! assert_eq!(forest.root_ids(), vec![company.id]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use okrgraph_engine::EngineConfig;
//!
//! // Default: depth 64, 10 000 nodes, one upsert retry, restrict-delete
//! let config = EngineConfig::default();
//!
//! // Strict: small forests for interactive views
//! let config = EngineConfig::strict();
//!
//! // Lenient: large imports, cascade-retire on delete
//! let config = EngineConfig::lenient();
//! ```

#![warn(missing_docs)]

mod config;
mod dedup;
mod engine;
mod error;
pub mod hierarchy;
mod metrics;
mod query;

pub use config::{DeletePolicy, EngineConfig};
pub use dedup::{Deduplicator, UpsertOutcome, Upserted};
pub use engine::{DeleteReport, RelationEngine};
pub use error::{EngineError, HierarchyError, TraversalLimit};
pub use hierarchy::{Forest, HierarchyBuilder, HierarchyNode, ParentEdge};
pub use metrics::EngineMetrics;
pub use query::{RelationBundle, RelationQueryService};
