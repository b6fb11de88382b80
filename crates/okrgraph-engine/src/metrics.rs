//! Metrics collection for engine operations

use okrgraph_domain::RelationType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters collected by a [`RelationEngine`](crate::RelationEngine)
///
/// Tracks relation writes per type, upsert races, hierarchy builds and
/// lifecycle changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineMetrics {
    /// Relations created, per type
    pub inserted: BTreeMap<RelationType, usize>,

    /// Relations updated in place, per type
    pub updated: BTreeMap<RelationType, usize>,

    /// Lookups re-run after an upsert lost a race
    pub retries: usize,

    /// Upserts that gave up with a conflict
    pub conflicts: usize,

    /// Writes rejected by validation
    pub rejected: usize,

    /// Hierarchy builds attempted
    pub builds: usize,

    /// Builds that found a cycle
    pub cycles: usize,

    /// Builds truncated by a depth or node limit
    pub truncated: usize,

    /// Relations moved to the retired state
    pub retired: usize,

    /// Objectives deleted
    pub deleted_objectives: usize,
}

impl EngineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relation insert
    pub fn record_insert(&mut self, relation_type: RelationType) {
        *self.inserted.entry(relation_type).or_insert(0) += 1;
    }

    /// Record an in-place relation update
    pub fn record_update(&mut self, relation_type: RelationType) {
        *self.updated.entry(relation_type).or_insert(0) += 1;
    }

    /// Record lookups re-run by one upsert
    pub fn record_retries(&mut self, count: u32) {
        self.retries += count as usize;
    }

    /// Record an upsert that gave up
    pub fn record_conflict(&mut self) {
        self.conflicts += 1;
    }

    /// Record a validation rejection
    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    /// Record a hierarchy build
    pub fn record_build(&mut self) {
        self.builds += 1;
    }

    /// Record a build that found a cycle
    pub fn record_cycle(&mut self) {
        self.cycles += 1;
    }

    /// Record a build cut short by a limit
    pub fn record_truncation(&mut self) {
        self.truncated += 1;
    }

    /// Record retired relations
    pub fn record_retired(&mut self, count: usize) {
        self.retired += count;
    }

    /// Record an objective deletion
    pub fn record_objective_deletion(&mut self) {
        self.deleted_objectives += 1;
    }

    /// Total relations created across all types
    pub fn total_inserted(&self) -> usize {
        self.inserted.values().sum()
    }

    /// Total in-place updates across all types
    pub fn total_updated(&self) -> usize {
        self.updated.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Engine Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Hierarchy builds: {}", self.builds),
            format!("  Cycles: {}", self.cycles),
            format!("  Truncated: {}", self.truncated),
            format!("Upsert retries: {}", self.retries),
            format!("Conflicts: {}", self.conflicts),
            format!("Rejected: {}", self.rejected),
            format!("Retired relations: {}", self.retired),
            format!("Deleted objectives: {}", self.deleted_objectives),
            String::new(),
        ];

        for (title, counts, total) in [
            ("Inserted by type:", &self.inserted, self.total_inserted()),
            ("Updated by type:", &self.updated, self.total_updated()),
        ] {
            if counts.is_empty() {
                continue;
            }
            lines.push(title.to_string());
            for (relation_type, count) in counts {
                lines.push(format!("  {}: {}", relation_type, count));
            }
            lines.push(format!("  Total: {}", total));
        }

        lines.join("\n")
    }
}
