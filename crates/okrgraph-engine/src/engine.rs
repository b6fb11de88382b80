//! The relationship engine facade

use crate::{
    DeletePolicy, Deduplicator, EngineConfig, EngineError, EngineMetrics, Forest,
    HierarchyBuilder, HierarchyError, RelationBundle, RelationQueryService, Upserted,
    UpsertOutcome,
};
use okrgraph_domain::{
    style_for_name, EdgeStyle, KeyResult, KeyResultId, KeyResultRelation, KeyResultRelationDraft,
    LifecycleScope, NewKeyResult, NewObjective, Objective, ObjectiveId, ObjectiveRelation,
    ObjectiveRelationDraft, ObjectiveStatus, OwnerId, RelationId, RelationStore, RelationType,
};
use okrgraph_gatekeeper::{Gatekeeper, ValidationError};
use serde::Serialize;

/// Outcome of a successful objective deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteReport {
    /// The deleted objective
    pub objective: Objective,

    /// Key results deleted along with it
    pub key_results: usize,

    /// Relations retired before the delete (always 0 under restrict)
    pub retired_relations: usize,
}

/// Objective/Key-Result relationship engine over a [`RelationStore`]
///
/// Every relation write passes the Gatekeeper, then the Deduplicator. Reads of
/// the hierarchy use a consistent store snapshot.
pub struct RelationEngine<S: RelationStore> {
    store: S,
    config: EngineConfig,
    gatekeeper: Gatekeeper,
    dedup: Deduplicator,
    builder: HierarchyBuilder,
    metrics: EngineMetrics,
}

impl<S: RelationStore> RelationEngine<S> {
    /// Create an engine over `store`
    pub fn new(store: S, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;

        Ok(Self {
            store,
            gatekeeper: Gatekeeper::new(config.validation.clone()),
            dedup: Deduplicator::new(config.upsert_retries),
            builder: HierarchyBuilder::new(config.max_depth, config.max_nodes),
            config,
            metrics: EngineMetrics::new(),
        })
    }

    /// Create an engine with default configuration
    pub fn with_defaults(store: S) -> Result<Self, EngineError> {
        Self::new(store, EngineConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters collected since creation or the last reset
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Reset the collected counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the engine, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a new objective
    pub fn add_objective(&mut self, objective: NewObjective) -> Result<Objective, EngineError> {
        if objective.title.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "objective title must not be empty".to_string(),
            ));
        }

        let objective = self
            .store
            .insert_objective(objective)
            .map_err(EngineError::from_store)?;
        tracing::info!(id = %objective.id, level = objective.level.as_str(), "objective added");
        Ok(objective)
    }

    /// Register a key result under an existing objective
    pub fn add_key_result(&mut self, key_result: NewKeyResult) -> Result<KeyResult, EngineError> {
        if key_result.description.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "key result description must not be empty".to_string(),
            ));
        }
        if !key_result.target_value.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "key result target must be a finite number, got {}",
                key_result.target_value
            )));
        }
        self.require_objective(key_result.objective_id)?;

        let key_result = self
            .store
            .insert_key_result(key_result)
            .map_err(EngineError::from_store)?;
        tracing::info!(
            id = %key_result.id,
            objective = %key_result.objective_id,
            "key result added"
        );
        Ok(key_result)
    }

    /// Change the status of an objective
    pub fn set_objective_status(
        &mut self,
        id: ObjectiveId,
        status: ObjectiveStatus,
    ) -> Result<(), EngineError> {
        self.store
            .update_objective_status(id, status)
            .map_err(EngineError::from_store)
    }

    /// Reassign the owner of an objective
    pub fn set_objective_owner(
        &mut self,
        id: ObjectiveId,
        owner: OwnerId,
    ) -> Result<(), EngineError> {
        self.store
            .update_objective_owner(id, owner)
            .map_err(EngineError::from_store)
    }

    /// Relate two objectives, or update the active relation with the same key
    ///
    /// `relation_type` is checked against the taxonomy; both objectives must
    /// exist.
    pub fn create_or_update_objective_relation(
        &mut self,
        origin: ObjectiveId,
        destination: ObjectiveId,
        relation_type: &str,
        weight: f64,
        description: Option<String>,
    ) -> Result<Upserted<ObjectiveRelation>, EngineError> {
        let draft = ObjectiveRelationDraft {
            origin,
            destination,
            relation_type: relation_type.to_string(),
            weight,
            description,
        };
        let checked = self.gatekeeper.validate_objective_relation(&draft);
        let valid = self.checked(checked)?;
        self.require_objective(origin)?;
        self.require_objective(destination)?;

        let relation_type = valid.relation().relation_type;
        let result = self.dedup.upsert_objective_relation(&mut self.store, valid);
        self.record_upsert(relation_type, &result);
        result
    }

    /// Relate an objective and a key result, or update the active relation
    /// with the same key
    pub fn create_or_update_key_result_relation(
        &mut self,
        objective_id: ObjectiveId,
        key_result_id: KeyResultId,
        relation_type: &str,
        contribution_weight: f64,
        impact_percent: f64,
        description: Option<String>,
    ) -> Result<Upserted<KeyResultRelation>, EngineError> {
        let draft = KeyResultRelationDraft {
            objective_id,
            key_result_id,
            relation_type: relation_type.to_string(),
            contribution_weight,
            impact_percent,
            description,
        };
        let checked = self.gatekeeper.validate_key_result_relation(&draft);
        let valid = self.checked(checked)?;
        self.require_objective(objective_id)?;
        self.store
            .get_key_result(key_result_id)
            .map_err(EngineError::from_store)?
            .ok_or_else(|| EngineError::NotFound(format!("Key result {}", key_result_id)))?;

        let relation_type = valid.relation().relation_type;
        let result = self.dedup.upsert_key_result_relation(&mut self.store, valid);
        self.record_upsert(relation_type, &result);
        result
    }

    /// Retire an objective relation; it stays readable as history
    pub fn retire_objective_relation(&mut self, id: RelationId) -> Result<(), EngineError> {
        self.store
            .retire_objective_relation(id)
            .map_err(EngineError::from_store)?;
        self.metrics.record_retired(1);
        tracing::info!(%id, "objective relation retired");
        Ok(())
    }

    /// Retire a key-result relation; it stays readable as history
    pub fn retire_key_result_relation(&mut self, id: RelationId) -> Result<(), EngineError> {
        self.store
            .retire_key_result_relation(id)
            .map_err(EngineError::from_store)?;
        self.metrics.record_retired(1);
        tracing::info!(%id, "key result relation retired");
        Ok(())
    }

    /// Build the hierarchy forest
    ///
    /// With `scope` set, the forest is rooted at that objective only. On a
    /// cycle or an exceeded limit the returned [`HierarchyError`] carries the
    /// partial forest.
    pub fn get_hierarchy(&mut self, scope: Option<ObjectiveId>) -> Result<Forest, EngineError> {
        if let Some(root) = scope {
            self.require_objective(root)?;
        }

        let snapshot = self.store.snapshot().map_err(EngineError::from_store)?;
        self.metrics.record_build();

        let result = match scope {
            Some(root) => self
                .builder
                .build_subtree(root, &snapshot.objectives, &snapshot.relations),
            None => self.builder.build(&snapshot.objectives, &snapshot.relations),
        };

        match result {
            Ok(forest) => {
                tracing::info!(
                    objectives = snapshot.objectives.len(),
                    relations = snapshot.relations.len(),
                    roots = forest.roots().len(),
                    nodes = forest.node_count(),
                    "hierarchy built"
                );
                Ok(forest)
            }
            Err(e) => {
                match &e {
                    HierarchyError::CycleDetected { .. } => self.metrics.record_cycle(),
                    HierarchyError::LimitExceeded { .. } => self.metrics.record_truncation(),
                }
                Err(e.into())
            }
        }
    }

    /// Active relations touching an objective
    pub fn get_relations_for_objective(
        &self,
        id: ObjectiveId,
    ) -> Result<RelationBundle, EngineError> {
        RelationQueryService::relations_for(&self.store, id, LifecycleScope::ActiveOnly)
    }

    /// Active and retired relations touching an objective
    pub fn get_relation_history(&self, id: ObjectiveId) -> Result<RelationBundle, EngineError> {
        RelationQueryService::relations_for(&self.store, id, LifecycleScope::IncludingRetired)
    }

    /// Visual encoding of an edge; unknown type names get the neutral style
    pub fn style_for_relation(&self, relation_type: &str, weight: f64) -> EdgeStyle {
        style_for_name(relation_type, weight)
    }

    /// Delete an objective according to the configured [`DeletePolicy`]
    ///
    /// Under `Restrict` the delete fails with `InUse` while any active
    /// relation references the objective or one of its key results. Under
    /// `CascadeRetire` those relations are retired first. Key results owned by
    /// the objective are deleted with it.
    pub fn delete_objective(&mut self, id: ObjectiveId) -> Result<DeleteReport, EngineError> {
        let objective = self.require_objective(id)?;

        let owned: Vec<KeyResultId> = self
            .store
            .list_key_results()
            .map_err(EngineError::from_store)?
            .into_iter()
            .filter(|kr| kr.objective_id == id)
            .map(|kr| kr.id)
            .collect();

        let objective_relations: Vec<RelationId> = self
            .store
            .list_objective_relations(LifecycleScope::ActiveOnly)
            .map_err(EngineError::from_store)?
            .into_iter()
            .filter(|r| r.touches(id))
            .map(|r| r.id)
            .collect();

        let key_result_relations: Vec<RelationId> = self
            .store
            .list_key_result_relations(LifecycleScope::ActiveOnly)
            .map_err(EngineError::from_store)?
            .into_iter()
            .filter(|r| r.objective_id == id || owned.contains(&r.key_result_id))
            .map(|r| r.id)
            .collect();

        let in_use = objective_relations.len() + key_result_relations.len();
        if in_use > 0 && self.config.delete_policy == DeletePolicy::Restrict {
            tracing::warn!(%id, relations = in_use, "delete refused, objective in use");
            return Err(EngineError::InUse {
                objective: id,
                relations: in_use,
            });
        }

        for relation in &objective_relations {
            self.store
                .retire_objective_relation(*relation)
                .map_err(EngineError::from_store)?;
        }
        for relation in &key_result_relations {
            self.store
                .retire_key_result_relation(*relation)
                .map_err(EngineError::from_store)?;
        }
        self.metrics.record_retired(in_use);

        self.store
            .delete_objective(id)
            .map_err(EngineError::from_store)?;
        self.metrics.record_objective_deletion();
        tracing::info!(%id, key_results = owned.len(), retired = in_use, "objective deleted");

        Ok(DeleteReport {
            objective,
            key_results: owned.len(),
            retired_relations: in_use,
        })
    }

    fn require_objective(&self, id: ObjectiveId) -> Result<Objective, EngineError> {
        self.store
            .get_objective(id)
            .map_err(EngineError::from_store)?
            .ok_or_else(|| EngineError::NotFound(format!("Objective {}", id)))
    }

    fn checked<T>(&mut self, result: Result<T, ValidationError>) -> Result<T, EngineError> {
        result.map_err(|e| {
            self.metrics.record_rejection();
            tracing::debug!(error = %e, "relation rejected");
            EngineError::Validation(e)
        })
    }

    fn record_upsert<R>(
        &mut self,
        relation_type: RelationType,
        result: &Result<Upserted<R>, EngineError>,
    ) {
        match result {
            Ok(upserted) => {
                self.metrics.record_retries(upserted.retries);
                match upserted.outcome {
                    UpsertOutcome::Inserted => self.metrics.record_insert(relation_type),
                    UpsertOutcome::Updated => self.metrics.record_update(relation_type),
                }
            }
            Err(EngineError::Conflict(_)) => self.metrics.record_conflict(),
            Err(_) => {}
        }
    }
}
