//! Relations touching one objective

use crate::EngineError;
use okrgraph_domain::{
    KeyResultRelation, LifecycleScope, Objective, ObjectiveId, ObjectiveRelation, RelationId,
    RelationStore,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Every relation touching one objective, strongest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationBundle {
    /// The objective queried
    pub objective: Objective,

    /// Objective relations where it is the origin
    pub as_origin: Vec<ObjectiveRelation>,

    /// Objective relations where it is the destination
    pub as_destination: Vec<ObjectiveRelation>,

    /// Key-result relations on its objective side
    pub key_results: Vec<KeyResultRelation>,

    /// Relations from other objectives to key results it owns
    pub owned_key_results: Vec<KeyResultRelation>,
}

impl RelationBundle {
    /// Number of relations in the bundle
    pub fn len(&self) -> usize {
        self.as_origin.len()
            + self.as_destination.len()
            + self.key_results.len()
            + self.owned_key_results.len()
    }

    /// Whether the objective has no relations in scope
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Answers "which relations touch objective X"
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationQueryService;

impl RelationQueryService {
    /// Collect the relations of `id` visible under `scope`
    ///
    /// Each list is ordered by descending weight (contribution weight for
    /// key-result relations), ties broken by ascending relation id.
    pub fn relations_for<S: RelationStore>(
        store: &S,
        id: ObjectiveId,
        scope: LifecycleScope,
    ) -> Result<RelationBundle, EngineError> {
        let objective = store
            .get_objective(id)
            .map_err(EngineError::from_store)?
            .ok_or_else(|| EngineError::NotFound(format!("Objective {}", id)))?;

        let (mut as_origin, mut as_destination): (Vec<_>, Vec<_>) = store
            .list_objective_relations(scope)
            .map_err(EngineError::from_store)?
            .into_iter()
            .filter(|r| r.touches(id))
            .partition(|r| r.origin == id);

        let owned: HashSet<_> = store
            .list_key_results()
            .map_err(EngineError::from_store)?
            .into_iter()
            .filter(|kr| kr.objective_id == id)
            .map(|kr| kr.id)
            .collect();

        // A relation from X to its own key result lands in `key_results` only
        let (mut key_results, mut owned_key_results): (Vec<_>, Vec<_>) = store
            .list_key_result_relations(scope)
            .map_err(EngineError::from_store)?
            .into_iter()
            .filter(|r| r.objective_id == id || owned.contains(&r.key_result_id))
            .partition(|r| r.objective_id == id);

        as_origin.sort_by(|a, b| by_weight((a.weight, a.id), (b.weight, b.id)));
        as_destination.sort_by(|a, b| by_weight((a.weight, a.id), (b.weight, b.id)));
        for list in [&mut key_results, &mut owned_key_results] {
            list.sort_by(|a, b| {
                by_weight((a.contribution_weight, a.id), (b.contribution_weight, b.id))
            });
        }

        Ok(RelationBundle {
            objective,
            as_origin,
            as_destination,
            key_results,
            owned_key_results,
        })
    }
}

fn by_weight(a: (f64, RelationId), b: (f64, RelationId)) -> Ordering {
    b.0.total_cmp(&a.0).then(a.1.cmp(&b.1))
}
