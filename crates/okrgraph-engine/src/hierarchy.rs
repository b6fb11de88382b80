//! Hierarchy builder: derives a rooted forest from the relation set
//!
//! Only active relations of a hierarchical type produce edges. The
//! destination of a relation is the parent and the origin the child, so
//! `C contribuye_a A` nests C under A. An objective is a root when it is never
//! the origin of an accepted edge.
//!
//! The result is a DAG rendered top-down: an objective with several parents
//! appears once under each of them. Traversal is iterative, never descends
//! into an objective already on the current path, and stops at the configured
//! depth and node bounds.

use crate::error::{HierarchyError, TraversalLimit};
use okrgraph_domain::{
    style_for, EdgeStyle, Objective, ObjectiveId, ObjectiveRelation, RelationId, RelationType,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Edge from a parent to one nested child
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentEdge {
    /// Relation justifying the edge
    pub relation_id: RelationId,

    /// Type of that relation
    pub relation_type: RelationType,

    /// Weight of that relation
    pub weight: f64,

    /// Visual encoding of the edge
    pub style: EdgeStyle,
}

/// One occurrence of an objective in the forest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    /// The objective
    pub objective: Objective,

    /// Edge to the enclosing parent; `None` for roots
    pub via: Option<ParentEdge>,

    /// Every parent of this objective in the accepted edge set
    pub parents: Vec<ObjectiveId>,

    /// Accepted relations where this objective is the origin
    pub as_origin: Vec<RelationId>,

    /// Accepted relations where this objective is the destination
    pub as_destination: Vec<RelationId>,

    /// Nested children in relation order
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Objective identifier
    pub fn id(&self) -> ObjectiveId {
        self.objective.id
    }
}

/// Root objectives with their nested children
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forest {
    roots: Vec<HierarchyNode>,
}

impl Forest {
    /// Top-level nodes in objective creation order
    pub fn roots(&self) -> &[HierarchyNode] {
        &self.roots
    }

    /// Identifiers of the roots
    pub fn root_ids(&self) -> Vec<ObjectiveId> {
        self.roots.iter().map(HierarchyNode::id).collect()
    }

    /// Whether the forest has no nodes
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order walk yielding `(depth, node)`; roots have depth 1
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().map(|node| (1, node)).collect(),
        }
    }

    /// Total nodes, counting every occurrence of a multi-parent objective
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Deepest nesting level, 0 for an empty forest
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// How many times `id` occurs in the forest
    pub fn occurrences(&self, id: ObjectiveId) -> usize {
        self.walk().filter(|(_, node)| node.id() == id).count()
    }

    /// First occurrence of `id` in pre-order
    pub fn find(&self, id: ObjectiveId) -> Option<&HierarchyNode> {
        self.walk().map(|(_, node)| node).find(|node| node.id() == id)
    }
}

/// Pre-order iterator over a [`Forest`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a HierarchyNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Accepted edge stored on the parent's entry
#[derive(Debug, Clone, Copy)]
struct ChildLink {
    child: ObjectiveId,
    relation_id: RelationId,
    relation_type: RelationType,
    weight: f64,
}

/// Per-objective wrapper used while deriving the forest
#[derive(Debug)]
struct NodeEntry<'a> {
    objective: &'a Objective,
    children: Vec<ChildLink>,
    parents: Vec<ObjectiveId>,
    as_origin: Vec<RelationId>,
    as_destination: Vec<RelationId>,
}

/// Objective table with the accepted hierarchical edges attached
struct NodeTable<'a> {
    entries: HashMap<ObjectiveId, NodeEntry<'a>>,
    order: Vec<ObjectiveId>,
}

impl<'a> NodeTable<'a> {
    fn new(objectives: &'a [Objective], relations: &[ObjectiveRelation]) -> Self {
        let mut entries = HashMap::with_capacity(objectives.len());
        let mut order = Vec::with_capacity(objectives.len());
        for objective in objectives {
            if !entries.contains_key(&objective.id) {
                order.push(objective.id);
                entries.insert(
                    objective.id,
                    NodeEntry {
                        objective,
                        children: Vec::new(),
                        parents: Vec::new(),
                        as_origin: Vec::new(),
                        as_destination: Vec::new(),
                    },
                );
            }
        }

        let mut accepted: Vec<&ObjectiveRelation> = relations
            .iter()
            .filter(|r| r.state.is_active() && r.relation_type.is_hierarchical())
            .collect();
        accepted.sort_by_key(|r| r.id);

        let mut table = Self { entries, order };
        for relation in accepted {
            table.accept(relation);
        }
        table
    }

    fn accept(&mut self, relation: &ObjectiveRelation) {
        let (parent, child) = (relation.destination, relation.origin);
        if parent == child {
            tracing::warn!(relation = %relation.id, "skipping self relation");
            return;
        }
        if !self.entries.contains_key(&child) || !self.entries.contains_key(&parent) {
            tracing::warn!(
                relation = %relation.id,
                %parent,
                %child,
                "skipping relation to unknown objective"
            );
            return;
        }

        if let Some(entry) = self.entries.get_mut(&child) {
            entry.as_origin.push(relation.id);
        }
        if let Some(entry) = self.entries.get_mut(&parent) {
            entry.as_destination.push(relation.id);
            if entry.children.iter().any(|link| link.child == child) {
                tracing::debug!(
                    relation = %relation.id,
                    %parent,
                    %child,
                    "redundant hierarchical edge ignored"
                );
                return;
            }
            entry.children.push(ChildLink {
                child,
                relation_id: relation.id,
                relation_type: relation.relation_type,
                weight: relation.weight,
            });
        }
        if let Some(entry) = self.entries.get_mut(&child) {
            entry.parents.push(parent);
        }
    }

    fn has_parent(&self, id: ObjectiveId) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| !entry.parents.is_empty())
    }

    fn children(&self, id: ObjectiveId) -> &[ChildLink] {
        self.entries
            .get(&id)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    /// First cycle among the accepted edges, found by three-colour DFS
    fn find_cycle(&self) -> Option<Vec<ObjectiveId>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Colour {
            OnPath,
            Done,
        }

        let mut colour: HashMap<ObjectiveId, Colour> = HashMap::with_capacity(self.order.len());
        for &start in &self.order {
            if colour.contains_key(&start) {
                continue;
            }
            colour.insert(start, Colour::OnPath);
            let mut stack: Vec<(ObjectiveId, usize)> = vec![(start, 0)];

            while let Some(&(node, next)) = stack.last() {
                let children = self.children(node);
                if next == children.len() {
                    colour.insert(node, Colour::Done);
                    stack.pop();
                    continue;
                }
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }

                let child = children[next].child;
                match colour.get(&child) {
                    Some(Colour::OnPath) => {
                        let mut cycle: Vec<ObjectiveId> = stack
                            .iter()
                            .map(|(id, _)| *id)
                            .skip_while(|id| *id != child)
                            .collect();
                        cycle.push(child);
                        return Some(cycle);
                    }
                    Some(Colour::Done) => {}
                    None => {
                        colour.insert(child, Colour::OnPath);
                        stack.push((child, 0));
                    }
                }
            }
        }
        None
    }
}

/// Node under construction during materialization
struct Frame {
    id: ObjectiveId,
    via: Option<ParentEdge>,
    depth: usize,
    next_child: usize,
    children: Vec<HierarchyNode>,
}

/// Builds forests from objectives and objective relations
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    max_depth: usize,
    max_nodes: usize,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new(64, 10_000)
    }
}

impl HierarchyBuilder {
    /// Create a builder with the given traversal bounds
    pub fn new(max_depth: usize, max_nodes: usize) -> Self {
        Self {
            max_depth,
            max_nodes,
        }
    }

    /// Build the forest over every objective
    ///
    /// Roots are the objectives that are never the origin of an accepted
    /// edge, in the order `objectives` lists them.
    pub fn build(
        &self,
        objectives: &[Objective],
        relations: &[ObjectiveRelation],
    ) -> Result<Forest, HierarchyError> {
        let table = NodeTable::new(objectives, relations);
        let roots: Vec<ObjectiveId> = table
            .order
            .iter()
            .copied()
            .filter(|id| !table.has_parent(*id))
            .collect();

        self.finish(&table, &roots)
    }

    /// Build the forest hanging below a single objective
    ///
    /// The objective becomes the only root even if it has parents. An id that
    /// is not among `objectives` yields an empty forest.
    pub fn build_subtree(
        &self,
        root: ObjectiveId,
        objectives: &[Objective],
        relations: &[ObjectiveRelation],
    ) -> Result<Forest, HierarchyError> {
        let table = NodeTable::new(objectives, relations);
        if !table.entries.contains_key(&root) {
            return Ok(Forest::default());
        }
        self.finish(&table, &[root])
    }

    fn finish(
        &self,
        table: &NodeTable<'_>,
        roots: &[ObjectiveId],
    ) -> Result<Forest, HierarchyError> {
        let cycle = table.find_cycle();
        let (forest, limit) = self.materialize(table, roots);

        tracing::debug!(
            roots = forest.roots.len(),
            nodes = forest.node_count(),
            "hierarchy materialized"
        );

        if let Some(cycle) = cycle {
            tracing::warn!(cycle = ?cycle, "cycle in hierarchical relations");
            return Err(HierarchyError::CycleDetected {
                cycle,
                partial: Box::new(forest),
            });
        }
        if let Some(limit) = limit {
            tracing::warn!(%limit, "hierarchy traversal truncated");
            return Err(HierarchyError::LimitExceeded {
                limit,
                partial: Box::new(forest),
            });
        }
        Ok(forest)
    }

    /// Iterative depth-first construction of the nested nodes
    fn materialize(
        &self,
        table: &NodeTable<'_>,
        roots: &[ObjectiveId],
    ) -> (Forest, Option<TraversalLimit>) {
        let mut forest = Forest::default();
        let mut limit = None;
        let mut emitted = 0usize;

        for &root in roots {
            if emitted >= self.max_nodes {
                limit = Some(TraversalLimit::Nodes(self.max_nodes));
                break;
            }
            emitted += 1;

            let mut on_path: HashSet<ObjectiveId> = HashSet::from([root]);
            let mut stack = vec![Frame {
                id: root,
                via: None,
                depth: 1,
                next_child: 0,
                children: Vec::new(),
            }];

            while let Some(frame) = stack.last_mut() {
                let links = table.children(frame.id);
                if frame.next_child < links.len() {
                    let link = links[frame.next_child];
                    frame.next_child += 1;

                    if on_path.contains(&link.child) {
                        continue;
                    }
                    if frame.depth >= self.max_depth {
                        limit = Some(TraversalLimit::Depth(self.max_depth));
                        continue;
                    }
                    if emitted >= self.max_nodes {
                        limit = Some(TraversalLimit::Nodes(self.max_nodes));
                        continue;
                    }
                    emitted += 1;

                    let depth = frame.depth + 1;
                    on_path.insert(link.child);
                    stack.push(Frame {
                        id: link.child,
                        via: Some(ParentEdge {
                            relation_id: link.relation_id,
                            relation_type: link.relation_type,
                            weight: link.weight,
                            style: style_for(link.relation_type, link.weight),
                        }),
                        depth,
                        next_child: 0,
                        children: Vec::new(),
                    });
                    continue;
                }

                // All children handled: close this frame
                let Some(done) = stack.pop() else { break };
                on_path.remove(&done.id);
                let Some(entry) = table.entries.get(&done.id) else {
                    continue;
                };
                let node = HierarchyNode {
                    objective: entry.objective.clone(),
                    via: done.via,
                    parents: entry.parents.clone(),
                    as_origin: entry.as_origin.clone(),
                    as_destination: entry.as_destination.clone(),
                    children: done.children,
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => forest.roots.push(node),
                }
            }
        }

        (forest, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okrgraph_domain::{Level, ObjectiveStatus, OwnerId, RelationState};

    fn objective(id: i64) -> Objective {
        Objective {
            id: ObjectiveId::new(id),
            title: format!("Objective {}", id),
            description: String::new(),
            level: Level::Team,
            status: ObjectiveStatus::Active,
            owner_id: OwnerId::new(1),
        }
    }

    fn relation(
        id: i64,
        origin: i64,
        destination: i64,
        relation_type: RelationType,
    ) -> ObjectiveRelation {
        ObjectiveRelation {
            id: RelationId::new(id),
            origin: ObjectiveId::new(origin),
            destination: ObjectiveId::new(destination),
            relation_type,
            weight: 0.5,
            description: None,
            state: RelationState::Active,
        }
    }

    fn ids(values: &[i64]) -> Vec<ObjectiveId> {
        values.iter().copied().map(ObjectiveId::new).collect()
    }

    #[test]
    fn test_root_derivation() {
        let objectives = vec![objective(1), objective(2), objective(3)];
        let relations = vec![relation(1, 3, 1, RelationType::ContributesTo)];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();

        assert_eq!(forest.root_ids(), ids(&[1, 2]));
        let a = &forest.roots()[0];
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children[0].id(), ObjectiveId::new(3));
        let via = a.children[0].via.as_ref().unwrap();
        assert_eq!(via.relation_type, RelationType::ContributesTo);
        assert_eq!(via.style.thickness, 2);
        assert_eq!(a.children[0].parents, ids(&[1]));
        assert_eq!(a.as_destination, vec![RelationId::new(1)]);
        assert!(a.as_origin.is_empty());
        assert_eq!(a.children[0].as_origin, vec![RelationId::new(1)]);
        assert!(forest.roots()[1].as_destination.is_empty());
    }

    #[test]
    fn test_informational_relations_excluded() {
        let objectives = vec![objective(1), objective(2)];
        let relations = vec![
            relation(1, 2, 1, RelationType::Blocks),
            relation(2, 1, 2, RelationType::Follows),
        ];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();

        assert_eq!(forest.root_ids(), ids(&[1, 2]));
        assert_eq!(forest.node_count(), 2);
    }

    #[test]
    fn test_retired_relations_excluded() {
        let objectives = vec![objective(1), objective(2)];
        let mut retired = relation(1, 2, 1, RelationType::ContributesTo);
        retired.state = RelationState::Retired;

        let forest = HierarchyBuilder::default().build(&objectives, &[retired]).unwrap();
        assert_eq!(forest.root_ids(), ids(&[1, 2]));
    }

    #[test]
    fn test_redundant_edges_between_same_pair_collapse() {
        let objectives = vec![objective(1), objective(2)];
        let relations = vec![
            relation(1, 2, 1, RelationType::ContributesTo),
            relation(2, 2, 1, RelationType::AlignedWith),
        ];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();

        assert_eq!(forest.roots()[0].children.len(), 1);
        let via = forest.roots()[0].children[0].via.as_ref().unwrap();
        assert_eq!(via.relation_id, RelationId::new(1), "lowest relation id wins");
        assert_eq!(
            forest.roots()[0].as_destination,
            vec![RelationId::new(1), RelationId::new(2)]
        );
    }

    #[test]
    fn test_multi_parent_appears_under_each_parent() {
        let objectives = vec![objective(1), objective(2), objective(3)];
        let relations = vec![
            relation(1, 3, 1, RelationType::ContributesTo),
            relation(2, 3, 2, RelationType::DependsOn),
        ];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();

        assert_eq!(forest.root_ids(), ids(&[1, 2]));
        assert_eq!(forest.occurrences(ObjectiveId::new(3)), 2);
        assert_eq!(forest.find(ObjectiveId::new(3)).unwrap().parents, ids(&[1, 2]));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // 2 and 3 under 1, 4 under both 2 and 3
        let objectives = vec![objective(1), objective(2), objective(3), objective(4)];
        let relations = vec![
            relation(1, 2, 1, RelationType::ContributesTo),
            relation(2, 3, 1, RelationType::ContributesTo),
            relation(3, 4, 2, RelationType::ContributesTo),
            relation(4, 4, 3, RelationType::ContributesTo),
        ];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();

        assert_eq!(forest.root_ids(), ids(&[1]));
        assert_eq!(forest.node_count(), 5);
        assert_eq!(forest.depth(), 3);
    }

    #[test]
    fn test_two_node_cycle_terminates() {
        let objectives = vec![objective(1), objective(2)];
        let relations = vec![
            relation(1, 1, 2, RelationType::ContributesTo),
            relation(2, 2, 1, RelationType::ContributesTo),
        ];

        let err = HierarchyBuilder::default()
            .build(&objectives, &relations)
            .unwrap_err();

        match err {
            HierarchyError::CycleDetected { cycle, partial } => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 3);
                assert!(partial.is_empty(), "both objectives have a parent");
            }
            other => panic!("Expected CycleDetected, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_below_a_root_keeps_partial_forest() {
        // 1 is a root; 2 under 1; 3 under 2; 2 under 3 closes a loop
        let objectives = vec![objective(1), objective(2), objective(3)];
        let relations = vec![
            relation(1, 2, 1, RelationType::ContributesTo),
            relation(2, 3, 2, RelationType::ContributesTo),
            relation(3, 2, 3, RelationType::DependsOn),
        ];

        let err = HierarchyBuilder::default()
            .build(&objectives, &relations)
            .unwrap_err();

        let partial = err.partial();
        assert_eq!(partial.root_ids(), ids(&[1]));
        assert_eq!(partial.node_count(), 3, "1 -> 2 -> 3 with the back edge dropped");
        assert!(matches!(err, HierarchyError::CycleDetected { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let objectives: Vec<_> = (1..=5).map(objective).collect();
        let relations: Vec<_> = (2..=5)
            .map(|i| relation(i, i, i - 1, RelationType::ContributesTo))
            .collect();

        let err = HierarchyBuilder::new(3, 100)
            .build(&objectives, &relations)
            .unwrap_err();

        match err {
            HierarchyError::LimitExceeded { limit, partial } => {
                assert_eq!(limit, TraversalLimit::Depth(3));
                assert_eq!(partial.depth(), 3);
            }
            other => panic!("Expected LimitExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_node_limit() {
        let objectives: Vec<_> = (1..=4).map(objective).collect();

        let err = HierarchyBuilder::new(10, 2).build(&objectives, &[]).unwrap_err();

        assert_eq!(err.partial().node_count(), 2);
        assert!(matches!(
            err,
            HierarchyError::LimitExceeded {
                limit: TraversalLimit::Nodes(2),
                ..
            }
        ));
    }

    #[test]
    fn test_subtree_roots_at_requested_objective() {
        let objectives = vec![objective(1), objective(2), objective(3)];
        let relations = vec![
            relation(1, 2, 1, RelationType::ContributesTo),
            relation(2, 3, 2, RelationType::ContributesTo),
        ];

        let forest = HierarchyBuilder::default()
            .build_subtree(ObjectiveId::new(2), &objectives, &relations)
            .unwrap();

        assert_eq!(forest.root_ids(), ids(&[2]));
        assert!(forest.roots()[0].via.is_none());
        assert_eq!(forest.node_count(), 2);

        let empty = HierarchyBuilder::default()
            .build_subtree(ObjectiveId::new(9), &objectives, &relations)
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_relations_to_unknown_objectives_skipped() {
        let objectives = vec![objective(1)];
        let relations = vec![relation(1, 1, 42, RelationType::ContributesTo)];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();
        assert_eq!(forest.root_ids(), ids(&[1]));
    }

    #[test]
    fn test_walk_is_pre_order() {
        let objectives = vec![objective(1), objective(2), objective(3), objective(4)];
        let relations = vec![
            relation(1, 2, 1, RelationType::ContributesTo),
            relation(2, 3, 2, RelationType::ContributesTo),
            relation(3, 4, 1, RelationType::ContributesTo),
        ];

        let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();
        let visited: Vec<_> = forest.walk().map(|(depth, n)| (depth, n.id().value())).collect();

        assert_eq!(visited, vec![(1, 1), (2, 2), (3, 3), (2, 4)]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use okrgraph_domain::{Level, ObjectiveStatus, OwnerId, RelationState};
    use proptest::prelude::*;

    fn objective(id: i64) -> Objective {
        Objective {
            id: ObjectiveId::new(id),
            title: String::new(),
            description: String::new(),
            level: Level::Company,
            status: ObjectiveStatus::Active,
            owner_id: OwnerId::new(0),
        }
    }

    proptest! {
        /// Property: building always terminates and every root has no parent,
        /// whatever the (possibly cyclic) relation set
        #[test]
        fn test_build_terminates(
            edges in prop::collection::vec((1i64..8, 1i64..8, 0usize..5), 0..24)
        ) {
            let objectives: Vec<_> = (1..8).map(objective).collect();
            let relations: Vec<_> = edges
                .iter()
                .enumerate()
                .map(|(i, (origin, destination, kind))| ObjectiveRelation {
                    id: RelationId::new(i as i64 + 1),
                    origin: ObjectiveId::new(*origin),
                    destination: ObjectiveId::new(*destination),
                    relation_type: RelationType::ALL[*kind],
                    weight: 0.5,
                    description: None,
                    state: RelationState::Active,
                })
                .collect();

            let forest = match HierarchyBuilder::new(16, 5_000).build(&objectives, &relations) {
                Ok(forest) => forest,
                Err(e) => e.into_partial(),
            };

            for root in forest.roots() {
                prop_assert!(root.parents.is_empty());
            }
            prop_assert!(forest.depth() <= 16);
        }

        /// Property: without hierarchical edges every objective is a root
        #[test]
        fn test_informational_only_yields_flat_forest(
            edges in prop::collection::vec((1i64..6, 1i64..6, 3usize..5), 0..12)
        ) {
            let objectives: Vec<_> = (1..6).map(objective).collect();
            let relations: Vec<_> = edges
                .iter()
                .enumerate()
                .map(|(i, (origin, destination, kind))| ObjectiveRelation {
                    id: RelationId::new(i as i64 + 1),
                    origin: ObjectiveId::new(*origin),
                    destination: ObjectiveId::new(*destination),
                    relation_type: RelationType::ALL[*kind],
                    weight: 1.0,
                    description: None,
                    state: RelationState::Active,
                })
                .collect();

            let forest = HierarchyBuilder::default().build(&objectives, &relations).unwrap();
            prop_assert_eq!(forest.node_count(), 5);
            prop_assert_eq!(forest.depth(), 1);
        }
    }
}
