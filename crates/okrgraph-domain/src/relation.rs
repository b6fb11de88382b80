//! Relations between objectives and key results
//!
//! Relations are pairwise, directed and typed. The direction always reads
//! "origin <type> destination": `C contribuye_a A` means C contributes to A,
//! which makes A the parent of C when the forest is derived.

use crate::{KeyResultId, ObjectiveId, RelationId};
use std::fmt;

/// Type of relation; the one vocabulary shared by objective relations,
/// key-result relations, the hierarchy builder and the edge style mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationType {
    /// Origin contributes to (is a sub-driver of) destination
    #[cfg_attr(feature = "serde", serde(rename = "contribuye_a"))]
    ContributesTo,

    /// Origin depends on destination completing first
    #[cfg_attr(feature = "serde", serde(rename = "depende_de"))]
    DependsOn,

    /// Origin is strategically aligned under destination
    #[cfg_attr(feature = "serde", serde(rename = "alineado_con"))]
    AlignedWith,

    /// Origin blocks destination (informational only)
    #[cfg_attr(feature = "serde", serde(rename = "bloquea_a"))]
    Blocks,

    /// Origin follows destination in sequence (informational only)
    #[cfg_attr(feature = "serde", serde(rename = "sucede_a"))]
    Follows,
}

impl RelationType {
    /// Every relation type, hierarchical ones first
    pub const ALL: [RelationType; 5] = [
        RelationType::ContributesTo,
        RelationType::DependsOn,
        RelationType::AlignedWith,
        RelationType::Blocks,
        RelationType::Follows,
    ];

    /// Wire name as stored in the relation tables
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::ContributesTo => "contribuye_a",
            RelationType::DependsOn => "depende_de",
            RelationType::AlignedWith => "alineado_con",
            RelationType::Blocks => "bloquea_a",
            RelationType::Follows => "sucede_a",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            RelationType::ContributesTo => "contributes to",
            RelationType::DependsOn => "depends on",
            RelationType::AlignedWith => "aligned with",
            RelationType::Blocks => "blocks",
            RelationType::Follows => "follows",
        }
    }

    /// Parse a relation type from its wire name or English snake-case name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "contribuye_a" | "contributes_to" => Some(RelationType::ContributesTo),
            "depende_de" | "depends_on" => Some(RelationType::DependsOn),
            "alineado_con" | "aligned_with" => Some(RelationType::AlignedWith),
            "bloquea_a" | "blocks" => Some(RelationType::Blocks),
            "sucede_a" | "follows" => Some(RelationType::Follows),
            _ => None,
        }
    }

    /// Whether this type participates in parent/child derivation
    pub fn is_hierarchical(&self) -> bool {
        matches!(
            self,
            RelationType::ContributesTo | RelationType::DependsOn | RelationType::AlignedWith
        )
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown relation type: {}", s))
    }
}

/// Lifecycle of a relation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelationState {
    /// Live relation; counts toward the natural-key uniqueness rule
    Active,

    /// Soft-deleted; kept for history only
    Retired,
}

impl RelationState {
    /// Get the state name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationState::Active => "active",
            RelationState::Retired => "retired",
        }
    }

    /// Parse a state from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(RelationState::Active),
            "retired" => Some(RelationState::Retired),
            _ => None,
        }
    }

    /// Whether the relation is live
    pub fn is_active(&self) -> bool {
        *self == RelationState::Active
    }
}

/// Which relation rows a read should see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleScope {
    /// Only live relations
    #[default]
    ActiveOnly,

    /// Live and retired relations (history views)
    IncludingRetired,
}

/// Natural key of an objective relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectiveRelationKey {
    /// Origin objective
    pub origin: ObjectiveId,
    /// Destination objective
    pub destination: ObjectiveId,
    /// Relation type
    pub relation_type: RelationType,
}

impl fmt::Display for ObjectiveRelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.origin, self.destination, self.relation_type)
    }
}

/// Natural key of a key-result relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyResultRelationKey {
    /// Objective side
    pub objective_id: ObjectiveId,
    /// Key result side
    pub key_result_id: KeyResultId,
    /// Relation type
    pub relation_type: RelationType,
}

impl fmt::Display for KeyResultRelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.objective_id, self.key_result_id, self.relation_type
        )
    }
}

/// A stored relation between two objectives
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveRelation {
    /// Row identifier
    pub id: RelationId,

    /// Origin objective (the child / contributor in hierarchical types)
    pub origin: ObjectiveId,

    /// Destination objective (the parent in hierarchical types)
    pub destination: ObjectiveId,

    /// Relation type
    pub relation_type: RelationType,

    /// Strength of the relation [0.0, 1.0]
    pub weight: f64,

    /// Optional free-form note
    pub description: Option<String>,

    /// Lifecycle state
    pub state: RelationState,
}

impl ObjectiveRelation {
    /// Natural key of this relation
    pub fn key(&self) -> ObjectiveRelationKey {
        ObjectiveRelationKey {
            origin: self.origin,
            destination: self.destination,
            relation_type: self.relation_type,
        }
    }

    /// Whether either end is `id`
    pub fn touches(&self, id: ObjectiveId) -> bool {
        self.origin == id || self.destination == id
    }
}

/// A stored relation between an objective and a key result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyResultRelation {
    /// Row identifier
    pub id: RelationId,

    /// Objective side
    pub objective_id: ObjectiveId,

    /// Key result side
    pub key_result_id: KeyResultId,

    /// Relation type
    pub relation_type: RelationType,

    /// Share of the objective this key result drives [0.0, 1.0]
    pub contribution_weight: f64,

    /// Expected impact in percent [0.0, 100.0]
    pub impact_percent: f64,

    /// Optional free-form note
    pub description: Option<String>,

    /// Lifecycle state
    pub state: RelationState,
}

impl KeyResultRelation {
    /// Natural key of this relation
    pub fn key(&self) -> KeyResultRelationKey {
        KeyResultRelationKey {
            objective_id: self.objective_id,
            key_result_id: self.key_result_id,
            relation_type: self.relation_type,
        }
    }
}

/// Unchecked request to relate two objectives, as received from a caller
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveRelationDraft {
    /// Origin objective
    pub origin: ObjectiveId,
    /// Destination objective
    pub destination: ObjectiveId,
    /// Relation type name, not yet checked against the taxonomy
    pub relation_type: String,
    /// Requested weight
    pub weight: f64,
    /// Optional note
    pub description: Option<String>,
}

/// Unchecked request to relate an objective and a key result
#[derive(Debug, Clone, PartialEq)]
pub struct KeyResultRelationDraft {
    /// Objective side
    pub objective_id: ObjectiveId,
    /// Key result side
    pub key_result_id: KeyResultId,
    /// Relation type name, not yet checked against the taxonomy
    pub relation_type: String,
    /// Requested contribution weight
    pub contribution_weight: f64,
    /// Requested impact percentage
    pub impact_percent: f64,
    /// Optional note
    pub description: Option<String>,
}

/// Typed objective relation ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewObjectiveRelation {
    /// Origin objective
    pub origin: ObjectiveId,
    /// Destination objective
    pub destination: ObjectiveId,
    /// Relation type
    pub relation_type: RelationType,
    /// Weight [0.0, 1.0]
    pub weight: f64,
    /// Optional note
    pub description: Option<String>,
}

impl NewObjectiveRelation {
    /// Natural key of the relation to be written
    pub fn key(&self) -> ObjectiveRelationKey {
        ObjectiveRelationKey {
            origin: self.origin,
            destination: self.destination,
            relation_type: self.relation_type,
        }
    }

    /// Attach the row id assigned by the store; new relations are active
    pub fn into_relation(self, id: RelationId) -> ObjectiveRelation {
        ObjectiveRelation {
            id,
            origin: self.origin,
            destination: self.destination,
            relation_type: self.relation_type,
            weight: self.weight,
            description: self.description,
            state: RelationState::Active,
        }
    }
}

/// Typed key-result relation ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewKeyResultRelation {
    /// Objective side
    pub objective_id: ObjectiveId,
    /// Key result side
    pub key_result_id: KeyResultId,
    /// Relation type
    pub relation_type: RelationType,
    /// Contribution weight [0.0, 1.0]
    pub contribution_weight: f64,
    /// Impact percentage [0.0, 100.0]
    pub impact_percent: f64,
    /// Optional note
    pub description: Option<String>,
}

impl NewKeyResultRelation {
    /// Natural key of the relation to be written
    pub fn key(&self) -> KeyResultRelationKey {
        KeyResultRelationKey {
            objective_id: self.objective_id,
            key_result_id: self.key_result_id,
            relation_type: self.relation_type,
        }
    }

    /// Attach the row id assigned by the store; new relations are active
    pub fn into_relation(self, id: RelationId) -> KeyResultRelation {
        KeyResultRelation {
            id,
            objective_id: self.objective_id,
            key_result_id: self.key_result_id,
            relation_type: self.relation_type,
            contribution_weight: self.contribution_weight,
            impact_percent: self.impact_percent,
            description: self.description,
            state: RelationState::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_classification() {
        let hierarchical: Vec<_> = RelationType::ALL
            .iter()
            .filter(|t| t.is_hierarchical())
            .collect();
        assert_eq!(
            hierarchical,
            vec![
                &RelationType::ContributesTo,
                &RelationType::DependsOn,
                &RelationType::AlignedWith
            ]
        );
        assert!(!RelationType::Blocks.is_hierarchical());
        assert!(!RelationType::Follows.is_hierarchical());
    }

    #[test]
    fn test_wire_names_roundtrip() {
        for relation_type in RelationType::ALL {
            assert_eq!(RelationType::parse(relation_type.as_str()), Some(relation_type));
        }
    }

    #[test]
    fn test_parse_accepts_english_names() {
        assert_eq!(RelationType::parse("depends_on"), Some(RelationType::DependsOn));
        assert_eq!(RelationType::parse(" Bloquea_A "), Some(RelationType::Blocks));
        assert_eq!(RelationType::parse("parent_of"), None);
        assert!("".parse::<RelationType>().is_err());
    }

    #[test]
    fn test_lifecycle_scope() {
        assert_eq!(LifecycleScope::default(), LifecycleScope::ActiveOnly);
    }

    #[test]
    fn test_new_relation_is_active() {
        let new = NewObjectiveRelation {
            origin: ObjectiveId::new(3),
            destination: ObjectiveId::new(1),
            relation_type: RelationType::ContributesTo,
            weight: 0.5,
            description: None,
        };
        let key = new.key();
        let relation = new.into_relation(RelationId::new(9));

        assert_eq!(relation.state, RelationState::Active);
        assert_eq!(relation.key(), key);
        assert!(relation.touches(ObjectiveId::new(1)));
        assert!(!relation.touches(ObjectiveId::new(2)));
    }
}
