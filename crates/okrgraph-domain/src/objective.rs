//! Objectives and key results

use crate::{KeyResultId, ObjectiveId, OwnerId};

/// Organizational level an objective is set at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Level {
    /// Company-wide objective
    Company,

    /// Department objective
    Department,

    /// Team objective
    Team,
}

impl Level {
    /// Get the level name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Company => "company",
            Level::Department => "department",
            Level::Team => "team",
        }
    }

    /// Parse a level from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "company" | "empresa" => Some(Level::Company),
            "department" | "departamento" => Some(Level::Department),
            "team" | "equipo" => Some(Level::Team),
            _ => None,
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid level: {}", s))
    }
}

/// Progress status of an objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectiveStatus {
    /// Being drafted, not yet committed to
    Draft,

    /// In progress
    Active,

    /// In progress but unlikely to be met
    AtRisk,

    /// Met
    Completed,

    /// Closed without further tracking
    Closed,
}

impl ObjectiveStatus {
    /// Get the status name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveStatus::Draft => "draft",
            ObjectiveStatus::Active => "active",
            ObjectiveStatus::AtRisk => "at_risk",
            ObjectiveStatus::Completed => "completed",
            ObjectiveStatus::Closed => "closed",
        }
    }

    /// Parse a status from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" | "borrador" => Some(ObjectiveStatus::Draft),
            "active" | "activo" => Some(ObjectiveStatus::Active),
            "at_risk" | "en_riesgo" => Some(ObjectiveStatus::AtRisk),
            "completed" | "completado" => Some(ObjectiveStatus::Completed),
            "closed" | "cerrado" => Some(ObjectiveStatus::Closed),
            _ => None,
        }
    }
}

impl std::str::FromStr for ObjectiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid objective status: {}", s))
    }
}

/// A stored objective
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Unique identifier
    pub id: ObjectiveId,

    /// Short title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Organizational level
    pub level: Level,

    /// Progress status
    pub status: ObjectiveStatus,

    /// Person responsible
    pub owner_id: OwnerId,
}

/// An objective that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewObjective {
    /// Short title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Organizational level
    pub level: Level,

    /// Initial status
    pub status: ObjectiveStatus,

    /// Person responsible
    pub owner_id: OwnerId,
}

impl NewObjective {
    /// Create an active objective with an empty description
    pub fn new(title: impl Into<String>, level: Level, owner_id: OwnerId) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            level,
            status: ObjectiveStatus::Active,
            owner_id,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the identifier assigned by the store
    pub fn into_objective(self, id: ObjectiveId) -> Objective {
        Objective {
            id,
            title: self.title,
            description: self.description,
            level: self.level,
            status: self.status,
            owner_id: self.owner_id,
        }
    }
}

/// A stored key result, owned by exactly one objective
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyResult {
    /// Unique identifier
    pub id: KeyResultId,

    /// Owning objective
    pub objective_id: ObjectiveId,

    /// What is measured
    pub description: String,

    /// Target value of the measure
    pub target_value: f64,

    /// Unit label of the measure (e.g. "%", "EUR", "clients")
    pub unit: String,
}

/// A key result that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewKeyResult {
    /// Owning objective
    pub objective_id: ObjectiveId,

    /// What is measured
    pub description: String,

    /// Target value of the measure
    pub target_value: f64,

    /// Unit label of the measure
    pub unit: String,
}

impl NewKeyResult {
    /// Attach the identifier assigned by the store
    pub fn into_key_result(self, id: KeyResultId) -> KeyResult {
        KeyResult {
            id,
            objective_id: self.objective_id,
            description: self.description,
            target_value: self.target_value,
            unit: self.unit,
        }
    }
}
