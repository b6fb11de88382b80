//! Relation validation logic

use crate::{ValidationConfig, ValidationError};
use okrgraph_domain::{
    KeyResultRelationDraft, NewKeyResultRelation, NewObjectiveRelation, ObjectiveRelationDraft,
    RelationType,
};

/// Domain of weights and contribution weights
const WEIGHT_RANGE: (f64, f64) = (0.0, 1.0);

/// Domain of impact percentages
const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);

/// An objective relation that passed validation
///
/// Only the Gatekeeper can construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidObjectiveRelation(NewObjectiveRelation);

impl ValidObjectiveRelation {
    /// Borrow the checked relation
    pub fn relation(&self) -> &NewObjectiveRelation {
        &self.0
    }

    /// Unwrap the checked relation
    pub fn into_inner(self) -> NewObjectiveRelation {
        self.0
    }
}

/// A key-result relation that passed validation
///
/// Only the Gatekeeper can construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidKeyResultRelation(NewKeyResultRelation);

impl ValidKeyResultRelation {
    /// Borrow the checked relation
    pub fn relation(&self) -> &NewKeyResultRelation {
        &self.0
    }

    /// Unwrap the checked relation
    pub fn into_inner(self) -> NewKeyResultRelation {
        self.0
    }
}

/// The Gatekeeper validates relations before storage
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a request to relate two objectives
    ///
    /// Checks run in order: relation type, self-relation, weight,
    /// description. The first failure is returned.
    pub fn validate_objective_relation(
        &self,
        draft: &ObjectiveRelationDraft,
    ) -> Result<ValidObjectiveRelation, ValidationError> {
        let relation_type = Self::relation_type(&draft.relation_type)?;

        if draft.origin == draft.destination {
            return Err(ValidationError::SelfRelation(draft.origin));
        }

        Self::check_range("weight", draft.weight, WEIGHT_RANGE)?;
        let description = self.description(draft.description.as_deref())?;

        Ok(ValidObjectiveRelation(NewObjectiveRelation {
            origin: draft.origin,
            destination: draft.destination,
            relation_type,
            weight: draft.weight,
            description,
        }))
    }

    /// Validate a request to relate an objective and a key result
    pub fn validate_key_result_relation(
        &self,
        draft: &KeyResultRelationDraft,
    ) -> Result<ValidKeyResultRelation, ValidationError> {
        let relation_type = Self::relation_type(&draft.relation_type)?;

        Self::check_range("contribution weight", draft.contribution_weight, WEIGHT_RANGE)?;
        Self::check_range("impact percentage", draft.impact_percent, PERCENT_RANGE)?;
        let description = self.description(draft.description.as_deref())?;

        Ok(ValidKeyResultRelation(NewKeyResultRelation {
            objective_id: draft.objective_id,
            key_result_id: draft.key_result_id,
            relation_type,
            contribution_weight: draft.contribution_weight,
            impact_percent: draft.impact_percent,
            description,
        }))
    }

    fn relation_type(name: &str) -> Result<RelationType, ValidationError> {
        RelationType::parse(name)
            .ok_or_else(|| ValidationError::UnknownRelationType(name.to_string()))
    }

    /// Inclusive range check; NaN fails every comparison and is rejected
    fn check_range(
        field: &'static str,
        value: f64,
        (min, max): (f64, f64),
    ) -> Result<(), ValidationError> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }

    fn description(&self, description: Option<&str>) -> Result<Option<String>, ValidationError> {
        let Some(raw) = description else {
            return Ok(None);
        };

        let text = if self.config.normalize_descriptions {
            raw.trim()
        } else {
            raw
        };
        if self.config.normalize_descriptions && text.is_empty() {
            return Ok(None);
        }

        let len = text.chars().count();
        if len > self.config.max_description_length {
            return Err(ValidationError::DescriptionTooLong {
                len,
                max: self.config.max_description_length,
            });
        }

        Ok(Some(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okrgraph_domain::{KeyResultId, ObjectiveId};

    fn objective_draft(weight: f64) -> ObjectiveRelationDraft {
        ObjectiveRelationDraft {
            origin: ObjectiveId::new(2),
            destination: ObjectiveId::new(1),
            relation_type: "contribuye_a".to_string(),
            weight,
            description: Some("  supports the company goal ".to_string()),
        }
    }

    fn key_result_draft(weight: f64, impact: f64) -> KeyResultRelationDraft {
        KeyResultRelationDraft {
            objective_id: ObjectiveId::new(1),
            key_result_id: KeyResultId::new(4),
            relation_type: "depende_de".to_string(),
            contribution_weight: weight,
            impact_percent: impact,
            description: None,
        }
    }

    #[test]
    fn test_valid_relation() {
        let gatekeeper = Gatekeeper::default_config();
        let valid = gatekeeper
            .validate_objective_relation(&objective_draft(0.5))
            .unwrap();

        assert_eq!(valid.relation().relation_type, RelationType::ContributesTo);
        assert_eq!(
            valid.relation().description.as_deref(),
            Some("supports the company goal")
        );
    }

    #[test]
    fn test_self_relation_rejected() {
        let gatekeeper = Gatekeeper::default_config();
        let mut draft = objective_draft(0.5);
        draft.origin = draft.destination;

        assert_eq!(
            gatekeeper.validate_objective_relation(&draft),
            Err(ValidationError::SelfRelation(ObjectiveId::new(1)))
        );
    }

    #[test]
    fn test_weight_boundaries() {
        let gatekeeper = Gatekeeper::default_config();
        for weight in [0.0, 0.9999, 1.0] {
            assert!(
                gatekeeper.validate_objective_relation(&objective_draft(weight)).is_ok(),
                "weight {} should be accepted",
                weight
            );
        }
        for weight in [-0.0001, 1.0001, f64::NAN, f64::INFINITY] {
            match gatekeeper.validate_objective_relation(&objective_draft(weight)) {
                Err(ValidationError::OutOfRange { field, .. }) => assert_eq!(field, "weight"),
                other => panic!("weight {} should be rejected, got {:?}", weight, other),
            }
        }
    }

    #[test]
    fn test_impact_percentage_boundaries() {
        let gatekeeper = Gatekeeper::default_config();
        assert!(gatekeeper.validate_key_result_relation(&key_result_draft(1.0, 0.0)).is_ok());
        assert!(gatekeeper.validate_key_result_relation(&key_result_draft(0.0, 100.0)).is_ok());

        match gatekeeper.validate_key_result_relation(&key_result_draft(0.5, 100.5)) {
            Err(ValidationError::OutOfRange { field, max, .. }) => {
                assert_eq!(field, "impact percentage");
                assert_eq!(max, 100.0);
            }
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
        assert!(gatekeeper.validate_key_result_relation(&key_result_draft(1.5, 50.0)).is_err());
    }

    #[test]
    fn test_unknown_relation_type() {
        let gatekeeper = Gatekeeper::default_config();
        let mut draft = objective_draft(0.5);
        draft.relation_type = "parent_of".to_string();

        assert_eq!(
            gatekeeper.validate_objective_relation(&draft),
            Err(ValidationError::UnknownRelationType("parent_of".to_string()))
        );
    }

    #[test]
    fn test_type_checked_before_self_relation() {
        let gatekeeper = Gatekeeper::default_config();
        let mut draft = objective_draft(7.0);
        draft.origin = draft.destination;
        draft.relation_type = "nonsense".to_string();

        assert!(matches!(
            gatekeeper.validate_objective_relation(&draft),
            Err(ValidationError::UnknownRelationType(_))
        ));
    }

    #[test]
    fn test_description_limits() {
        let gatekeeper = Gatekeeper::new(ValidationConfig {
            max_description_length: 5,
            normalize_descriptions: true,
        });

        let mut draft = objective_draft(0.5);
        draft.description = Some("   ".to_string());
        let valid = gatekeeper.validate_objective_relation(&draft).unwrap();
        assert_eq!(valid.into_inner().description, None);

        draft.description = Some("too long".to_string());
        assert_eq!(
            gatekeeper.validate_objective_relation(&draft),
            Err(ValidationError::DescriptionTooLong { len: 8, max: 5 })
        );
    }
}
