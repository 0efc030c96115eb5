//! Preconditions for running an effectiveness regression.

use crate::domain::hedging::{relationship::is_set_reference, HedgeRelationship};

use super::{
    ValidationReport, HEDGED_ITEMS_REQUIRED_MESSAGE, HEDGING_ITEMS_REQUIRED_MESSAGE,
    PROSPECTIVE_METHOD_REQUIRED_MESSAGE, REPORT_CURRENCY_REQUIRED_MESSAGE,
    RETROSPECTIVE_METHOD_REQUIRED_MESSAGE,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionRequirementsValidator;

impl RegressionRequirementsValidator {
    pub fn validate(relationship: &HedgeRelationship) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require(
            is_set_reference(relationship.prospective_effectiveness_method_id),
            PROSPECTIVE_METHOD_REQUIRED_MESSAGE,
        );
        report.require(
            is_set_reference(relationship.retrospective_effectiveness_method_id),
            RETROSPECTIVE_METHOD_REQUIRED_MESSAGE,
        );
        report.require(
            !relationship.hedged_items.is_empty(),
            HEDGED_ITEMS_REQUIRED_MESSAGE,
        );
        report.require(
            !relationship.hedging_items.is_empty(),
            HEDGING_ITEMS_REQUIRED_MESSAGE,
        );
        report.require(
            relationship.has_report_currency(),
            REPORT_CURRENCY_REQUIRED_MESSAGE,
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hedging::rules::fixtures::designatable;

    #[test]
    fn designatable_relationship_can_regress() {
        assert!(RegressionRequirementsValidator::validate(&designatable()).is_valid());
    }

    #[test]
    fn none_currency_sentinel_blocks_regression() {
        let mut rel = designatable();
        rel.report_currency = Some("None".to_string());
        let report = RegressionRequirementsValidator::validate(&rel);
        assert_eq!(report.errors(), &[REPORT_CURRENCY_REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn zero_method_ids_block_regression() {
        let mut rel = designatable();
        rel.prospective_effectiveness_method_id = Some(0);
        rel.retrospective_effectiveness_method_id = None;
        let report = RegressionRequirementsValidator::validate(&rel);
        assert!(report.mentions(PROSPECTIVE_METHOD_REQUIRED_MESSAGE));
        assert!(report.mentions(RETROSPECTIVE_METHOD_REQUIRED_MESSAGE));
    }
}
