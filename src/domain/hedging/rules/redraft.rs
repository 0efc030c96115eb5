//! Preconditions for {Designated, Dedesignated} -> Draft.

use crate::domain::hedging::{HedgeRelationship, HedgeState};

use super::ValidationReport;

#[derive(Debug, Clone, Copy, Default)]
pub struct RedraftValidator;

impl RedraftValidator {
    pub fn validate(relationship: &HedgeRelationship) -> ValidationReport {
        let mut report = ValidationReport::new();
        if !matches!(
            relationship.hedge_state,
            HedgeState::Designated | HedgeState::Dedesignated
        ) {
            report.push_error(format!(
                "Cannot redraft hedge relationship in '{}' state. Only Designated or De-Designated relationships can be redrafted.",
                relationship.hedge_state
            ));
        }
        report
    }
}
