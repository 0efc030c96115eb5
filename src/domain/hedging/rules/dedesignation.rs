//! Preconditions for Designated -> Dedesignated.

use chrono::NaiveDate;

use crate::domain::hedging::{HedgeRelationship, HedgeState};

use super::{check_dedesignation_window, ValidationReport, HEDGING_ITEMS_REQUIRED_MESSAGE};

/// Static eligibility: can this relationship be de-designated at all?
#[derive(Debug, Clone, Copy, Default)]
pub struct DeDesignateRequirementsValidator;

impl DeDesignateRequirementsValidator {
    pub fn validate(relationship: &HedgeRelationship) -> ValidationReport {
        let mut report = ValidationReport::new();

        if relationship.hedge_state != HedgeState::Designated {
            report.push_error(format!(
                "Cannot de-designate hedge relationship in '{}' state. Only Designated relationships can be de-designated.",
                relationship.hedge_state
            ));
        }
        report.require(
            !relationship.hedging_items.is_empty(),
            HEDGING_ITEMS_REQUIRED_MESSAGE,
        );

        report
    }
}

/// Eligibility plus the user's chosen date and reason.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeDesignateValidator;

impl DeDesignateValidator {
    pub fn validate(
        relationship: &HedgeRelationship,
        dedesignation_date: Option<NaiveDate>,
        reason: i32,
        today: NaiveDate,
    ) -> ValidationReport {
        let mut report = DeDesignateRequirementsValidator::validate(relationship);

        match dedesignation_date {
            None => report.push_error("De-designation date is required"),
            Some(date) => {
                report.require(date <= today, "De-designation date cannot be in the future");
                if let Some(designation) = relationship.designation_date {
                    check_dedesignation_window(&mut report, designation, date);
                }
            }
        }

        report.require(reason > 0, "De-designation reason is required");

        report
    }
}
