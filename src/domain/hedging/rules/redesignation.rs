//! Preconditions for Designated -> Designated (new cash-flow cycle).

use chrono::NaiveDate;

use crate::domain::hedging::{HedgeRelationship, HedgeState, HedgeType, RedesignationTerms};

use super::ValidationReport;

pub(crate) const REDESIGNATE_CASH_FLOW_ONLY_MESSAGE: &str =
    "Re-Designate is only allowed for CashFlow hedge types";

/// Static eligibility. State and hedge type are reported independently so
/// a caller always sees both problems at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReDesignateRequirementsValidator;

impl ReDesignateRequirementsValidator {
    pub fn validate(relationship: &HedgeRelationship) -> ValidationReport {
        let mut report = ValidationReport::new();

        if relationship.hedge_state != HedgeState::Designated {
            report.push_error(format!(
                "Cannot re-designate hedge relationship in '{}' state. Only Designated relationships can be re-designated.",
                relationship.hedge_state
            ));
        }
        report.require(
            relationship.hedge_type == HedgeType::CashFlow,
            REDESIGNATE_CASH_FLOW_ONLY_MESSAGE,
        );

        report
    }
}

/// Eligibility plus the user's re-designation terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReDesignateValidator;

impl ReDesignateValidator {
    pub fn validate(
        relationship: &HedgeRelationship,
        terms: &RedesignationTerms,
        today: NaiveDate,
    ) -> ValidationReport {
        let mut report = ReDesignateRequirementsValidator::validate(relationship);

        match terms.redesignation_date {
            None => report.push_error("Re-designation date is required"),
            Some(date) => {
                report.require(date <= today, "Re-designation date cannot be in the future");
                if let Some(designation) = relationship.designation_date {
                    report.require(
                        date > designation,
                        "Re-designation date must be after the designation date",
                    );
                }
                if let Some(dedesignation) = relationship.dedesignation_date {
                    report.require(
                        date > dedesignation,
                        "Re-designation date must be after the de-designation date",
                    );
                }
            }
        }

        report.require(!terms.payment.is_zero(), "Payment must be non-zero");

        match (terms.time_values_start_date, terms.time_values_end_date) {
            (Some(start), Some(end)) => {
                report.require(start < end, "Start date must be before end date")
            }
            _ => report.push_error("Start date and end date are required"),
        }

        report.require(
            terms.pay_bus_day_conv.is_some(),
            "Business day convention is required",
        );
        report.require(
            terms.payment_frequency.is_some(),
            "Payment frequency is required",
        );
        report.require(
            terms.day_count_conv.is_some(),
            "Day count convention is required",
        );

        report
    }
}
