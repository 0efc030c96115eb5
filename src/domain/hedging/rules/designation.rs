//! Preconditions for Draft -> Designated.

use chrono::NaiveDate;

use crate::domain::hedging::{
    relationship::is_set_reference, HedgeRelationship, HedgeRiskType, HedgeType, ItemStatus,
};

use super::{
    option_hedge_violation, ValidationReport, DEDESIGNATION_ORDER_MESSAGE,
    DESIGNATION_FUTURE_MESSAGE, HEDGED_ITEMS_REQUIRED_MESSAGE, HEDGING_ITEMS_REQUIRED_MESSAGE,
    PROSPECTIVE_METHOD_REQUIRED_MESSAGE, REPORT_CURRENCY_REQUIRED_MESSAGE,
    RETROSPECTIVE_METHOD_REQUIRED_MESSAGE,
};

/// Designation eligibility rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignationRequirementsValidator;

impl DesignationRequirementsValidator {
    pub fn validate(relationship: &HedgeRelationship, today: NaiveDate) -> ValidationReport {
        let mut report = ValidationReport::new();

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
        report.require(
            is_set_reference(relationship.prospective_effectiveness_method_id),
            PROSPECTIVE_METHOD_REQUIRED_MESSAGE,
        );
        report.require(
            is_set_reference(relationship.retrospective_effectiveness_method_id),
            RETROSPECTIVE_METHOD_REQUIRED_MESSAGE,
        );
        report.require(
            relationship
                .hedged_items
                .iter()
                .all(|item| item.item_status == ItemStatus::Ha),
            "All hedged items must have a status of HA",
        );
        report.require(
            relationship
                .hedging_items
                .iter()
                .all(|item| item.item_status == ItemStatus::Validated),
            "All hedging items must have a status of Validated",
        );

        if let (Some(designation), Some(dedesignation)) =
            (relationship.designation_date, relationship.dedesignation_date)
        {
            report.require(dedesignation > designation, DEDESIGNATION_ORDER_MESSAGE);
        }

        match relationship.hedge_type {
            HedgeType::FairValue => {
                report.require(
                    is_filled(&relationship.fair_value_method),
                    "Fair value method is required for Fair Value hedges",
                );
                report.require(
                    is_filled(&relationship.benchmark),
                    "Benchmark is required for Fair Value hedges",
                );
            }
            HedgeType::CashFlow if relationship.hedge_risk_type != HedgeRiskType::ForeignExchange => {
                report.require(
                    is_filled(&relationship.benchmark),
                    "Benchmark is required for Cash Flow hedges of interest rate risk",
                );
            }
            _ => {}
        }

        report.require(
            is_filled(&relationship.hedged_item_type),
            "Hedged item type is required",
        );
        report.require(
            is_filled(&relationship.asset_liability),
            "Asset/Liability classification is required",
        );

        match relationship.designation_date {
            Some(designation) => report.require(designation <= today, DESIGNATION_FUTURE_MESSAGE),
            None => report.push_error("Designation date is required"),
        }

        if let Some(message) = option_hedge_violation(relationship) {
            report.push_error(message);
        }

        if relationship.hedge_type == HedgeType::CashFlow && relationship.off_market {
            report.require(
                relationship.has_amortization_schedule(),
                "Off-market Cash Flow hedges require an Amortization schedule",
            );
        }

        report
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
