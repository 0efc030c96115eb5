//! Validation run before every create or update, independent of transitions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::hedging::{HedgeRelationship, HedgeType, HedgingInstrumentStructure};

use super::{
    check_dedesignation_window, option_hedge_violation, ValidationReport,
    DESIGNATION_FUTURE_MESSAGE,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SaveValidator;

impl SaveValidator {
    pub fn validate(relationship: &HedgeRelationship, today: NaiveDate) -> ValidationReport {
        let mut report = ValidationReport::new();

        if let (Some(designation), Some(dedesignation)) =
            (relationship.designation_date, relationship.dedesignation_date)
        {
            check_dedesignation_window(&mut report, designation, dedesignation);
        }

        if let Some(designation) = relationship.designation_date {
            report.require(designation <= today, DESIGNATION_FUTURE_MESSAGE);
        }

        if relationship.hedge_type == HedgeType::FairValue {
            if !relationship.shortcut {
                report.require(
                    !relationship.qualitative_assessment,
                    "Qualitative assessment is not allowed for long-haul Fair Value hedges",
                );
            } else {
                report.require(
                    !relationship.portfolio_layer_method,
                    "Portfolio layer method is not allowed for shortcut Fair Value hedges",
                );
            }
        }

        if relationship.hedging_instrument_structure == HedgingInstrumentStructure::SingleInstrument {
            report.require(
                relationship.hedging_items.len() <= 1,
                "A single instrument hedge cannot have more than one hedging item",
            );
        }

        if let Some(message) = option_hedge_violation(relationship) {
            report.push_error(message);
        }

        if let Some(premium) = relationship.option_premium {
            report.require(premium >= Decimal::ZERO, "Option premium cannot be negative");
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hedging::rules::fixtures::{date, designatable, today};
    use crate::domain::hedging::rules::{
        DEDESIGNATION_ORDER_MESSAGE, OPTION_HEDGED_AND_HEDGING_MESSAGE,
        THREE_MONTH_CONFIRMATION_MESSAGE,
    };
    use crate::domain::hedging::{HedgeItem, ItemStatus, SecurityType};
    use proptest::prelude::*;

    #[test]
    fn dedesignation_within_three_months_needs_confirmation_only() {
        let rel = HedgeRelationship {
            designation_date: Some(date(2024, 1, 1)),
            dedesignation_date: Some(date(2024, 2, 1)),
            ..HedgeRelationship::default()
        };

        let report = SaveValidator::validate(&rel, today());

        assert!(report.errors().is_empty());
        assert!(report.needs_confirmation());
        assert_eq!(report.confirmation(), Some(THREE_MONTH_CONFIRMATION_MESSAGE));
    }

    #[test]
    fn designatable_relationship_saves_cleanly() {
        let report = SaveValidator::validate(&designatable(), today());
        assert!(report.is_valid());
        assert!(!report.needs_confirmation());
    }

    #[test]
    fn long_haul_fair_value_rejects_qualitative_assessment() {
        let rel = HedgeRelationship {
            hedge_type: HedgeType::FairValue,
            shortcut: false,
            qualitative_assessment: true,
            ..HedgeRelationship::default()
        };
        let report = SaveValidator::validate(&rel, today());
        assert!(report.mentions("Qualitative assessment is not allowed"));
    }

    #[test]
    fn shortcut_fair_value_rejects_portfolio_layer_method() {
        let rel = HedgeRelationship {
            hedge_type: HedgeType::FairValue,
            shortcut: true,
            portfolio_layer_method: true,
            qualitative_assessment: true,
            ..HedgeRelationship::default()
        };
        let report = SaveValidator::validate(&rel, today());
        assert_eq!(
            report.errors(),
            &["Portfolio layer method is not allowed for shortcut Fair Value hedges".to_string()]
        );
    }

    #[test]
    fn single_instrument_allows_one_hedging_item() {
        let mut rel = designatable();
        rel.hedging_items.push(HedgeItem::new(
            "SWAP-2",
            SecurityType::Swap,
            ItemStatus::Validated,
        ));
        let report = SaveValidator::validate(&rel, today());
        assert!(report.mentions("cannot have more than one hedging item"));

        rel.hedging_instrument_structure = HedgingInstrumentStructure::MultipleInstruments;
        assert!(SaveValidator::validate(&rel, today()).is_valid());
    }

    #[test]
    fn option_matrix_reports_both_sides() {
        let mut rel = designatable();
        rel.is_an_option_hedge = true;
        let report = SaveValidator::validate(&rel, today());
        assert!(report.mentions(OPTION_HEDGED_AND_HEDGING_MESSAGE));
    }

    #[test]
    fn negative_option_premium_is_rejected() {
        let rel = HedgeRelationship {
            option_premium: Some(Decimal::new(-1, 0)),
            ..HedgeRelationship::default()
        };
        let report = SaveValidator::validate(&rel, today());
        assert!(report.mentions("Option premium cannot be negative"));
    }

    #[test]
    fn future_designation_is_rejected() {
        let rel = HedgeRelationship {
            designation_date: Some(date(2025, 3, 1)),
            ..HedgeRelationship::default()
        };
        let report = SaveValidator::validate(&rel, today());
        assert!(report.mentions(DESIGNATION_FUTURE_MESSAGE));
    }

    proptest! {
        #[test]
        fn misordered_dates_always_error_and_never_confirm(
            designation_offset in 0i64..2000,
            gap in 0i64..500,
        ) {
            let designation = date(2020, 1, 1) + chrono::Duration::days(designation_offset);
            let dedesignation = designation - chrono::Duration::days(gap);
            let rel = HedgeRelationship {
                designation_date: Some(designation),
                dedesignation_date: Some(dedesignation),
                ..HedgeRelationship::default()
            };

            let report = SaveValidator::validate(&rel, today());

            prop_assert!(report.mentions(DEDESIGNATION_ORDER_MESSAGE));
            prop_assert!(!report.needs_confirmation());
        }
    }
}
