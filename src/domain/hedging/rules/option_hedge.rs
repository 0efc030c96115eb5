//! Option-hedge eligibility matrix shared by Designation and Save.

use crate::domain::hedging::HedgeRelationship;

pub const OPTION_HEDGED_ITEMS_MESSAGE: &str =
    "For option hedges, all hedged items must be of type CapFloor, Collar, Corridor, Swaption, SwapWithOption, or Debt";

pub const OPTION_HEDGING_ITEMS_MESSAGE: &str =
    "For option hedges, all hedging items must be of type CapFloor, Collar, Corridor, Swaption, or SwapWithOption";

pub const OPTION_HEDGED_AND_HEDGING_MESSAGE: &str =
    "For option hedges, hedged items must be of type CapFloor, Collar, Corridor, Swaption, SwapWithOption, or Debt, and hedging items must be of type CapFloor, Collar, Corridor, Swaption, or SwapWithOption";

/// Returns the single message describing which side of an option hedge
/// holds ineligible security types, or `None` when both sides comply or
/// the relationship is not an option hedge.
pub fn option_hedge_violation(relationship: &HedgeRelationship) -> Option<&'static str> {
    if !relationship.is_an_option_hedge {
        return None;
    }

    let hedged_invalid = relationship
        .hedged_items
        .iter()
        .any(|item| !item.security_type.is_option_hedged_type());
    let hedging_invalid = relationship
        .hedging_items
        .iter()
        .any(|item| !item.security_type.is_option_hedging_type());

    match (hedged_invalid, hedging_invalid) {
        (true, true) => Some(OPTION_HEDGED_AND_HEDGING_MESSAGE),
        (true, false) => Some(OPTION_HEDGED_ITEMS_MESSAGE),
        (false, true) => Some(OPTION_HEDGING_ITEMS_MESSAGE),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hedging::{HedgeItem, ItemStatus, SecurityType};

    fn option_hedge(hedged: SecurityType, hedging: SecurityType) -> HedgeRelationship {
        HedgeRelationship {
            is_an_option_hedge: true,
            hedged_items: vec![HedgeItem::new("A", hedged, ItemStatus::Ha)],
            hedging_items: vec![HedgeItem::new("B", hedging, ItemStatus::Validated)],
            ..HedgeRelationship::default()
        }
    }

    #[test]
    fn non_option_hedge_is_never_flagged() {
        let mut rel = option_hedge(SecurityType::Bond, SecurityType::Swap);
        rel.is_an_option_hedge = false;
        assert_eq!(option_hedge_violation(&rel), None);
    }

    #[test]
    fn valid_option_hedge_passes() {
        let rel = option_hedge(SecurityType::Debt, SecurityType::CapFloor);
        assert_eq!(option_hedge_violation(&rel), None);
    }

    #[test]
    fn hedged_side_only() {
        let rel = option_hedge(SecurityType::Bond, SecurityType::Swaption);
        assert_eq!(option_hedge_violation(&rel), Some(OPTION_HEDGED_ITEMS_MESSAGE));
    }

    #[test]
    fn hedging_side_only() {
        let rel = option_hedge(SecurityType::Collar, SecurityType::Debt);
        assert_eq!(option_hedge_violation(&rel), Some(OPTION_HEDGING_ITEMS_MESSAGE));
    }

    #[test]
    fn both_sides() {
        let rel = option_hedge(SecurityType::Bond, SecurityType::Swap);
        assert_eq!(
            option_hedge_violation(&rel),
            Some(OPTION_HEDGED_AND_HEDGING_MESSAGE)
        );
    }

    #[test]
    fn empty_sides_do_not_violate_the_matrix() {
        let rel = HedgeRelationship {
            is_an_option_hedge: true,
            ..HedgeRelationship::default()
        };
        assert_eq!(option_hedge_violation(&rel), None);
    }
}
