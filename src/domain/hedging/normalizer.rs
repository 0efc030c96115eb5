//! Pre-persist cleanup of derived fields.
//!
//! Applied immediately before Save and Designate. Fields that do not apply
//! to the relationship's hedge type or risk type are cleared so the remote
//! system never stores contradictory flags. The transform is deterministic
//! and idempotent.

use super::enums::{HedgeRiskType, HedgeType};
use super::relationship::HedgeRelationship;

/// Normalizes derived fields of a hedge relationship in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCleanupNormalizer;

impl FieldCleanupNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Applies every cleanup rule to `relationship`.
    pub fn apply(&self, relationship: &mut HedgeRelationship) {
        if relationship.prospective_effectiveness_method_id == Some(0) {
            relationship.prospective_effectiveness_method_id = None;
        }
        if relationship.retrospective_effectiveness_method_id == Some(0) {
            relationship.retrospective_effectiveness_method_id = None;
        }

        if relationship.is_an_option_hedge {
            relationship.off_market = false;
        }

        if matches!(
            relationship.hedge_type,
            HedgeType::FairValue | HedgeType::NetInvestment
        ) {
            relationship.pre_issuance_hedge = false;
        }

        if matches!(
            relationship.hedge_type,
            HedgeType::CashFlow | HedgeType::NetInvestment
        ) {
            relationship.portfolio_layer_method = false;
        }

        match (relationship.hedge_risk_type, relationship.hedge_type) {
            (HedgeRiskType::ForeignExchange, HedgeType::CashFlow | HedgeType::FairValue) => {
                relationship.benchmark = None;
                relationship.exposure_currency = None;
                relationship.hedge_accounting_treatment = None;
            }
            (HedgeRiskType::ForeignExchange, HedgeType::NetInvestment) => {
                relationship.benchmark = None;
                relationship.hedge_exposure = None;
            }
            (HedgeRiskType::InterestRate, _) => {
                relationship.hedge_exposure = None;
                relationship.exposure_currency = None;
                relationship.hedge_accounting_treatment = None;
            }
        }
    }

    /// Returns a normalized copy.
    pub fn normalized(&self, relationship: &HedgeRelationship) -> HedgeRelationship {
        let mut copy = relationship.clone();
        self.apply(&mut copy);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn populated(hedge_type: HedgeType, risk: HedgeRiskType) -> HedgeRelationship {
        HedgeRelationship {
            hedge_type,
            hedge_risk_type: risk,
            benchmark: Some("SOFR".to_string()),
            exposure_currency: Some("EUR".to_string()),
            hedge_exposure: Some("Forecasted purchase".to_string()),
            hedge_accounting_treatment: Some("OCI".to_string()),
            pre_issuance_hedge: true,
            portfolio_layer_method: true,
            ..HedgeRelationship::default()
        }
    }

    #[test]
    fn zero_effectiveness_methods_become_unset() {
        let mut rel = HedgeRelationship {
            prospective_effectiveness_method_id: Some(0),
            retrospective_effectiveness_method_id: Some(4),
            ..HedgeRelationship::default()
        };
        FieldCleanupNormalizer::new().apply(&mut rel);
        assert_eq!(rel.prospective_effectiveness_method_id, None);
        assert_eq!(rel.retrospective_effectiveness_method_id, Some(4));
    }

    #[test]
    fn option_hedge_forces_off_market_false() {
        let mut rel = HedgeRelationship {
            is_an_option_hedge: true,
            off_market: true,
            ..HedgeRelationship::default()
        };
        FieldCleanupNormalizer::new().apply(&mut rel);
        assert!(!rel.off_market);
    }

    #[test]
    fn fx_cash_flow_clears_benchmark_and_exposure_currency() {
        let rel = FieldCleanupNormalizer::new()
            .normalized(&populated(HedgeType::CashFlow, HedgeRiskType::ForeignExchange));
        assert_eq!(rel.benchmark, None);
        assert_eq!(rel.exposure_currency, None);
        assert_eq!(rel.hedge_accounting_treatment, None);
        assert!(rel.hedge_exposure.is_some());
        assert!(rel.pre_issuance_hedge);
        assert!(!rel.portfolio_layer_method);
    }

    #[test]
    fn fx_net_investment_clears_benchmark_and_hedge_exposure() {
        let rel = FieldCleanupNormalizer::new()
            .normalized(&populated(HedgeType::NetInvestment, HedgeRiskType::ForeignExchange));
        assert_eq!(rel.benchmark, None);
        assert_eq!(rel.hedge_exposure, None);
        assert!(rel.exposure_currency.is_some());
        assert!(rel.hedge_accounting_treatment.is_some());
        assert!(!rel.pre_issuance_hedge);
        assert!(!rel.portfolio_layer_method);
    }

    #[test]
    fn interest_rate_fair_value_keeps_benchmark() {
        let rel = FieldCleanupNormalizer::new()
            .normalized(&populated(HedgeType::FairValue, HedgeRiskType::InterestRate));
        assert_eq!(rel.benchmark.as_deref(), Some("SOFR"));
        assert_eq!(rel.hedge_exposure, None);
        assert_eq!(rel.exposure_currency, None);
        assert_eq!(rel.hedge_accounting_treatment, None);
        assert!(!rel.pre_issuance_hedge);
        assert!(rel.portfolio_layer_method);
    }

    fn arb_relationship() -> impl Strategy<Value = HedgeRelationship> {
        (
            prop::sample::select(HedgeType::all().to_vec()),
            prop::sample::select(HedgeRiskType::all().to_vec()),
            prop::option::of(0i64..3),
            prop::option::of(0i64..3),
            any::<[bool; 5]>(),
            prop::option::of("[A-Z]{3}"),
            prop::option::of("[a-z]{1,8}"),
        )
            .prop_map(|(hedge_type, risk, pro, retro, flags, ccy, text)| HedgeRelationship {
                hedge_type,
                hedge_risk_type: risk,
                prospective_effectiveness_method_id: pro,
                retrospective_effectiveness_method_id: retro,
                is_an_option_hedge: flags[0],
                off_market: flags[1],
                pre_issuance_hedge: flags[2],
                portfolio_layer_method: flags[3],
                shortcut: flags[4],
                exposure_currency: ccy,
                benchmark: text.clone(),
                hedge_exposure: text.clone(),
                hedge_accounting_treatment: text,
                ..HedgeRelationship::default()
            })
    }

    proptest! {
        #[test]
        fn normalizer_is_idempotent(rel in arb_relationship()) {
            let normalizer = FieldCleanupNormalizer::new();
            let once = normalizer.normalized(&rel);
            let twice = normalizer.normalized(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalized_option_hedge_is_never_off_market(rel in arb_relationship()) {
            let once = FieldCleanupNormalizer::new().normalized(&rel);
            prop_assert!(!(once.is_an_option_hedge && once.off_market));
        }
    }
}
