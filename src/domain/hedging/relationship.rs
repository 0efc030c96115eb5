//! HedgeRelationship aggregate.
//!
//! The Hedge Accounting API is the system of record; this type is the
//! in-process view of one record as loaded for a single request. Fields
//! are public because the aggregate is reconstituted wholesale from the
//! remote payload and edited through `Save` while in Draft. State changes
//! go through the lifecycle handlers, never through direct assignment.
//!
//! # Invariants (enforced by the rule sets, not by construction)
//!
//! - `dedesignation_date`, when set, is strictly after `designation_date`
//! - `designation_date` is not in the future
//! - option hedges only reference option-capable security types
//! - an off-market cash-flow hedge carries an `Amortization` schedule
//! - a `SingleInstrument` structure has at most one hedging item

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, HedgeRelationshipId};

use super::enums::{
    CashPaymentType, DayCountConv, HedgeResultType, HedgeRiskType, HedgeType,
    HedgingInstrumentStructure, OptionTimeValueAmortType, PayBusDayConv, PaymentFrequency,
};
use super::items::{HedgeItem, HedgeRegressionBatch, OptionTimeValueAmort};
use super::state::HedgeState;

/// Sentinel the upstream reference data uses for "no currency selected".
pub const NO_CURRENCY: &str = "None";

/// Hedge relationship aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HedgeRelationship {
    /// Remote identity; zero until first persisted.
    #[serde(default)]
    pub id: HedgeRelationshipId,
    pub client_id: ClientId,
    #[serde(default)]
    pub description: Option<String>,

    pub hedge_type: HedgeType,
    pub hedge_risk_type: HedgeRiskType,
    #[serde(default)]
    pub hedge_state: HedgeState,

    #[serde(default)]
    pub designation_date: Option<NaiveDate>,
    #[serde(default)]
    pub dedesignation_date: Option<NaiveDate>,
    #[serde(default)]
    pub redesignation_date: Option<NaiveDate>,

    #[serde(default)]
    pub report_currency: Option<String>,
    #[serde(default)]
    pub benchmark: Option<String>,
    #[serde(default)]
    pub fair_value_method: Option<String>,
    #[serde(default)]
    pub hedged_item_type: Option<String>,
    #[serde(default)]
    pub asset_liability: Option<String>,
    #[serde(default)]
    pub exposure_currency: Option<String>,
    #[serde(default)]
    pub hedge_exposure: Option<String>,
    #[serde(default)]
    pub hedge_accounting_treatment: Option<String>,
    #[serde(default)]
    pub hedging_instrument_structure: HedgingInstrumentStructure,

    #[serde(default)]
    pub is_an_option_hedge: bool,
    #[serde(default)]
    pub off_market: bool,
    #[serde(default)]
    pub shortcut: bool,
    #[serde(default)]
    pub portfolio_layer_method: bool,
    #[serde(default)]
    pub pre_issuance_hedge: bool,
    #[serde(default)]
    pub qualitative_assessment: bool,

    #[serde(default)]
    pub prospective_effectiveness_method_id: Option<i64>,
    #[serde(default)]
    pub retrospective_effectiveness_method_id: Option<i64>,

    #[serde(default)]
    pub notional: Decimal,
    #[serde(default)]
    pub option_premium: Option<Decimal>,

    #[serde(default)]
    pub hedged_items: Vec<HedgeItem>,
    #[serde(default)]
    pub hedging_items: Vec<HedgeItem>,
    #[serde(default)]
    pub hedge_regression_batches: Vec<HedgeRegressionBatch>,
    #[serde(default)]
    pub option_time_value_amorts: Vec<OptionTimeValueAmort>,

    /// Details stamped by the last de-designation.
    #[serde(default)]
    pub dedesignation: Option<DedesignationDetails>,
    /// Details stamped by the last re-designation.
    #[serde(default)]
    pub redesignation: Option<RedesignationDetails>,
}

/// Parameters chosen by the user when de-designating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedesignationTerms {
    pub dedesignation_date: Option<NaiveDate>,
    /// Reason code from reference data; must be positive.
    pub reason: i32,
    #[serde(default)]
    pub payment: Decimal,
    pub time_values_start_date: Option<NaiveDate>,
    pub time_values_end_date: Option<NaiveDate>,
    pub cash_payment_type: Option<CashPaymentType>,
    #[serde(default)]
    pub hedged_exposure_exist: bool,
    #[serde(default)]
    pub basis_adjustment: Option<Decimal>,
    #[serde(default)]
    pub basis_adjustment_balance: Option<Decimal>,
}

/// De-designation fields recorded on the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedesignationDetails {
    pub reason: i32,
    pub payment: Decimal,
    pub time_values_start_date: Option<NaiveDate>,
    pub time_values_end_date: Option<NaiveDate>,
    pub cash_payment_type: Option<CashPaymentType>,
    pub hedged_exposure_exist: bool,
    pub basis_adjustment: Option<Decimal>,
    pub basis_adjustment_balance: Option<Decimal>,
}

/// Parameters chosen by the user when re-designating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedesignationTerms {
    pub redesignation_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment: Decimal,
    pub time_values_start_date: Option<NaiveDate>,
    pub time_values_end_date: Option<NaiveDate>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub day_count_conv: Option<DayCountConv>,
    pub pay_bus_day_conv: Option<PayBusDayConv>,
    #[serde(default)]
    pub adjusted_dates: bool,
    #[serde(default)]
    pub mark_as_acquisition: bool,
}

/// Re-designation fields recorded on the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedesignationDetails {
    pub payment: Decimal,
    pub time_values_start_date: Option<NaiveDate>,
    pub time_values_end_date: Option<NaiveDate>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub day_count_conv: Option<DayCountConv>,
    pub pay_bus_day_conv: Option<PayBusDayConv>,
    pub adjusted_dates: bool,
    pub mark_as_acquisition: bool,
}

impl HedgeRelationship {
    /// Creates an unsaved Draft relationship.
    pub fn draft(client_id: ClientId, hedge_type: HedgeType, hedge_risk_type: HedgeRiskType) -> Self {
        Self {
            client_id,
            hedge_type,
            hedge_risk_type,
            hedge_state: HedgeState::Draft,
            ..Self::default()
        }
    }

    /// True when a report currency other than the "None" sentinel is set.
    pub fn has_report_currency(&self) -> bool {
        self.report_currency
            .as_deref()
            .map(str::trim)
            .is_some_and(|c| !c.is_empty() && !c.eq_ignore_ascii_case(NO_CURRENCY))
    }

    /// True when both effectiveness methods reference a real method.
    pub fn has_effectiveness_methods(&self) -> bool {
        is_set_reference(self.prospective_effectiveness_method_id)
            && is_set_reference(self.retrospective_effectiveness_method_id)
    }

    /// True when an `Amortization` schedule is attached.
    pub fn has_amortization_schedule(&self) -> bool {
        self.option_time_value_amorts
            .iter()
            .any(|a| a.amort_type == OptionTimeValueAmortType::Amortization)
    }

    /// Most recent regression batch of the given type, by value date.
    ///
    /// Ties on value date resolve to the later entry in the list.
    pub fn latest_regression(&self, result_type: HedgeResultType) -> Option<&HedgeRegressionBatch> {
        self.hedge_regression_batches
            .iter()
            .filter(|b| b.hedge_result_type == result_type)
            .max_by_key(|b| b.value_date)
    }

    /// Batches of `result_type` recorded after the first `known` of that type,
    /// in list order. When nothing was added, the last batch of that type.
    pub fn regressions_after(
        &self,
        result_type: HedgeResultType,
        known: usize,
    ) -> Vec<&HedgeRegressionBatch> {
        let of_type: Vec<&HedgeRegressionBatch> = self
            .hedge_regression_batches
            .iter()
            .filter(|b| b.hedge_result_type == result_type)
            .collect();
        if of_type.len() > known {
            of_type[known..].to_vec()
        } else {
            of_type.last().copied().into_iter().collect()
        }
    }

    /// Number of recorded batches of `result_type`.
    pub fn regression_count(&self, result_type: HedgeResultType) -> usize {
        self.hedge_regression_batches
            .iter()
            .filter(|b| b.hedge_result_type == result_type)
            .count()
    }

    /// Records the de-designation terms on the aggregate.
    pub fn stamp_dedesignation(&mut self, terms: &DedesignationTerms) {
        self.dedesignation_date = terms.dedesignation_date;
        self.dedesignation = Some(DedesignationDetails {
            reason: terms.reason,
            payment: terms.payment,
            time_values_start_date: terms.time_values_start_date,
            time_values_end_date: terms.time_values_end_date,
            cash_payment_type: terms.cash_payment_type,
            hedged_exposure_exist: terms.hedged_exposure_exist,
            basis_adjustment: terms.basis_adjustment,
            basis_adjustment_balance: terms.basis_adjustment_balance,
        });
    }

    /// Records the re-designation terms on the aggregate.
    pub fn stamp_redesignation(&mut self, terms: &RedesignationTerms) {
        self.redesignation_date = terms.redesignation_date;
        self.redesignation = Some(RedesignationDetails {
            payment: terms.payment,
            time_values_start_date: terms.time_values_start_date,
            time_values_end_date: terms.time_values_end_date,
            payment_frequency: terms.payment_frequency,
            day_count_conv: terms.day_count_conv,
            pay_bus_day_conv: terms.pay_bus_day_conv,
            adjusted_dates: terms.adjusted_dates,
            mark_as_acquisition: terms.mark_as_acquisition,
        });
    }
}

/// Nullable reference where zero also means "not selected".
pub(crate) fn is_set_reference(id: Option<i64>) -> bool {
    id.is_some_and(|v| v != 0)
}
