//! HTTP DTOs for hedge relationship endpoints.
//!
//! Entity bodies use the aggregate's own camelCase serialization. Command
//! bodies get their own request types, mapped to domain terms explicitly.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::hedge_relationship::DesignateResult;
use crate::domain::hedging::{
    CashPaymentType, DayCountConv, DedesignationTerms, HedgeRelationship, HedgeResultType,
    PayBusDayConv, PaymentFrequency, RedesignationTerms,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /:id/dedesignate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedesignateRequest {
    pub dedesignation_date: Option<NaiveDate>,
    pub reason: i32,
    #[serde(default)]
    pub payment: Decimal,
    pub time_value_start: Option<NaiveDate>,
    pub time_value_end: Option<NaiveDate>,
    pub cash_payment_type: Option<CashPaymentType>,
    #[serde(default)]
    pub hedged_exposure_exist: bool,
    pub basis_adjustment: Option<Decimal>,
    pub basis_adjustment_balance: Option<Decimal>,
}

impl DedesignateRequest {
    pub fn into_terms(self) -> DedesignationTerms {
        DedesignationTerms {
            dedesignation_date: self.dedesignation_date,
            reason: self.reason,
            payment: self.payment,
            time_values_start_date: self.time_value_start,
            time_values_end_date: self.time_value_end,
            cash_payment_type: self.cash_payment_type,
            hedged_exposure_exist: self.hedged_exposure_exist,
            basis_adjustment: self.basis_adjustment,
            basis_adjustment_balance: self.basis_adjustment_balance,
        }
    }
}

/// Body of `POST /:id/redesignate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedesignateRequest {
    pub redesignation_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment: Decimal,
    pub time_value_start: Option<NaiveDate>,
    pub time_value_end: Option<NaiveDate>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub day_count_conv: Option<DayCountConv>,
    pub pay_bus_day_conv: Option<PayBusDayConv>,
    #[serde(default)]
    pub adjusted_dates: bool,
    #[serde(default)]
    pub mark_as_acquisition: bool,
}

impl RedesignateRequest {
    pub fn into_terms(self) -> RedesignationTerms {
        RedesignationTerms {
            redesignation_date: self.redesignation_date,
            payment: self.payment,
            time_values_start_date: self.time_value_start,
            time_values_end_date: self.time_value_end,
            payment_frequency: self.payment_frequency,
            day_count_conv: self.day_count_conv,
            pay_bus_day_conv: self.pay_bus_day_conv,
            adjusted_dates: self.adjusted_dates,
            mark_as_acquisition: self.mark_as_acquisition,
        }
    }
}

/// Body of `POST /:id/regression`. The entity is optional; without it the
/// stored relationship is regressed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRegressionRequest {
    pub hedge_result_type: HedgeResultType,
    #[serde(default)]
    pub relationship: Option<HedgeRelationship>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Designation outcome, carrying the generated package base64-encoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignateResponse {
    pub relationship: HedgeRelationship,
    pub package_file_name: String,
    pub package_content_type: String,
    pub package_size: usize,
    pub package_content: String,
}

impl From<DesignateResult> for DesignateResponse {
    fn from(result: DesignateResult) -> Self {
        Self {
            package_file_name: result.package.file_name.clone(),
            package_content_type: result.package.content_type.clone(),
            package_size: result.package.len(),
            package_content: BASE64_STANDARD.encode(&result.package.content),
            relationship: result.relationship,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
