//! Child records of a hedge relationship.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{HedgeResultType, ItemStatus, OptionTimeValueAmortType, SecurityType};

/// A hedged or hedging instrument referenced by the relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeItem {
    /// Trade or security identifier in the source system.
    pub item_id: String,
    pub security_type: SecurityType,
    pub item_status: ItemStatus,
    #[serde(default)]
    pub notional: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HedgeItem {
    pub fn new(item_id: impl Into<String>, security_type: SecurityType, item_status: ItemStatus) -> Self {
        Self {
            item_id: item_id.into(),
            security_type,
            item_status,
            notional: Decimal::ZERO,
            description: None,
        }
    }
}

/// One historical effectiveness regression result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeRegressionBatch {
    pub value_date: NaiveDate,
    pub slope: f64,
    pub r_squared: f64,
    pub hedge_result_type: HedgeResultType,
    /// Failure text reported by the analytics service for this run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl HedgeRegressionBatch {
    /// True when the run completed without a remote-side error.
    pub fn succeeded(&self) -> bool {
        self.error_message
            .as_deref()
            .map_or(true, |message| message.trim().is_empty())
    }
}

/// Amortization or option time-value schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTimeValueAmort {
    pub amort_type: OptionTimeValueAmortType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub total_amount: Decimal,
}
