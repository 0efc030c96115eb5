//! Wire types for the Hedge Accounting API.
//!
//! The remote API speaks PascalCase JSON with string enums and dates that
//! may or may not carry a time component. These structs mirror that shape
//! and are converted to the domain aggregate by explicit functions, so the
//! domain types never see wire quirks.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, HedgeRelationshipId};
use crate::domain::hedging::{
    CashPaymentType, DayCountConv, DedesignationDetails, HedgeItem, HedgeRegressionBatch,
    HedgeRelationship, HedgeResultType, HedgeRiskType, HedgeState, HedgeType,
    HedgingInstrumentStructure, ItemStatus, OptionTimeValueAmort, OptionTimeValueAmortType,
    PayBusDayConv, PaymentFrequency, RedesignationDetails, SecurityType,
};
use crate::ports::GatewayError;

const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
const WIRE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireHedgeRelationship {
    #[serde(rename = "ID", default)]
    pub id: i64,
    #[serde(rename = "ClientID", default)]
    pub client_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub hedge_type: String,
    pub hedge_risk_type: String,
    #[serde(default)]
    pub hedge_state: Option<String>,
    #[serde(default)]
    pub designation_date: Option<String>,
    #[serde(default)]
    pub dedesignation_date: Option<String>,
    #[serde(default)]
    pub redesignation_date: Option<String>,
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
    pub hedging_instrument_structure: Option<String>,
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
    #[serde(rename = "ProspectiveEffectivenessMethodID", default)]
    pub prospective_effectiveness_method_id: Option<i64>,
    #[serde(rename = "RetrospectiveEffectivenessMethodID", default)]
    pub retrospective_effectiveness_method_id: Option<i64>,
    #[serde(default)]
    pub notional: Decimal,
    #[serde(default)]
    pub option_premium: Option<Decimal>,
    #[serde(default)]
    pub hedged_items: Vec<WireHedgeItem>,
    #[serde(default)]
    pub hedging_items: Vec<WireHedgeItem>,
    #[serde(default)]
    pub hedge_regression_batches: Vec<WireRegressionBatch>,
    #[serde(default)]
    pub option_time_value_amorts: Vec<WireAmortization>,
    #[serde(default)]
    pub dedesignation: Option<WireDedesignation>,
    #[serde(default)]
    pub redesignation: Option<WireRedesignation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireHedgeItem {
    #[serde(rename = "ItemID")]
    pub item_id: String,
    pub security_type: String,
    pub item_status: String,
    #[serde(default)]
    pub notional: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireRegressionBatch {
    pub value_date: String,
    #[serde(default)]
    pub slope: f64,
    #[serde(default)]
    pub r_squared: f64,
    pub hedge_result_type: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireAmortization {
    pub amort_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireDedesignation {
    pub reason: i32,
    #[serde(default)]
    pub payment: Decimal,
    #[serde(default)]
    pub time_values_start_date: Option<String>,
    #[serde(default)]
    pub time_values_end_date: Option<String>,
    #[serde(default)]
    pub cash_payment_type: Option<String>,
    #[serde(default)]
    pub hedged_exposure_exist: bool,
    #[serde(default)]
    pub basis_adjustment: Option<Decimal>,
    #[serde(default)]
    pub basis_adjustment_balance: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireRedesignation {
    #[serde(default)]
    pub payment: Decimal,
    #[serde(default)]
    pub time_values_start_date: Option<String>,
    #[serde(default)]
    pub time_values_end_date: Option<String>,
    #[serde(default)]
    pub payment_frequency: Option<String>,
    #[serde(default)]
    pub day_count_conv: Option<String>,
    #[serde(default)]
    pub pay_bus_day_conv: Option<String>,
    #[serde(default)]
    pub adjusted_dates: bool,
    #[serde(default)]
    pub mark_as_acquisition: bool,
}

/// Parses `YYYY-MM-DD` or `YYYY-MM-DDThh:mm:ss`, ignoring any fractional
/// seconds or zone suffix on the latter.
pub fn parse_wire_date(value: &str) -> Result<NaiveDate, GatewayError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT) {
        return Ok(date);
    }
    let head = value.get(..19).unwrap_or(value);
    NaiveDateTime::parse_from_str(head, WIRE_DATE_TIME_FORMAT)
        .map(|dt| dt.date())
        .map_err(|_| GatewayError::Decode(format!("invalid date '{}'", value)))
}

pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, GatewayError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_wire_date(v).map(Some),
    }
}

fn required_enum<T>(
    field: &str,
    value: &str,
    lookup: fn(&str) -> Option<T>,
) -> Result<T, GatewayError> {
    lookup(value).ok_or_else(|| GatewayError::Decode(format!("unknown {} '{}'", field, value)))
}

fn optional_enum<T>(
    field: &str,
    value: Option<&str>,
    lookup: fn(&str) -> Option<T>,
) -> Result<Option<T>, GatewayError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_enum(field, v, lookup).map(Some),
    }
}

impl WireHedgeRelationship {
    pub fn to_domain(self) -> Result<HedgeRelationship, GatewayError> {
        let hedge_state = optional_enum(
            "HedgeState",
            self.hedge_state.as_deref(),
            HedgeState::from_wire_name,
        )?
        .unwrap_or_default();
        let hedging_instrument_structure = optional_enum(
            "HedgingInstrumentStructure",
            self.hedging_instrument_structure.as_deref(),
            HedgingInstrumentStructure::from_wire_name,
        )?
        .unwrap_or_default();

        Ok(HedgeRelationship {
            id: HedgeRelationshipId::new(self.id),
            client_id: ClientId::new(self.client_id),
            description: self.description,
            hedge_type: required_enum("HedgeType", &self.hedge_type, HedgeType::from_wire_name)?,
            hedge_risk_type: required_enum(
                "HedgeRiskType",
                &self.hedge_risk_type,
                HedgeRiskType::from_wire_name,
            )?,
            hedge_state,
            designation_date: optional_date(self.designation_date.as_deref())?,
            dedesignation_date: optional_date(self.dedesignation_date.as_deref())?,
            redesignation_date: optional_date(self.redesignation_date.as_deref())?,
            report_currency: self.report_currency,
            benchmark: self.benchmark,
            fair_value_method: self.fair_value_method,
            hedged_item_type: self.hedged_item_type,
            asset_liability: self.asset_liability,
            exposure_currency: self.exposure_currency,
            hedge_exposure: self.hedge_exposure,
            hedge_accounting_treatment: self.hedge_accounting_treatment,
            hedging_instrument_structure,
            is_an_option_hedge: self.is_an_option_hedge,
            off_market: self.off_market,
            shortcut: self.shortcut,
            portfolio_layer_method: self.portfolio_layer_method,
            pre_issuance_hedge: self.pre_issuance_hedge,
            qualitative_assessment: self.qualitative_assessment,
            prospective_effectiveness_method_id: self.prospective_effectiveness_method_id,
            retrospective_effectiveness_method_id: self.retrospective_effectiveness_method_id,
            notional: self.notional,
            option_premium: self.option_premium,
            hedged_items: items_to_domain(self.hedged_items)?,
            hedging_items: items_to_domain(self.hedging_items)?,
            hedge_regression_batches: self
                .hedge_regression_batches
                .into_iter()
                .map(WireRegressionBatch::to_domain)
                .collect::<Result<_, _>>()?,
            option_time_value_amorts: self
                .option_time_value_amorts
                .into_iter()
                .map(WireAmortization::to_domain)
                .collect::<Result<_, _>>()?,
            dedesignation: self
                .dedesignation
                .map(WireDedesignation::to_domain)
                .transpose()?,
            redesignation: self
                .redesignation
                .map(WireRedesignation::to_domain)
                .transpose()?,
        })
    }

    pub fn from_domain(rel: &HedgeRelationship) -> Self {
        Self {
            id: rel.id.value(),
            client_id: rel.client_id.value(),
            description: rel.description.clone(),
            hedge_type: rel.hedge_type.wire_name().to_string(),
            hedge_risk_type: rel.hedge_risk_type.wire_name().to_string(),
            hedge_state: Some(rel.hedge_state.wire_name().to_string()),
            designation_date: rel.designation_date.map(format_wire_date),
            dedesignation_date: rel.dedesignation_date.map(format_wire_date),
            redesignation_date: rel.redesignation_date.map(format_wire_date),
            report_currency: rel.report_currency.clone(),
            benchmark: rel.benchmark.clone(),
            fair_value_method: rel.fair_value_method.clone(),
            hedged_item_type: rel.hedged_item_type.clone(),
            asset_liability: rel.asset_liability.clone(),
            exposure_currency: rel.exposure_currency.clone(),
            hedge_exposure: rel.hedge_exposure.clone(),
            hedge_accounting_treatment: rel.hedge_accounting_treatment.clone(),
            hedging_instrument_structure: Some(
                rel.hedging_instrument_structure.wire_name().to_string(),
            ),
            is_an_option_hedge: rel.is_an_option_hedge,
            off_market: rel.off_market,
            shortcut: rel.shortcut,
            portfolio_layer_method: rel.portfolio_layer_method,
            pre_issuance_hedge: rel.pre_issuance_hedge,
            qualitative_assessment: rel.qualitative_assessment,
            prospective_effectiveness_method_id: rel.prospective_effectiveness_method_id,
            retrospective_effectiveness_method_id: rel.retrospective_effectiveness_method_id,
            notional: rel.notional,
            option_premium: rel.option_premium,
            hedged_items: rel.hedged_items.iter().map(WireHedgeItem::from_domain).collect(),
            hedging_items: rel.hedging_items.iter().map(WireHedgeItem::from_domain).collect(),
            hedge_regression_batches: rel
                .hedge_regression_batches
                .iter()
                .map(WireRegressionBatch::from_domain)
                .collect(),
            option_time_value_amorts: rel
                .option_time_value_amorts
                .iter()
                .map(WireAmortization::from_domain)
                .collect(),
            dedesignation: rel.dedesignation.as_ref().map(WireDedesignation::from_domain),
            redesignation: rel.redesignation.as_ref().map(WireRedesignation::from_domain),
        }
    }
}

fn items_to_domain(items: Vec<WireHedgeItem>) -> Result<Vec<HedgeItem>, GatewayError> {
    items.into_iter().map(WireHedgeItem::to_domain).collect()
}

impl WireHedgeItem {
    /// Unrecognised security types become [`SecurityType::Other`]; the
    /// remote catalogue is larger than the types the rules distinguish.
    fn to_domain(self) -> Result<HedgeItem, GatewayError> {
        Ok(HedgeItem {
            security_type: SecurityType::from_wire_name(&self.security_type)
                .unwrap_or(SecurityType::Other),
            item_status: required_enum("ItemStatus", &self.item_status, ItemStatus::from_wire_name)?,
            item_id: self.item_id,
            notional: self.notional,
            description: self.description,
        })
    }

    fn from_domain(item: &HedgeItem) -> Self {
        Self {
            item_id: item.item_id.clone(),
            security_type: item.security_type.wire_name().to_string(),
            item_status: item.item_status.wire_name().to_string(),
            notional: item.notional,
            description: item.description.clone(),
        }
    }
}

impl WireRegressionBatch {
    fn to_domain(self) -> Result<HedgeRegressionBatch, GatewayError> {
        Ok(HedgeRegressionBatch {
            value_date: parse_wire_date(&self.value_date)?,
            slope: self.slope,
            r_squared: self.r_squared,
            hedge_result_type: required_enum(
                "HedgeResultType",
                &self.hedge_result_type,
                HedgeResultType::from_wire_name,
            )?,
            error_message: self.error_message,
        })
    }

    fn from_domain(batch: &HedgeRegressionBatch) -> Self {
        Self {
            value_date: format_wire_date(batch.value_date),
            slope: batch.slope,
            r_squared: batch.r_squared,
            hedge_result_type: batch.hedge_result_type.wire_name().to_string(),
            error_message: batch.error_message.clone(),
        }
    }
}

impl WireAmortization {
    fn to_domain(self) -> Result<OptionTimeValueAmort, GatewayError> {
        Ok(OptionTimeValueAmort {
            amort_type: required_enum(
                "AmortType",
                &self.amort_type,
                OptionTimeValueAmortType::from_wire_name,
            )?,
            start_date: parse_wire_date(&self.start_date)?,
            end_date: parse_wire_date(&self.end_date)?,
            total_amount: self.total_amount,
        })
    }

    fn from_domain(amort: &OptionTimeValueAmort) -> Self {
        Self {
            amort_type: amort.amort_type.wire_name().to_string(),
            start_date: format_wire_date(amort.start_date),
            end_date: format_wire_date(amort.end_date),
            total_amount: amort.total_amount,
        }
    }
}

impl WireDedesignation {
    fn to_domain(self) -> Result<DedesignationDetails, GatewayError> {
        Ok(DedesignationDetails {
            reason: self.reason,
            payment: self.payment,
            time_values_start_date: optional_date(self.time_values_start_date.as_deref())?,
            time_values_end_date: optional_date(self.time_values_end_date.as_deref())?,
            cash_payment_type: optional_enum(
                "CashPaymentType",
                self.cash_payment_type.as_deref(),
                CashPaymentType::from_wire_name,
            )?,
            hedged_exposure_exist: self.hedged_exposure_exist,
            basis_adjustment: self.basis_adjustment,
            basis_adjustment_balance: self.basis_adjustment_balance,
        })
    }

    fn from_domain(details: &DedesignationDetails) -> Self {
        Self {
            reason: details.reason,
            payment: details.payment,
            time_values_start_date: details.time_values_start_date.map(format_wire_date),
            time_values_end_date: details.time_values_end_date.map(format_wire_date),
            cash_payment_type: details.cash_payment_type.map(|t| t.wire_name().to_string()),
            hedged_exposure_exist: details.hedged_exposure_exist,
            basis_adjustment: details.basis_adjustment,
            basis_adjustment_balance: details.basis_adjustment_balance,
        }
    }
}

impl WireRedesignation {
    fn to_domain(self) -> Result<RedesignationDetails, GatewayError> {
        Ok(RedesignationDetails {
            payment: self.payment,
            time_values_start_date: optional_date(self.time_values_start_date.as_deref())?,
            time_values_end_date: optional_date(self.time_values_end_date.as_deref())?,
            payment_frequency: optional_enum(
                "PaymentFrequency",
                self.payment_frequency.as_deref(),
                PaymentFrequency::from_wire_name,
            )?,
            day_count_conv: optional_enum(
                "DayCountConv",
                self.day_count_conv.as_deref(),
                DayCountConv::from_wire_name,
            )?,
            pay_bus_day_conv: optional_enum(
                "PayBusDayConv",
                self.pay_bus_day_conv.as_deref(),
                PayBusDayConv::from_wire_name,
            )?,
            adjusted_dates: self.adjusted_dates,
            mark_as_acquisition: self.mark_as_acquisition,
        })
    }

    fn from_domain(details: &RedesignationDetails) -> Self {
        Self {
            payment: details.payment,
            time_values_start_date: details.time_values_start_date.map(format_wire_date),
            time_values_end_date: details.time_values_end_date.map(format_wire_date),
            payment_frequency: details.payment_frequency.map(|f| f.wire_name().to_string()),
            day_count_conv: details.day_count_conv.map(|c| c.wire_name().to_string()),
            pay_bus_day_conv: details.pay_bus_day_conv.map(|c| c.wire_name().to_string()),
            adjusted_dates: details.adjusted_dates,
            mark_as_acquisition: details.mark_as_acquisition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_json() -> serde_json::Value {
        json!({
            "ID": 42,
            "ClientID": 7,
            "HedgeType": "CashFlow",
            "HedgeRiskType": "InterestRate",
            "HedgeState": "Designated",
            "DesignationDate": "2024-01-01T00:00:00",
            "DedesignationDate": null,
            "ReportCurrency": "USD",
            "ProspectiveEffectivenessMethodID": 3,
            "Notional": 1000000,
            "HedgedItems": [
                { "ItemID": "B-1", "SecurityType": "Bond", "ItemStatus": "Validated" }
            ],
            "HedgingItems": [
                { "ItemID": "S-1", "SecurityType": "InflationSwap", "ItemStatus": "HA" }
            ],
            "HedgeRegressionBatches": [
                {
                    "ValueDate": "2024-03-31T12:30:00.000Z",
                    "Slope": -0.97,
                    "RSquared": 0.96,
                    "HedgeResultType": "Inception"
                }
            ]
        })
    }

    #[test]
    fn decodes_pascal_case_payload() {
        let wire: WireHedgeRelationship = serde_json::from_value(wire_json()).unwrap();
        let rel = wire.to_domain().unwrap();

        assert_eq!(rel.id, HedgeRelationshipId::new(42));
        assert_eq!(rel.client_id, ClientId::new(7));
        assert_eq!(rel.hedge_type, HedgeType::CashFlow);
        assert_eq!(rel.hedge_state, HedgeState::Designated);
        assert_eq!(rel.designation_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(rel.dedesignation_date, None);
        assert_eq!(rel.prospective_effectiveness_method_id, Some(3));
        assert_eq!(rel.hedged_items[0].security_type, SecurityType::Bond);
        assert_eq!(rel.hedging_items[0].item_status, ItemStatus::Ha);
        assert_eq!(
            rel.hedge_regression_batches[0].value_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }

    #[test]
    fn unknown_security_type_falls_back_to_other() {
        let wire: WireHedgeRelationship = serde_json::from_value(wire_json()).unwrap();
        let rel = wire.to_domain().unwrap();
        assert_eq!(rel.hedging_items[0].security_type, SecurityType::Other);
    }

    #[test]
    fn unknown_hedge_type_is_a_decode_error() {
        let mut value = wire_json();
        value["HedgeType"] = json!("Speculative");
        let wire: WireHedgeRelationship = serde_json::from_value(value).unwrap();

        let err = wire.to_domain().unwrap_err();
        assert!(matches!(err, GatewayError::Decode(msg) if msg.contains("Speculative")));
    }

    #[test]
    fn missing_state_defaults_to_draft() {
        let mut value = wire_json();
        value.as_object_mut().unwrap().remove("HedgeState");
        let wire: WireHedgeRelationship = serde_json::from_value(value).unwrap();
        assert_eq!(wire.to_domain().unwrap().hedge_state, HedgeState::Draft);
    }

    #[test]
    fn encodes_dates_without_time_component() {
        let wire: WireHedgeRelationship = serde_json::from_value(wire_json()).unwrap();
        let rel = wire.to_domain().unwrap();

        let json = serde_json::to_value(WireHedgeRelationship::from_domain(&rel)).unwrap();
        assert_eq!(json["DesignationDate"], "2024-01-01");
        assert_eq!(json["HedgeState"], "Designated");
        assert_eq!(json["ID"], 42);
        assert_eq!(json["HedgedItems"][0]["ItemID"], "B-1");
    }

    #[test]
    fn parse_wire_date_rejects_garbage() {
        assert!(parse_wire_date("01/02/2024").is_err());
        assert_eq!(
            parse_wire_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
