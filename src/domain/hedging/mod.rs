//! Hedge relationship domain module.
//!
//! # Module Structure
//!
//! - `enums` - Reference-data enums with static wire and display tables
//! - `state` - `HedgeState` and its lifecycle graph
//! - `items` - Hedged/hedging items, regression batches, amortization schedules
//! - `relationship` - `HedgeRelationship` aggregate and transition terms
//! - `normalizer` - Pre-persist field cleanup
//! - `rules` - Validation rule sets, one per transition plus Save
//! - `errors` - `HedgeRelationshipError`

#[macro_use]
mod macros;

mod enums;
mod errors;
mod items;
mod normalizer;
mod relationship;
pub mod rules;
mod state;

pub use enums::{
    CashPaymentType, DayCountConv, HedgeResultType, HedgeRiskType, HedgeType,
    HedgingInstrumentStructure, ItemStatus, OptionTimeValueAmortType, PayBusDayConv,
    PaymentFrequency, SecurityType,
};
pub use errors::HedgeRelationshipError;
pub use items::{HedgeItem, HedgeRegressionBatch, OptionTimeValueAmort};
pub use normalizer::FieldCleanupNormalizer;
pub use relationship::{
    DedesignationDetails, DedesignationTerms, HedgeRelationship, RedesignationDetails,
    RedesignationTerms, NO_CURRENCY,
};
pub use rules::ValidationReport;
pub use state::HedgeState;
