//! Validation rule sets, one per lifecycle transition plus Save.
//!
//! Every rule set is a pure function of the loaded relationship, the
//! transition parameters and the caller-supplied `today`. They never fail
//! and never perform I/O; the result is a [`ValidationReport`] whose error
//! list is empty when the transition may proceed.

mod dedesignation;
mod designation;
mod option_hedge;
mod redesignation;
mod redraft;
mod regression;
mod save;

pub use dedesignation::{DeDesignateRequirementsValidator, DeDesignateValidator};
pub use designation::DesignationRequirementsValidator;
pub use option_hedge::{
    option_hedge_violation, OPTION_HEDGED_AND_HEDGING_MESSAGE, OPTION_HEDGED_ITEMS_MESSAGE,
    OPTION_HEDGING_ITEMS_MESSAGE,
};
pub use redesignation::{ReDesignateRequirementsValidator, ReDesignateValidator};
pub use redraft::RedraftValidator;
pub use regression::RegressionRequirementsValidator;
pub use save::SaveValidator;

use chrono::{Months, NaiveDate};
use serde::Serialize;

/// Soft-confirmation text shown when a de-designation follows designation
/// by less than three months.
pub const THREE_MONTH_CONFIRMATION_MESSAGE: &str =
    "The de-designation date is within 3 months of the designation date. Do you want to continue?";

pub(crate) const DEDESIGNATION_ORDER_MESSAGE: &str =
    "De-designation date must be after the designation date";
pub(crate) const DESIGNATION_FUTURE_MESSAGE: &str = "Designation date cannot be in the future";
pub(crate) const HEDGED_ITEMS_REQUIRED_MESSAGE: &str = "At least one hedged item is required";
pub(crate) const HEDGING_ITEMS_REQUIRED_MESSAGE: &str = "At least one hedging item is required";
pub(crate) const REPORT_CURRENCY_REQUIRED_MESSAGE: &str = "Report currency is required";
pub(crate) const PROSPECTIVE_METHOD_REQUIRED_MESSAGE: &str =
    "Prospective effectiveness method is required";
pub(crate) const RETROSPECTIVE_METHOD_REQUIRED_MESSAGE: &str =
    "Retrospective effectiveness method is required";

/// Outcome of evaluating a rule set.
///
/// `errors` block the operation. `confirmation` is a non-blocking prompt
/// the caller should show before proceeding; it is only ever set when the
/// dates it talks about are themselves valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    errors: Vec<String>,
    confirmation: Option<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `condition` holds.
    pub fn require(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.errors.push(message.into());
        }
    }

    /// Records an error unconditionally.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Sets the soft-confirmation prompt.
    pub fn request_confirmation(&mut self, message: impl Into<String>) {
        self.confirmation = Some(message.into());
    }

    /// Appends another report's errors; its confirmation wins if set.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        if other.confirmation.is_some() {
            self.confirmation = other.confirmation;
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn needs_confirmation(&self) -> bool {
        self.confirmation.is_some()
    }

    /// True when any error message contains `fragment`.
    pub fn mentions(&self, fragment: &str) -> bool {
        self.errors.iter().any(|e| e.contains(fragment))
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// True when `later` falls less than three calendar months after `earlier`.
pub(crate) fn within_three_months(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier
        .checked_add_months(Months::new(3))
        .is_some_and(|limit| later < limit)
}

/// Checks a dedesignation date against the designation date.
///
/// Reports the ordering error when `dedesignation <= designation`,
/// otherwise requests confirmation when the gap is under three months.
pub(crate) fn check_dedesignation_window(
    report: &mut ValidationReport,
    designation: NaiveDate,
    dedesignation: NaiveDate,
) {
    if dedesignation <= designation {
        report.push_error(DEDESIGNATION_ORDER_MESSAGE);
    } else if within_three_months(designation, dedesignation) {
        report.request_confirmation(THREE_MONTH_CONFIRMATION_MESSAGE);
    }
}
