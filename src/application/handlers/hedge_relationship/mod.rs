//! Hedge relationship lifecycle handlers.
//!
//! ## Commands
//! - Designate, De-Designate, Re-Designate, Redraft
//! - Save (create or update)
//! - Run regression
//!
//! ## Queries
//! - Get hedge relationship (read-through cache)
//! - Preview inception package
//!
//! `LifecycleOrchestrator` composes the handlers and converts their
//! results into `CommandResponse` envelopes.

mod common;
mod dedesignate;
mod designate;
mod get;
mod inception_package;
mod orchestrator;
mod preview;
mod redesignate;
mod redraft;
mod regression_runner;
mod response;
mod run_regression;
mod save;

#[cfg(test)]
pub(crate) mod test_support;

pub use inception_package::InceptionPackageGenerator;
pub use orchestrator::LifecycleOrchestrator;
pub use regression_runner::{decode_error_messages, RegressionRunner};
pub use response::CommandResponse;

// Commands
pub use dedesignate::{DeDesignateCommand, DeDesignateHandler, DeDesignateResult};
pub use designate::{
    DesignateCommand, DesignateHandler, DesignateResult, ANALYTICS_UNAVAILABLE_WARNING,
};
pub use redesignate::{ReDesignateCommand, ReDesignateHandler, ReDesignateResult};
pub use redraft::{RedraftCommand, RedraftHandler, RedraftResult};
pub use run_regression::{RunRegressionCommand, RunRegressionHandler, RunRegressionResult};
pub use save::{
    SaveHedgeRelationshipCommand, SaveHedgeRelationshipHandler, SaveHedgeRelationshipResult,
};

// Queries
pub use get::{GetHedgeRelationshipHandler, GetHedgeRelationshipQuery, GetHedgeRelationshipResult};
pub use preview::{PreviewInceptionPackageHandler, PreviewInceptionPackageQuery};
