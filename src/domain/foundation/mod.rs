//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types, the state machine trait and command
//! metadata that form the vocabulary of the lifecycle engine.

mod command;
mod errors;
mod ids;
mod state_machine;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClientId, HedgeRelationshipId};
pub use state_machine::StateMachine;
