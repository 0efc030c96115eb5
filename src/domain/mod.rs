//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait, command metadata)
//! - `hedging` - Hedge relationship aggregate, lifecycle states and validation rule sets

pub mod foundation;
pub mod hedging;
