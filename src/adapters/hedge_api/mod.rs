//! Hedge Accounting API adapters.
//!
//! - `HedgeApiClient` - reqwest client for the remote API
//! - `InMemoryHedgeGateway` - in-process emulation for tests and offline runs
//! - `wire` - PascalCase wire types and their explicit domain mapping

mod client;
mod in_memory;
pub mod wire;

pub use client::{HedgeApiClient, HedgeApiConfig};
pub use in_memory::{GatewayOperation, InMemoryHedgeGateway, RegressionOutcome};
