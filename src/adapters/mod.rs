//! Adapters - Implementations of ports for external systems.
//!
//! - `hedge_api` - Hedge Accounting API client and in-memory emulation
//! - `cache` - In-memory reference data cache
//! - `clock` - System and fixed clocks
//! - `http` - axum REST surface

pub mod cache;
pub mod clock;
pub mod hedge_api;
pub mod http;

pub use cache::InMemoryReferenceCache;
pub use clock::{FixedClock, SystemClock};
pub use hedge_api::{HedgeApiClient, HedgeApiConfig, InMemoryHedgeGateway};
