//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `HedgeAccountingGateway` - Remote accounting API (persistence, regression,
//!   inception packages, lifecycle transitions)
//! - `ReferenceDataCache` - TTL cache for read models
//! - `Clock` - Current calendar date for date-based rules

mod clock;
mod hedge_accounting_gateway;
mod reference_cache;

pub use clock::Clock;
pub use hedge_accounting_gateway::{
    CancellationSignal, GatewayError, HedgeAccountingGateway, InceptionPackage, RegressionPayload,
};
pub use reference_cache::{hedge_relationship_key, CacheError, ReferenceDataCache};
