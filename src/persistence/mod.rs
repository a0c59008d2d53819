//! Snapshot persistence: transports, envelope format and schema-tolerant loading.

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::*;
pub use snapshot::*;
pub use store::*;
