//! Data models: canonical record, delivery payload, configuration.

pub mod config;
pub mod payload;
pub mod record;

pub use config::{BackOnlyPolicy, ScanConfig, ScanMode};
pub use payload::DeliveryPayload;
pub use record::{Dependent, NormalizedBackFields, NormalizedFrontFields, ScanRecord, SCHEMA_VERSION};
