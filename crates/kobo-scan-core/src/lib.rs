//! Core library for identity document scan normalization.
//!
//! This crate provides:
//! - Adaptation of raw recognition SDK results across known layouts
//! - Field extraction into a canonical scan record
//! - Age derivation from free-form birth dates
//! - Capture and companion-app delivery with fixed-delay retries (native)

pub mod adapter;
pub mod clock;
pub mod derive;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod summary;

#[cfg(feature = "native")]
pub mod capture;
#[cfg(feature = "native")]
pub mod delivery;
#[cfg(feature = "native")]
pub mod orchestrator;
#[cfg(feature = "native")]
pub mod retry;

pub use adapter::{Adaptation, AdaptedResult, RawAdapter, RawShape};
pub use clock::{Clock, FixedClock, SystemClock};
pub use derive::{compute_age, parse_birth_date};
pub use error::{AdapterError, CaptureError, CompanionError, DeliveryError, Result, ScanError};
pub use extract::FieldExtractor;
pub use models::{
    BackOnlyPolicy, DeliveryPayload, Dependent, NormalizedBackFields, NormalizedFrontFields,
    ScanConfig, ScanMode, ScanRecord, SCHEMA_VERSION,
};
pub use normalize::Normalizer;
pub use summary::{format_record, format_summary};

#[cfg(feature = "native")]
pub use capture::{CaptureRequest, CaptureResponse, DocumentScanner, ReplayScanner};
#[cfg(feature = "native")]
pub use delivery::{Companion, DeliveryCoordinator};
#[cfg(feature = "native")]
pub use orchestrator::{ScanOrchestrator, ScanOutcome, ScanState};
#[cfg(feature = "native")]
pub use retry::RetryPolicy;
