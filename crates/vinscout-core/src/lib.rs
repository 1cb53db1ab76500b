//! VINScout Core: VIN validation, decoding and lookup history
//!
//! Identifies a vehicle from its 17-character VIN. The VIN is checked locally
//! against ISO 3779, decoded through the NHTSA vPIC API when it is
//! structurally valid, and successful lookups are kept in a short history.
//!
//! ## Key Components
//!
//! - `validator`: length, charset and check-digit validation
//! - `nhtsa`: wire shape of the decoding API and its mapping into `Vehicle`
//! - `VehicleService`: the lookup pipeline over an injected `HttpTransport`
//! - `HistoryCache`: five newest unique vehicles over an injected `HistoryStore`
//! - `Session`: composes the two and discards superseded lookups

pub mod config;
mod error;
pub mod fakes;
pub mod history;
pub mod metrics;
pub mod nhtsa;
pub mod obs;
pub mod service;
pub mod session;
pub mod storage_traits;
pub mod store;
pub mod telemetry;
pub mod transport;
pub mod validator;
pub mod vehicle;

pub use config::LookupConfig;
pub use error::{LookupError, Result, StorageError, TransportError, ValidationError};
pub use history::HistoryCache;
pub use metrics::METRICS;
pub use nhtsa::{DecodeResponse, RawApiRecord};
pub use service::VehicleService;
pub use session::{normalize_input, DecodeOutcome, Session};
pub use storage_traits::{HistoryStore, StorageResult};
pub use store::FsHistoryStore;
pub use telemetry::init_tracing;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use validator::{compute_check_digit, forbidden_letters, validate};
pub use vehicle::Vehicle;

/// VINScout version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
