//! Gearsmith Integration - Catalog snapshots and request payloads
//!
//! The boundary between JSON on disk and the engine: catalog records are
//! validated and converted into core items, live prices fall back to static
//! item values, and request payloads become engine requests.

pub mod conversion;
pub mod error;
pub mod snapshot;
pub mod types;

pub use conversion::{item_to_record, record_to_item};
pub use error::IntegrationError;
pub use snapshot::{load_catalog, load_json, parse_catalog, PriceSnapshot};
pub use types::*;
