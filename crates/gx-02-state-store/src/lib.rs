//! # GX-02: State Store
//!
//! Persistence for the exchange record. The engine is pure; this crate
//! owns the read-compute-write cycle around it.
//!
//! ## Guarantees
//!
//! | ID | Guarantee | Description |
//! |----|-----------|-------------|
//! | 1 | Versioned writes | Every write names the version it replaces |
//! | 2 | No lost updates | `transact` retries on conflict against fresh state |
//! | 3 | Integrity | Fingerprint checked on every load |
//! | 4 | Atomic files | Temp file + rename, under an `fs2` lock |
//! | 5 | Cache fallback | Reads survive a primary outage; writes do not |
//!
//! ## Crate Structure
//!
//! - `domain/` - `StoredRecord`, fingerprints, errors
//! - `ports/` - `RecordStore`
//! - `adapters/` - in-memory, file, cached
//! - `service.rs` - `ExchangeStore`

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{CachedRecordStore, FileRecordStore, InMemoryRecordStore, LocalCache, StoreLock};
pub use config::StoreConfig;
pub use domain::errors::{StoreError, TransactError};
pub use domain::record::{fingerprint, StoredRecord};
pub use ports::outbound::RecordStore;
pub use service::ExchangeStore;
