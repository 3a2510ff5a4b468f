//! # Gift Exchange Runtime
//!
//! Library side of the `gift-exchange` binary.
//!
//! ## Modular Structure
//!
//! - `config` - `RuntimeConfig` with `GX_*` environment overrides
//! - `errors` - `RuntimeError`
//! - `runtime` - `ExchangeRuntime`, one exchange behind a store

pub mod config;
pub mod errors;
pub mod runtime;

pub use config::RuntimeConfig;
pub use errors::RuntimeError;
pub use runtime::{
    AssignOutcome, DeclareOutcome, DynRecordStore, ExchangeRuntime, InitOutcome, StatusReport,
};
