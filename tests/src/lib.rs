//! # Gift Exchange Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs  # Engine scenarios A-E against the public API
//!     └── flows.rs      # Engine + store + runtime, incl. racing writers
//! tests/benches/
//! └── assignment_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gx-tests
//! cargo test -p gx-tests integration::scenarios::
//! cargo bench -p gx-tests
//! ```

pub mod fixtures;
pub mod integration;
