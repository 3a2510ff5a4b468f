//! Application layer for the assignment engine
//!
//! Service orchestration over the domain, algorithms and ports.

pub mod service;

pub use service::AssignmentService;
