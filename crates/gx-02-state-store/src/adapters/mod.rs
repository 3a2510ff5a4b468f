//! Storage adapters

mod cached;
mod file;
mod lock;
mod memory;

pub use cached::{CachedRecordStore, LocalCache};
pub use file::FileRecordStore;
pub use lock::StoreLock;
pub use memory::InMemoryRecordStore;
