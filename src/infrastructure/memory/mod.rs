//! In-process storage backend.
//!
//! Selected with `STORAGE_BACKEND=memory` and used by the HTTP tests. Data
//! lives for the lifetime of the process.

mod store;

pub use store::MemoryStore;
