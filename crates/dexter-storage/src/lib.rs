//! Dexter Storage
//!
//! Local key-value persistence for client state:
//! - `LocalStore` trait (string values by key)
//! - `MemoryStore` for tests and ephemeral sessions
//! - `FileStore`, a JSON object file written through atomically

pub mod atomic_writer;
pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{LocalStore, StorageError, StorageResult};
