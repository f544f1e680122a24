//! 内存存储

pub mod backend;
pub mod memory_store;

pub use backend::BackendStore;
pub use memory_store::MemoryStore;
