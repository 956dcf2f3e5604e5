// crates/mutual-store/src/lib.rs
//
// mutual-store: Storage layer for the Mutual claim pool.
//
// Provides two `PoolStore` backends (an in-memory map store for tests and
// embedding, and a RocksDB store for the CLI's data directory) and
// `PoolTxn`, the read-through overlay every engine operation stages its
// writes in before a single atomic commit.

pub mod memory;
pub mod rocks;
pub mod txn;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use txn::PoolTxn;
