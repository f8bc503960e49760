//! Content-addressed output cache
//!
//! This module provides durable key-value storage of cell output
//! records as JSON files under a sharded directory layout. Entries are
//! addressed by the hex digest of a cell's effective source.

mod storage;

pub use storage::OutputCache;
