//! Core cache-key derivation and the cache-aware notebook pass

pub mod key;
pub mod processor;
pub mod setup;

pub use key::cache_key;
pub use processor::{process_notebook, ProcessReport};
pub use setup::SetupSet;
