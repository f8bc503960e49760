//! nbcache - Notebook execution with filesystem output caching
//!
//! Runs the code cells of a notebook through an execution engine and
//! caches their outputs on the local filesystem, keyed by a content
//! hash of each cell's effective source (its own source, prefixed by
//! the shared setup preamble for cells past the setup region).
//! Re-running a notebook only recomputes cells whose effective source
//! changed; everything else is served from the cache.

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod notebook;

pub use cache::OutputCache;
pub use config::Config;
pub use core::{cache_key, process_notebook, ProcessReport, SetupSet};
pub use engine::{EngineContext, ExecutionEngine, SubprocessEngine};
pub use error::{NbCacheError, Result};
