//! Execution engine seam
//!
//! The processor drives an injected engine through two small traits:
//! `ExecutionEngine` starts a fresh, isolated context for one
//! (setup prefix + cell) attempt, and `EngineContext` runs source in
//! it. Contexts are scoped resources; dropping one releases whatever
//! the engine holds, so teardown is guaranteed even when a run fails.

mod subprocess;

pub use subprocess::SubprocessEngine;

use crate::error::Result;
use serde_json::Value;
use std::path::Path;

/// A live execution context, scoped to a single cell attempt
pub trait EngineContext {
    /// Run source text in this context and return the output records
    /// it produced. State established by earlier `run` calls in the
    /// same context (imports, bindings) is visible to later ones.
    fn run(&mut self, source: &str) -> Result<Vec<Value>>;
}

/// Factory for execution contexts
pub trait ExecutionEngine {
    /// Start a fresh context for the given kernel, executing in
    /// `working_dir`
    fn start(&self, kernel_name: &str, working_dir: &Path) -> Result<Box<dyn EngineContext>>;
}
