//! Cache-aware notebook pass
//!
//! Walks a notebook's cells strictly in order. For each code cell the
//! cache key of its effective source is looked up in the output store;
//! a hit attaches the stored records, a miss starts a fresh engine
//! context, replays the necessary setup prefix, runs the cell, and
//! stores what it produced. Non-code cells pass through untouched.

use crate::cache::OutputCache;
use crate::config::Config;
use crate::core::key::cache_key;
use crate::core::setup::SetupSet;
use crate::engine::ExecutionEngine;
use crate::error::Result;
use crate::notebook::Notebook;
use std::path::Path;

/// Summary of one notebook pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    /// Code cells served from the cache
    pub cache_hits: usize,
    /// Code cells run through the execution engine
    pub executed: usize,
}

/// Process one notebook against the cache, mutating cell outputs in
/// place.
///
/// `working_dir` is the directory cells execute in, normally the
/// notebook's containing folder. Progress lines go to the `progress`
/// callback; the notebook itself is the caller's to serialize.
pub fn process_notebook(
    notebook: &mut Notebook,
    working_dir: &Path,
    config: &Config,
    engine: &dyn ExecutionEngine,
    progress: &dyn Fn(&str),
) -> Result<ProcessReport> {
    let cache = OutputCache::new(config.cache_dir.clone());
    let kernel_name = notebook.kernel_name().to_string();
    let setup = SetupSet::extract(&notebook.cells, config.setup_cells);

    let mut report = ProcessReport::default();
    for (idx, cell) in notebook.cells.iter_mut().enumerate() {
        if !cell.is_code() {
            continue;
        }
        let source = cell.source_text();
        let key = cache_key(&setup.effective_source(idx, &source));

        match cache.get(&key) {
            Ok(outputs) => {
                progress(&format!("Cache hit [{}]: {}", idx, key));
                cell.outputs = Some(outputs);
                report.cache_hits += 1;
            }
            Err(err) if err.is_cache_miss() => {
                progress(&format!(
                    "Executing cell [{}] with kernel: {}",
                    idx, kernel_name
                ));
                let prefix = setup.replay_prefix(idx, &source)?;

                // Fresh context per attempt; dropping it at the end of
                // this scope releases the engine's resources whether or
                // not the runs succeeded.
                let mut context = engine.start(&kernel_name, working_dir)?;
                if let Some(prefix_source) = prefix {
                    // Setup runs for side effects only; its outputs are
                    // neither cached nor attached to any cell.
                    context.run(&prefix_source)?;
                }
                let outputs = context.run(&source)?;

                cache.put(&key, &outputs)?;
                cell.outputs = Some(outputs);
                report.executed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}
