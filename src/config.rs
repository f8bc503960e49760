//! Configuration types for nbcache

use std::env;
use std::path::PathBuf;

/// Configuration options for a notebook-processing run
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the output cache
    /// (default: `nb_output_cache` under the system temp directory)
    pub cache_dir: PathBuf,

    /// Number of code cells at the beginning of the notebook to treat
    /// as setup for other cells (default: 1).
    ///
    /// If these cells change, all cached outputs of later cells are
    /// invalidated. When a later cell is executed, these cells are run
    /// first, but no other cells are.
    pub setup_cells: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: env::temp_dir().join("nb_output_cache"),
            setup_cells: 1,
        }
    }
}
