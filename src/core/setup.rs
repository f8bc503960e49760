//! Setup-cell extraction and replay-prefix computation
//!
//! The first `setup_cells` code cells of a notebook form the setup set:
//! the preamble whose side effects (imports, variable bindings) later
//! cells depend on. The set is captured once per pass and is the
//! immutable reference for both cache-key derivation and the decision
//! of how much setup to replay before a cache-missed cell.

use crate::error::{NbCacheError, Result};
use crate::notebook::Cell;

/// The leading code cells treated as required preamble for later cells
#[derive(Debug, Clone)]
pub struct SetupSet {
    /// Sources of the setup cells, in document order
    sources: Vec<String>,
    /// Index of the last cell the extraction scan consumed. Cells with
    /// a larger index are past the setup region.
    boundary: usize,
}

impl SetupSet {
    /// Scan cells from the start and collect the first `wanted` code
    /// cell sources.
    ///
    /// The scan stops as soon as the count is satisfied or the cells
    /// are exhausted, whichever comes first; the boundary records the
    /// index where it stopped.
    pub fn extract(cells: &[Cell], wanted: usize) -> Self {
        let mut sources = Vec::new();
        let mut boundary = 0;
        for (idx, cell) in cells.iter().enumerate() {
            if sources.len() >= wanted {
                break;
            }
            boundary = idx;
            if cell.is_code() {
                sources.push(cell.source_text());
            }
        }
        Self { sources, boundary }
    }

    /// Sources of the setup cells, in document order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Whether the set holds no setup sources
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Index of the last cell consumed by the extraction scan
    pub fn boundary(&self) -> usize {
        self.boundary
    }

    /// The text actually hashed for the cell at `cell_index`.
    ///
    /// Cells past the setup region hash the setup sources joined with
    /// newlines ahead of their own source; setup cells themselves (and
    /// every cell when the set is empty) hash their own source alone.
    /// This is the cache correctness contract: identical effective
    /// source, identical key.
    pub fn effective_source(&self, cell_index: usize, source: &str) -> String {
        if cell_index > self.boundary && !self.is_empty() {
            let mut parts: Vec<&str> = self.sources.iter().map(String::as_str).collect();
            parts.push(source);
            parts.join("\n")
        } else {
            source.to_string()
        }
    }

    /// The setup source to run before a cache-missed cell, joined with
    /// newlines; `None` when nothing needs replaying.
    ///
    /// A cell past the setup region replays the full setup set. A cell
    /// inside the setup region replays only the setup sources strictly
    /// before its own, located by exact text match — a failed match
    /// (duplicate or mutated setup source) is an explicit error rather
    /// than a silent mis-replay.
    pub fn replay_prefix(&self, cell_index: usize, source: &str) -> Result<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        if cell_index > self.boundary {
            return Ok(Some(self.sources.join("\n")));
        }
        let position = self
            .sources
            .iter()
            .position(|s| s == source)
            .ok_or_else(|| NbCacheError::SetupLookup {
                cell_source: source.to_string(),
            })?;
        if position == 0 {
            Ok(None)
        } else {
            Ok(Some(self.sources[..position].join("\n")))
        }
    }
}
