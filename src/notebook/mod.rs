//! Notebook document model and serialization
//!
//! Minimal nbformat v4 model: cells with a type, source text, and
//! output records, plus a metadata map. Fields this tool does not
//! interpret are carried through a flattened map so documents
//! round-trip losslessly.

mod model;

pub use model::{Cell, Notebook};

use crate::error::{NbCacheError, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read a notebook from a file
pub fn read(path: &Path) -> Result<Notebook> {
    let file = File::open(path).map_err(|e| NbCacheError::NotebookRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| NbCacheError::NotebookRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write a notebook to any writer in its native JSON format
pub fn write<W: Write>(notebook: &Notebook, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, notebook)?;
    writeln!(writer)?;
    Ok(())
}
