//! serde model of the notebook document

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One cell of a notebook document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Cell kind: `"code"` cells are executed, everything else passes
    /// through untouched
    pub cell_type: String,

    /// Source text. nbformat stores this either as a single string or
    /// as a list of line strings; both deserialize to the joined text.
    #[serde(default, deserialize_with = "source_text_or_lines")]
    pub source: String,

    /// Output records, present on code cells only. Omitted from
    /// serialization when absent so non-code cells round-trip unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Value>>,

    /// Fields this tool does not interpret (execution_count, cell
    /// metadata, attachments, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Construct a code cell with the given source
    pub fn code<S: Into<String>>(source: S) -> Self {
        Self {
            cell_type: "code".to_string(),
            source: source.into(),
            outputs: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    /// Construct a markdown cell with the given source
    pub fn markdown<S: Into<String>>(source: S) -> Self {
        Self {
            cell_type: "markdown".to_string(),
            source: source.into(),
            outputs: None,
            extra: Map::new(),
        }
    }

    /// Whether this cell is executable
    pub fn is_code(&self) -> bool {
        self.cell_type == "code"
    }

    /// The cell's source as owned text
    pub fn source_text(&self) -> String {
        self.source.clone()
    }
}

/// A notebook document: ordered cells plus a metadata map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,

    #[serde(default)]
    pub metadata: Map<String, Value>,

    #[serde(default = "default_nbformat")]
    pub nbformat: u64,

    #[serde(default)]
    pub nbformat_minor: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_nbformat() -> u64 {
    4
}

impl Notebook {
    /// Construct a notebook from cells, with empty metadata
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: Map::new(),
            nbformat: 4,
            nbformat_minor: 5,
            extra: Map::new(),
        }
    }

    /// The declared kernel name (`metadata.kernelspec.name`), falling
    /// back to `"python3"` when undeclared
    pub fn kernel_name(&self) -> &str {
        self.metadata
            .get("kernelspec")
            .and_then(|spec| spec.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("python3")
    }
}

/// Accept notebook source as either a string or a list of line strings
fn source_text_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SourceRepr {
        Text(String),
        Lines(Vec<String>),
    }

    Ok(match SourceRepr::deserialize(deserializer)? {
        SourceRepr::Text(text) => text,
        // nbformat line lists keep their trailing newlines
        SourceRepr::Lines(lines) => lines.concat(),
    })
}
