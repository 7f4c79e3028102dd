#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// A single scalar cell value.
///
/// Values ingested from CSV arrive as `Text`; `Number` cells are produced by
/// numeric coercion. `Null` covers absent and explicitly empty cells.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// The numeric payload, if this cell holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Literal string form used for equality-based statistics (`nunique`,
    /// mode, duplicate keys). `None` for null cells.
    pub fn to_literal(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(n) => Some(format!("{n}")),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// One row: a mapping from column name to cell value.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub cells: BTreeMap<String, Cell>,
}

const NULL_CELL: Cell = Cell::Null;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell for `column`, treating absent columns as null.
    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&NULL_CELL)
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Cell)>,
        S: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(name, cell)| (name.into(), cell))
                .collect(),
        }
    }
}

/// An in-memory dataset: an ordered sequence of records sharing one column
/// set. Lives for a single analysis or cleaning invocation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one column, in row order.
    pub fn column_values<'a>(&'a self, column: &str) -> Vec<&'a Cell> {
        self.records.iter().map(|r| r.get(column)).collect()
    }
}
