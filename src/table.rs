//! Local table writer: the delimited output file and its column schema.
//!
//! The schema doubles as the BigQuery load schema, so column names map to
//! warehouse type tags rather than Rust types.

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::error::Result;
use crate::transform::OutputRow;


/// Warehouse column type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    String,
    Float,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::String => "STRING",
            ColumnType::Float => "FLOAT",
        }
    }
}

/// Ordered column mapping; order fixes both the CSV header and the
/// warehouse schema.
#[derive(Debug, Clone)]
pub struct TableSchema {
    columns: Vec<(&'static str, ColumnType)>,
}

impl TableSchema {
    pub fn new(columns: Vec<(&'static str, ColumnType)>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, ColumnType)> + '_ {
        self.columns.iter().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Column layout of the standings table. Must stay in lockstep with the
/// field order of [`OutputRow`].
pub fn standings_schema() -> TableSchema {
    use ColumnType::*;
    TableSchema::new(vec![
        ("year", Integer),
        ("owner", String),
        ("team_name", String),
        ("wins", Integer),
        ("losses", Integer),
        ("ties", Integer),
        ("win_pct", Float),
        ("pts_for", Float),
        ("ppg", Float),
        ("pts_against", Float),
        ("playoff_finish", Integer),
        ("reg_season_finish", Integer),
    ])
}

/// Truncate (or create) the file at `path` and write the header row only.
///
/// Parent directories are created as needed; the rest of the run appends
/// below this header.
pub fn create(path: &Path, schema: &TableSchema) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(schema.names())?;
    writer.flush()?;
    Ok(())
}

/// Append rows to an existing file, one CSV line per row.
///
/// Columns follow [`OutputRow`] field order, matching the header written by
/// [`create`]. There is no partial-write recovery: an interrupted append
/// leaves a prefix of rows behind, and a rerun starts over with [`create`].
pub fn append(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
