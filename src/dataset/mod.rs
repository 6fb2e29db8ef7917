//! In-memory tabular snapshots.
//!
//! A [`Dataset`] is an ordered set of uniquely named, equal-length columns.
//! Each column carries a typed value vector; its type decides the
//! [`ColumnKind`] and therefore which drift tests apply.

mod column;


pub use column::{Column, ColumnKind, ColumnValues};

use std::collections::HashSet;

use crate::error::{DriftError, Result};

/// Ordered collection of named columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset, rejecting ragged columns and duplicate names
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(DriftError::invalid_dataset(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
            if column.len() != n_rows {
                return Err(DriftError::invalid_dataset(format!(
                    "column '{}' has {} values, expected {}",
                    column.name(),
                    column.len(),
                    n_rows
                )));
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Keep only the last `n` rows
    pub fn tail(&self, n: usize) -> Self {
        let start = self.n_rows.saturating_sub(n);
        let columns: Vec<Column> = self.columns.iter().map(|c| c.slice_from(start)).collect();
        let n_rows = self.n_rows - start;
        Self { columns, n_rows }
    }
}
