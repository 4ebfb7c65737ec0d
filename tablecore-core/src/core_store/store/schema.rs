/*
    schema.rs - Ordered column set of a single table

    Columns keep their declaration order (it decides the cell layout of
    every row); lookup by name goes through a position map.
*/

use std::collections::HashMap;

use crate::core_store::model::{Column, ColumnType};

/// Outcome of declaring a column that did not conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDeclared {
    /// New column appended at this position
    Added(usize),
    /// Column already existed with the same type
    Unchanged,
}

/// Columns of one table, in declaration order
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    columns: Vec<Column>,
    positions: HashMap<String, usize>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a column. Returns the existing type as the error when the
    /// name is taken by a column of a different type.
    pub fn declare(&mut self, name: &str, column_type: ColumnType) -> Result<ColumnDeclared, ColumnType> {
        if let Some(&position) = self.positions.get(name) {
            let existing = self.columns[position].column_type;
            return if existing == column_type {
                Ok(ColumnDeclared::Unchanged)
            } else {
                Err(existing)
            };
        }

        let position = self.columns.len();
        self.columns.push(Column::new(name, column_type));
        self.positions.insert(name.to_string(), position);
        Ok(ColumnDeclared::Added(position))
    }

    /// Position and type of a column
    pub fn lookup(&self, name: &str) -> Option<(usize, ColumnType)> {
        self.positions
            .get(name)
            .map(|&position| (position, self.columns[position].column_type))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
