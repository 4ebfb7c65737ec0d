/*
    table.rs - Rows and schema of a single table

    Locking:
    - The table lock guards the schema and the row vector. Column addition
      and row insertion take it exclusively; cell access takes it shared.
    - Each row carries its own lock, so cell writes to different rows run
      concurrently while writes to the same cell are serialized.

    A row's cell vector always has one slot per declared column, in
    declaration order.
*/

use std::sync::{PoisonError, RwLock};

use crate::core_store::model::{Column, ColumnType, RowHandle, Value};
use crate::core_store::store::errors::{StoreError, StoreResult};
use crate::core_store::store::schema::{ColumnDeclared, TableSchema};

/// Helper to convert poison errors into StoreError
pub(crate) fn handle_poison<T>(_err: PoisonError<T>) -> StoreError {
    StoreError::Internal("Lock poisoned: a thread panicked while holding the lock".to_string())
}

#[derive(Debug)]
struct Row {
    cells: RwLock<Vec<Value>>,
}

#[derive(Debug)]
struct TableState {
    schema: TableSchema,
    rows: Vec<Row>,
}

/// A named table: typed columns plus append-only rows
#[derive(Debug)]
pub struct Table {
    name: String,
    state: RwLock<TableState>,
}

impl Table {
    pub fn new(name: impl Into<String>, row_capacity: usize) -> Self {
        Table {
            name: name.into(),
            state: RwLock::new(TableState {
                schema: TableSchema::new(),
                rows: Vec::with_capacity(row_capacity),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a column, backfilling a default cell in every existing row.
    ///
    /// Returns the number of rows backfilled, or `None` when the column
    /// already existed with the same type.
    pub fn add_column(&self, column: &str, column_type: ColumnType) -> StoreResult<Option<usize>> {
        let mut state = self.state.write().map_err(handle_poison)?;

        let declared = state.schema.declare(column, column_type).map_err(|existing| {
            StoreError::SchemaConflict {
                table: self.name.clone(),
                column: column.to_string(),
                existing,
                requested: column_type,
            }
        })?;

        match declared {
            ColumnDeclared::Unchanged => Ok(None),
            ColumnDeclared::Added(_) => {
                let default = Value::default_for(column_type);
                for row in state.rows.iter_mut() {
                    // Exclusive access to the table means no cell guard is live here;
                    // a poisoned row still holds a well-formed cell vector.
                    row.cells
                        .get_mut()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(default.clone());
                }
                Ok(Some(state.rows.len()))
            }
        }
    }

    /// Append a row with every column set to its default
    pub fn insert_row(&self) -> StoreResult<RowHandle> {
        let mut state = self.state.write().map_err(handle_poison)?;

        let handle = RowHandle(state.rows.len() as u64);
        let cells = state
            .schema
            .columns()
            .iter()
            .map(|c| Value::default_for(c.column_type))
            .collect();
        state.rows.push(Row {
            cells: RwLock::new(cells),
        });

        Ok(handle)
    }

    /// Read a cell. With `expected` set, the column's declared type must match it.
    pub fn read_cell(
        &self,
        row: RowHandle,
        column: &str,
        expected: Option<ColumnType>,
    ) -> StoreResult<Value> {
        let state = self.state.read().map_err(handle_poison)?;
        let (position, _, target) = self.locate(&state, row, column, expected)?;

        let cells = target.cells.read().map_err(handle_poison)?;
        Ok(cells[position].clone())
    }

    /// Replace a cell. With `expected` set, the column's declared type must
    /// match it; otherwise the value itself is checked against the column.
    pub fn write_cell(
        &self,
        row: RowHandle,
        column: &str,
        value: Value,
        expected: Option<ColumnType>,
    ) -> StoreResult<()> {
        let state = self.state.read().map_err(handle_poison)?;
        let (position, declared, target) = self.locate(&state, row, column, expected)?;

        if expected.is_none() && !value.fits(declared) {
            return Err(self.type_mismatch(column, declared, value.describe_against(declared)));
        }

        let mut cells = target.cells.write().map_err(handle_poison)?;
        cells[position] = value;
        Ok(())
    }

    /// Resolve column position and row, checking errors in contract order:
    /// unknown column, missing row, type mismatch.
    fn locate<'a>(
        &self,
        state: &'a TableState,
        row: RowHandle,
        column: &str,
        expected: Option<ColumnType>,
    ) -> StoreResult<(usize, ColumnType, &'a Row)> {
        let (position, declared) = state
            .schema
            .lookup(column)
            .ok_or_else(|| self.unknown_column(column))?;

        let target = row
            .index()
            .and_then(|index| state.rows.get(index))
            .ok_or_else(|| StoreError::RowNotFound {
                table: self.name.clone(),
                row,
            })?;

        if let Some(actual) = expected {
            if actual != declared {
                return Err(self.type_mismatch(column, declared, actual));
            }
        }

        Ok((position, declared, target))
    }

    fn unknown_column(&self, column: &str) -> StoreError {
        StoreError::UnknownColumn {
            table: self.name.clone(),
            column: column.to_string(),
        }
    }

    fn type_mismatch(&self, column: &str, expected: ColumnType, actual: ColumnType) -> StoreError {
        StoreError::TypeMismatch {
            table: self.name.clone(),
            column: column.to_string(),
            expected,
            actual,
        }
    }

    pub fn columns(&self) -> StoreResult<Vec<Column>> {
        let state = self.state.read().map_err(handle_poison)?;
        Ok(state.schema.columns().to_vec())
    }

    pub fn column_type(&self, column: &str) -> StoreResult<ColumnType> {
        let state = self.state.read().map_err(handle_poison)?;
        state
            .schema
            .lookup(column)
            .map(|(_, column_type)| column_type)
            .ok_or_else(|| self.unknown_column(column))
    }

    pub fn column_count(&self) -> StoreResult<usize> {
        Ok(self.state.read().map_err(handle_poison)?.schema.len())
    }

    pub fn row_count(&self) -> StoreResult<u64> {
        Ok(self.state.read().map_err(handle_poison)?.rows.len() as u64)
    }
}
