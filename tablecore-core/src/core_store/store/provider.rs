//! Core Provider Trait
//!
//! The contract that generated property accessors target. Accessors only
//! ever see table, column and row addresses plus a Rust type per property;
//! how rows are laid out is up to the implementation.

use crate::core_store::model::{CellValue, ColumnType, RowHandle};
use crate::core_store::store::binding::{ObjectHandle, PersistedObject};
use crate::core_store::store::errors::StoreResult;

/// Typed row/column storage behind persisted objects
///
/// Implementations must ensure:
/// - Schema creation is idempotent and column types never change
/// - Row handles are assigned from 0 upwards and never reused
/// - A failed call leaves no partial mutation behind
pub trait CoreProvider: Send + Sync {
    /// Whether a table with this name exists. Never fails.
    fn has_table(&self, table: &str) -> bool;

    /// Create a table; a no-op when it already exists.
    fn add_table(&self, table: &str) -> StoreResult<()>;

    /// Declare a column, backfilling defaults into existing rows.
    ///
    /// Returns `StoreError::SchemaConflict` if the column exists with a
    /// different type.
    fn add_column_to_table(&self, table: &str, column: &str, column_type: ColumnType) -> StoreResult<()>;

    /// Append a row with default values and return its handle.
    fn insert_empty_row(&self, table: &str) -> StoreResult<RowHandle>;

    /// Read a cell as `T`; `T` must map to the column's declared type.
    fn get_value<T: CellValue>(&self, table: &str, row: RowHandle, column: &str) -> StoreResult<T>
    where
        Self: Sized;

    /// Replace a cell with a `T`; `T` must map to the column's declared type.
    fn set_value<T: CellValue>(&self, table: &str, row: RowHandle, column: &str, value: T) -> StoreResult<()>
    where
        Self: Sized;

    /// Create the table and every property column of `O`. Safe to repeat.
    fn register<O: PersistedObject>(&self) -> StoreResult<()>
    where
        Self: Sized,
    {
        if !self.has_table(O::TABLE_NAME) {
            self.add_table(O::TABLE_NAME)?;
        }
        for property in O::properties() {
            self.add_column_to_table(O::TABLE_NAME, property.name, property.column_type)?;
        }
        Ok(())
    }

    /// Register `O` and allocate a row for a new instance.
    fn create_object<O: PersistedObject>(&self) -> StoreResult<ObjectHandle<O>>
    where
        Self: Sized,
    {
        self.register::<O>()?;
        let row = self.insert_empty_row(O::TABLE_NAME)?;
        Ok(ObjectHandle::attach(row))
    }
}
