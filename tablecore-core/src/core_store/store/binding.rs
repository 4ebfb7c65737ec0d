/*
    binding.rs - Object binding layer

    What generated property accessors compile down to: a type declares its
    table and properties once, and each instance is a row handle in that
    table. Property reads and writes go straight through `CoreProvider`.
*/

use std::fmt;
use std::marker::PhantomData;

use crate::core_store::model::{CellValue, ColumnType, RowHandle};
use crate::core_store::store::errors::StoreResult;
use crate::core_store::store::provider::CoreProvider;

/// A persisted property: column name plus the column type of its Rust type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    pub name: &'static str,
    pub column_type: ColumnType,
}

impl Property {
    /// Property backed by the column type of `T`
    pub fn of<T: CellValue>(name: &'static str) -> Self {
        Property {
            name,
            column_type: T::column_type(),
        }
    }
}

/// A type whose instances are persisted as rows of one table
pub trait PersistedObject {
    /// Table holding every instance of this type
    const TABLE_NAME: &'static str;

    /// Persisted properties, in declaration order
    fn properties() -> Vec<Property>;
}

/// A persisted instance of `O`: the row that holds its state
pub struct ObjectHandle<O> {
    row: RowHandle,
    _object: PhantomData<fn() -> O>,
}

impl<O: PersistedObject> ObjectHandle<O> {
    /// Bind to an existing row of `O::TABLE_NAME`
    pub fn attach(row: RowHandle) -> Self {
        ObjectHandle {
            row,
            _object: PhantomData,
        }
    }

    pub fn row(&self) -> RowHandle {
        self.row
    }

    pub fn table(&self) -> &'static str {
        O::TABLE_NAME
    }

    /// Read a property
    pub fn get<T: CellValue, P: CoreProvider>(&self, provider: &P, property: &str) -> StoreResult<T> {
        provider.get_value(O::TABLE_NAME, self.row, property)
    }

    /// Write a property
    pub fn set<T: CellValue, P: CoreProvider>(&self, provider: &P, property: &str, value: T) -> StoreResult<()> {
        provider.set_value(O::TABLE_NAME, self.row, property, value)
    }
}

// Manual impls: derives would require `O: Clone` etc.
impl<O> Clone for ObjectHandle<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for ObjectHandle<O> {}

impl<O> PartialEq for ObjectHandle<O> {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row
    }
}

impl<O> Eq for ObjectHandle<O> {}

impl<O: PersistedObject> fmt::Debug for ObjectHandle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("table", &O::TABLE_NAME)
            .field("row", &self.row)
            .finish()
    }
}
