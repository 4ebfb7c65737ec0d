/*
    core_store - Dynamic-schema row store

    The storage layer behind persisted objects.
    Handles:
    - Table and column registration (schema grows at runtime)
    - Row allocation with stable handles
    - Typed and untyped cell access
    - Binding of persisted object types to tables
*/

pub mod model;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export commonly used types
pub use model::{CellValue, Column, ColumnType, ParseValueError, RowHandle, Value, ValueKind};
pub use store::{
    CoreProvider, LocalStore, ObjectHandle, PersistedObject, Property, StoreError, StoreResult,
    StoreStats,
};
