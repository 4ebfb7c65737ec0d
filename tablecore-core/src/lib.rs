//! TableCore: a dynamic-schema row store for persisted objects.
//!
//! Generated property accessors talk to the store through [`CoreProvider`]:
//! tables and typed columns are registered lazily, rows are allocated with
//! stable handles, and cells are read and written with a Rust type that is
//! checked against the column's declared type.
//!
//! ```
//! use tablecore_core::{ColumnType, CoreProvider, LocalStore, ValueKind};
//!
//! let store = LocalStore::new();
//! store.add_table("Person").unwrap();
//! store
//!     .add_column_to_table("Person", "Age", ColumnType::required(ValueKind::Int32))
//!     .unwrap();
//!
//! let row = store.insert_empty_row("Person").unwrap();
//! store.set_value("Person", row, "Age", 42i32).unwrap();
//! assert_eq!(store.get_value::<i32>("Person", row, "Age").unwrap(), 42);
//! ```

pub mod config;
pub mod core_store;
pub mod logging;
pub mod metrics;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Config, StoreConfig};
pub use core_store::{
    CellValue, Column, ColumnType, CoreProvider, LocalStore, ObjectHandle, PersistedObject,
    Property, RowHandle, StoreError, StoreResult, StoreStats, Value, ValueKind,
};
pub use logging::{init_logging, LogLevel};
