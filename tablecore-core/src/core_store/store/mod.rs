/*
    Store subsystem - Schema catalog and row store
*/

pub mod binding;
pub mod catalog;
pub mod errors;
pub mod local_store;
pub mod provider;
pub mod schema;
pub mod table;

pub use binding::{ObjectHandle, PersistedObject, Property};
pub use catalog::Catalog;
pub use errors::*;
pub use local_store::{LocalStore, StoreStats};
pub use provider::CoreProvider;
pub use schema::{ColumnDeclared, TableSchema};
pub use table::Table;
