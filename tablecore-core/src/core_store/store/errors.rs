/*
    errors.rs - Error types for the store subsystem

    Defines all error types that can occur in:
    - Schema catalog operations
    - Row allocation
    - Typed cell access
*/

use thiserror::Error;

use crate::core_store::model::{ColumnType, RowHandle};

/// Errors that can occur in the store subsystem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Table was never created
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Column was never added to an existing table
    #[error("Unknown column: {table}.{column}")]
    UnknownColumn { table: String, column: String },

    /// Column redeclared with a different type
    #[error("Schema conflict on {table}.{column}: declared as {existing}, requested {requested}")]
    SchemaConflict {
        table: String,
        column: String,
        existing: ColumnType,
        requested: ColumnType,
    },

    /// Row handle was never allocated in this table
    #[error("Row {row} not found in table {table}")]
    RowNotFound { table: String, row: RowHandle },

    /// Caller type disagrees with the declared column type
    #[error("Type mismatch on {table}.{column}: column is {expected}, accessed as {actual}")]
    TypeMismatch {
        table: String,
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    /// Empty or over-long table/column name
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Configured table limit reached
    #[error("Table limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Short label used for metrics and log fields
    pub fn label(&self) -> &'static str {
        match self {
            StoreError::UnknownTable(_) => "unknown_table",
            StoreError::UnknownColumn { .. } => "unknown_column",
            StoreError::SchemaConflict { .. } => "schema_conflict",
            StoreError::RowNotFound { .. } => "row_not_found",
            StoreError::TypeMismatch { .. } => "type_mismatch",
            StoreError::InvalidName(_) => "invalid_name",
            StoreError::CapacityExceeded { .. } => "capacity_exceeded",
            StoreError::Internal(_) => "internal",
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
