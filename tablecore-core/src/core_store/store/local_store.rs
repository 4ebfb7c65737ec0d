/*
    local_store.rs - In-process store handle

    Provides the main API for creating schema, allocating rows and reading
    or writing cells. Every store is an independent value: there is no
    process-wide catalog, so tests and embedders can run as many side by
    side as they need.

    Architecture:
    - Catalog of tables, each owning its schema and rows
    - CoreProvider contract for generated accessors
    - Untyped access and introspection for tools
*/

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::StoreConfig;
use crate::core_store::model::{CellValue, Column, ColumnType, RowHandle, Value};
use crate::core_store::store::catalog::Catalog;
use crate::core_store::store::errors::{StoreError, StoreResult};
use crate::core_store::store::provider::CoreProvider;
use crate::metrics::{self, Timer};

/// Main local storage interface
#[derive(Debug)]
pub struct LocalStore {
    catalog: Catalog,
}

impl LocalStore {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        debug!(?config, "creating local store");
        LocalStore {
            catalog: Catalog::new(config),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        self.catalog.config()
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .catalog
            .tables()?
            .iter()
            .map(|table| table.name().to_string())
            .collect())
    }

    /// Columns of a table in declaration order
    pub fn columns(&self, table: &str) -> StoreResult<Vec<Column>> {
        self.catalog.table(table)?.columns()
    }

    /// Declared type of a column
    pub fn column_type(&self, table: &str, column: &str) -> StoreResult<ColumnType> {
        self.catalog.table(table)?.column_type(column)
    }

    /// Number of rows ever inserted into a table
    pub fn row_count(&self, table: &str) -> StoreResult<u64> {
        self.catalog.table(table)?.row_count()
    }

    /// Get storage statistics
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let mut stats = StoreStats::default();
        for table in self.catalog.tables()? {
            stats.table_count += 1;
            stats.column_count += table.column_count()?;
            stats.row_count += table.row_count()?;
        }
        Ok(stats)
    }

    /// Read a cell without naming its type
    pub fn get_dynamic(&self, table: &str, row: RowHandle, column: &str) -> StoreResult<Value> {
        let timer = Timer::new("get_dynamic");
        let result = self
            .catalog
            .table(table)
            .and_then(|t| t.read_cell(row, column, None));
        timer.stop();

        if result.is_ok() {
            metrics::record_counter(metrics::CELLS_READ, 1);
            self.trace_cell("read", table, row, column);
        }
        self.observe("get_dynamic", result)
    }

    /// Write a cell without naming its type; the value must fit the column
    pub fn set_dynamic(&self, table: &str, row: RowHandle, column: &str, value: Value) -> StoreResult<()> {
        let timer = Timer::new("set_dynamic");
        let result = self
            .catalog
            .table(table)
            .and_then(|t| t.write_cell(row, column, value, None));
        timer.stop();

        if result.is_ok() {
            metrics::record_counter(metrics::CELLS_WRITTEN, 1);
            self.trace_cell("write", table, row, column);
        }
        self.observe("set_dynamic", result)
    }

    fn trace_cell(&self, access: &'static str, table: &str, row: RowHandle, column: &str) {
        if self.config().trace_cell_access {
            trace!(access, table, %row, column, "cell access");
        }
    }

    /// Count and log a failed operation, passing the result through
    fn observe<T>(&self, operation: &'static str, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(err) = &result {
            metrics::record_error(err.label());
            match err {
                StoreError::SchemaConflict { .. } | StoreError::TypeMismatch { .. } => {
                    warn!(operation, error = %err, "store contract violation");
                }
                StoreError::Internal(_) => {
                    warn!(operation, error = %err, "store internal failure");
                }
                _ => debug!(operation, error = %err, "store operation failed"),
            }
        }
        result
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreProvider for LocalStore {
    fn has_table(&self, table: &str) -> bool {
        self.catalog.has_table(table)
    }

    fn add_table(&self, table: &str) -> StoreResult<()> {
        let result = self.catalog.add_table(table).map(|created| {
            if created {
                metrics::record_counter(metrics::TABLES_CREATED, 1);
                debug!(table, "table created");
            }
        });
        self.observe("add_table", result)
    }

    fn add_column_to_table(&self, table: &str, column: &str, column_type: ColumnType) -> StoreResult<()> {
        let result = self
            .catalog
            .table(table)
            .and_then(|t| {
                self.catalog.validate_name("column", column)?;
                t.add_column(column, column_type)
            })
            .map(|backfilled| {
                if let Some(rows) = backfilled {
                    metrics::record_counter(metrics::COLUMNS_CREATED, 1);
                    debug!(table, column, %column_type, backfilled = rows, "column added");
                }
            });
        self.observe("add_column_to_table", result)
    }

    fn insert_empty_row(&self, table: &str) -> StoreResult<RowHandle> {
        let result = self.catalog.table(table).and_then(|t| t.insert_row());
        if let Ok(row) = &result {
            metrics::record_counter(metrics::ROWS_INSERTED, 1);
            trace!(table, %row, "row inserted");
        }
        self.observe("insert_empty_row", result)
    }

    fn get_value<T: CellValue>(&self, table: &str, row: RowHandle, column: &str) -> StoreResult<T> {
        let timer = Timer::new("get_value");
        let expected = T::column_type();
        let result = self
            .catalog
            .table(table)
            .and_then(|t| t.read_cell(row, column, Some(expected)))
            .and_then(|value| {
                T::from_value(value).ok_or_else(|| {
                    StoreError::Internal(format!("{}.{} holds a value that is not {}", table, column, expected))
                })
            });
        timer.stop();

        if result.is_ok() {
            metrics::record_counter(metrics::CELLS_READ, 1);
            self.trace_cell("read", table, row, column);
        }
        self.observe("get_value", result)
    }

    fn set_value<T: CellValue>(&self, table: &str, row: RowHandle, column: &str, value: T) -> StoreResult<()> {
        let timer = Timer::new("set_value");
        let result = self
            .catalog
            .table(table)
            .and_then(|t| t.write_cell(row, column, value.into_value(), Some(T::column_type())));
        timer.stop();

        if result.is_ok() {
            metrics::record_counter(metrics::CELLS_WRITTEN, 1);
            self.trace_cell("write", table, row, column);
        }
        self.observe("set_value", result)
    }
}

/// Storage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub table_count: usize,
    pub column_count: usize,
    pub row_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::model::ValueKind;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

    const INT: ColumnType = ColumnType::required(ValueKind::Int32);

    #[test]
    fn test_person_scenario() {
        let store = LocalStore::new();
        store.add_table("Person").unwrap();
        store.add_column_to_table("Person", "Age", INT).unwrap();

        let r = store.insert_empty_row("Person").unwrap();
        assert_eq!(r, RowHandle(0));
        assert_eq!(store.get_value::<i32>("Person", r, "Age").unwrap(), 0);

        store.set_value("Person", r, "Age", 42i32).unwrap();
        assert_eq!(store.get_value::<i32>("Person", r, "Age").unwrap(), 42);
    }

    #[test]
    fn test_unknown_table_on_every_operation() {
        let store = LocalStore::new();
        let ghost = || StoreError::UnknownTable("Ghost".to_string());

        assert!(!store.has_table("Ghost"));
        assert_eq!(store.get_value::<i32>("Ghost", RowHandle(0), "X").unwrap_err(), ghost());
        assert_eq!(store.set_value("Ghost", RowHandle(0), "X", 1i32).unwrap_err(), ghost());
        assert_eq!(store.insert_empty_row("Ghost").unwrap_err(), ghost());
        assert_eq!(store.add_column_to_table("Ghost", "X", INT).unwrap_err(), ghost());
        assert_eq!(store.row_count("Ghost").unwrap_err(), ghost());
        assert!(!store.has_table("Ghost"));
    }

    #[test]
    fn test_get_value_does_not_create_schema() {
        let store = LocalStore::new();
        store.add_table("Person").unwrap();
        let row = store.insert_empty_row("Person").unwrap();

        let err = store.get_value::<i32>("Person", row, "Age").unwrap_err();
        assert!(matches!(err, StoreError::UnknownColumn { .. }));
        assert!(store.columns("Person").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_column_name() {
        let store = LocalStore::new();
        store.add_table("Person").unwrap();
        let err = store.add_column_to_table("Person", "", INT).unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }

    #[test]
    fn test_unknown_table_wins_over_invalid_column_name() {
        let store = LocalStore::new();
        assert_eq!(
            store.add_column_to_table("Ghost", "", INT).unwrap_err(),
            StoreError::UnknownTable("Ghost".to_string())
        );
        assert!(!store.has_table("Ghost"));
    }

    #[test]
    fn test_default_config_has_no_name_length_limit() {
        let store = LocalStore::new();
        let table = "T".repeat(256);
        let column = "C".repeat(1024);

        store.add_table(&table).unwrap();
        store.add_column_to_table(&table, &column, INT).unwrap();
        assert!(store.has_table(&table));
        assert_eq!(store.column_type(&table, &column).unwrap(), INT);
    }

    #[test]
    fn test_operations_update_metrics() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        ::metrics::with_local_recorder(&recorder, || {
            let store = LocalStore::new();
            store.add_table("Person").unwrap();
            store.add_column_to_table("Person", "Age", INT).unwrap();
            let row = store.insert_empty_row("Person").unwrap();
            store.insert_empty_row("Person").unwrap();
            store.set_value("Person", row, "Age", 7i32).unwrap();
            store.get_value::<i32>("Person", row, "Age").unwrap();
            let _ = store.set_value("Person", row, "Age", 7i64);
            let _ = store.get_value::<String>("Person", row, "Age");
            let _ = store.insert_empty_row("Ghost");
        });

        let counters = counters(&snapshotter);
        let count = |name: &str, kind: Option<&str>| {
            counters
                .iter()
                .find(|(n, k, _)| n == name && k.as_deref() == kind)
                .map_or(0, |(_, _, value)| *value)
        };

        assert_eq!(count(metrics::TABLES_CREATED, None), 1);
        assert_eq!(count(metrics::COLUMNS_CREATED, None), 1);
        assert_eq!(count(metrics::ROWS_INSERTED, None), 2);
        assert_eq!(count(metrics::CELLS_WRITTEN, None), 1);
        assert_eq!(count(metrics::CELLS_READ, None), 1);
        assert_eq!(count(metrics::ERRORS_TOTAL, Some("type_mismatch")), 2);
        assert_eq!(count(metrics::ERRORS_TOTAL, Some("unknown_table")), 1);
    }

    /// Counter values by name and `kind` label
    fn counters(snapshotter: &Snapshotter) -> Vec<(String, Option<String>, u64)> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(composite, _, _, value)| {
                let key = composite.key();
                let kind = key
                    .labels()
                    .find(|label| label.key() == "kind")
                    .map(|label| label.value().to_string());
                match value {
                    DebugValue::Counter(count) => Some((key.name().to_string(), kind, count)),
                    _ => None,
                }
            })
            .collect()
    }

    #[test]
    fn test_dynamic_access() {
        let store = LocalStore::new();
        store.add_table("Person").unwrap();
        store
            .add_column_to_table("Person", "Nickname", ColumnType::nullable(ValueKind::String))
            .unwrap();
        let row = store.insert_empty_row("Person").unwrap();

        assert_eq!(store.get_dynamic("Person", row, "Nickname").unwrap(), Value::Null);
        store
            .set_dynamic("Person", row, "Nickname", Value::String("Ace".to_string()))
            .unwrap();
        assert_eq!(
            store.get_value::<Option<String>>("Person", row, "Nickname").unwrap(),
            Some("Ace".to_string())
        );

        let err = store
            .set_dynamic("Person", row, "Nickname", Value::Bool(true))
            .unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));
    }

    #[test]
    fn test_stats() {
        let store = LocalStore::new();
        assert_eq!(store.stats().unwrap(), StoreStats::default());

        store.add_table("Person").unwrap();
        store.add_table("Dog").unwrap();
        store.add_column_to_table("Person", "Age", INT).unwrap();
        store.add_column_to_table("Dog", "Age", INT).unwrap();
        store.add_column_to_table("Dog", "Name", String::column_type()).unwrap();
        store.insert_empty_row("Dog").unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.table_count, 2);
        assert_eq!(stats.column_count, 3);
        assert_eq!(stats.row_count, 1);
        assert_eq!(store.table_names().unwrap(), vec!["Dog", "Person"]);

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["row_count"], 1);
    }

    #[test]
    fn test_independent_stores() {
        let first = LocalStore::new();
        let second = LocalStore::new();
        first.add_table("Person").unwrap();

        assert!(first.has_table("Person"));
        assert!(!second.has_table("Person"));
    }
}
