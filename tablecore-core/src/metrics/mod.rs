//! Metrics for store operations
//!
//! Emitted through the `metrics` facade. Nothing is recorded until the
//! embedding application installs a recorder.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

pub const TABLES_CREATED: &str = "store.tables.created";
pub const COLUMNS_CREATED: &str = "store.columns.created";
pub const ROWS_INSERTED: &str = "store.rows.inserted";
pub const CELLS_READ: &str = "store.cells.read";
pub const CELLS_WRITTEN: &str = "store.cells.written";
pub const ERRORS_TOTAL: &str = "store.errors.total";
pub const OPERATION_DURATION_MS: &str = "store.operation.duration_ms";

/// Initialize metrics with descriptions
pub fn init_metrics() {
    describe_counter!(TABLES_CREATED, "Number of tables created");
    describe_counter!(COLUMNS_CREATED, "Number of columns added to tables");
    describe_counter!(ROWS_INSERTED, "Number of rows inserted");
    describe_counter!(CELLS_READ, "Number of cell reads");
    describe_counter!(CELLS_WRITTEN, "Number of cell writes");
    describe_counter!(ERRORS_TOTAL, "Failed store operations, labelled by error kind");
    describe_histogram!(
        OPERATION_DURATION_MS,
        "Cell access duration in milliseconds, labelled by operation"
    );
}

/// Record a counter metric
pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}

/// Record a failed operation
pub fn record_error(kind: &'static str) {
    counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
}

/// Timer for measuring operation duration
pub struct Timer {
    operation: &'static str,
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(self) {
        let duration = self.start.elapsed();
        histogram!(OPERATION_DURATION_MS, "op" => self.operation).record(duration.as_secs_f64() * 1000.0);
    }
}
