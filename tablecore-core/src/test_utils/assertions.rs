//! Custom assertions for store tests

use std::fmt::Debug;

use crate::core_store::store::StoreError;

/// Assert that a Result is Ok and return the value
pub fn assert_ok<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("Expected Ok, got Err: {:?}", e),
    }
}

/// Assert that a store call failed with the given error kind
pub fn assert_store_error<T: Debug>(result: Result<T, StoreError>, label: &str) -> StoreError {
    match result {
        Ok(value) => panic!("Expected {} error, got Ok: {:?}", label, value),
        Err(e) if e.label() == label => e,
        Err(e) => panic!("Expected {} error, got {:?}", label, e),
    }
}

/// Assert that handles are exactly 0..n in order
pub fn assert_dense_handles(handles: &[u64]) {
    for (expected, actual) in handles.iter().enumerate() {
        assert_eq!(
            expected as u64, *actual,
            "handle sequence has a gap or repeat: {:?}",
            handles
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_ok() {
        let result: Result<i32, String> = Ok(42);
        assert_eq!(assert_ok(result), 42);
    }

    #[test]
    fn test_assert_store_error() {
        let result: Result<(), StoreError> = Err(StoreError::UnknownTable("Ghost".to_string()));
        let err = assert_store_error(result, "unknown_table");
        assert_eq!(err, StoreError::UnknownTable("Ghost".to_string()));
    }

    #[test]
    #[should_panic(expected = "Expected row_not_found error")]
    fn test_assert_store_error_wrong_kind() {
        let result: Result<(), StoreError> = Err(StoreError::UnknownTable("Ghost".to_string()));
        assert_store_error(result, "row_not_found");
    }

    #[test]
    #[should_panic(expected = "gap or repeat")]
    fn test_assert_dense_handles_detects_gap() {
        assert_dense_handles(&[0, 1, 3]);
    }
}
