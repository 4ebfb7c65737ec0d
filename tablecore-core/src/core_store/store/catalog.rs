/*
    catalog.rs - Registry of tables

    Single source of truth for which tables exist. Tables are created on
    demand and never removed; lookups hand out shared references so that
    per-table work does not hold the catalog lock.
*/

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::StoreConfig;
use crate::core_store::store::errors::{StoreError, StoreResult};
use crate::core_store::store::table::{handle_poison, Table};

/// Registry of all tables in a store
#[derive(Debug)]
pub struct Catalog {
    config: StoreConfig,
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Catalog {
    pub fn new(config: StoreConfig) -> Self {
        Catalog {
            config,
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Pure lookup; never fails
    pub fn has_table(&self, name: &str) -> bool {
        // A poisoned map is still a valid map: creation inserts in one step.
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Create a table if absent. Returns whether a table was created.
    pub fn add_table(&self, name: &str) -> StoreResult<bool> {
        self.validate_name("table", name)?;

        let mut tables = self.tables.write().map_err(handle_poison)?;
        if tables.contains_key(name) {
            return Ok(false);
        }
        if let Some(limit) = self.config.max_tables {
            if tables.len() >= limit {
                return Err(StoreError::CapacityExceeded { limit });
            }
        }

        let table = Table::new(name, self.config.initial_row_capacity);
        tables.insert(name.to_string(), Arc::new(table));
        Ok(true)
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> StoreResult<Arc<Table>> {
        self.tables
            .read()
            .map_err(handle_poison)?
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::UnknownTable(name.to_string()))
    }

    /// All tables, sorted by name
    pub fn tables(&self) -> StoreResult<Vec<Arc<Table>>> {
        let mut tables: Vec<_> = self.tables.read().map_err(handle_poison)?.values().cloned().collect();
        tables.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tables)
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject empty names, and names longer than the configured limit if one is set
    pub fn validate_name(&self, what: &str, name: &str) -> StoreResult<()> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName(format!("{} name must not be empty", what)));
        }
        if let Some(limit) = self.config.max_name_length {
            let length = name.chars().count();
            if length > limit {
                return Err(StoreError::InvalidName(format!(
                    "{} name of {} characters exceeds the limit of {}",
                    what, length, limit
                )));
            }
        }
        Ok(())
    }
}
