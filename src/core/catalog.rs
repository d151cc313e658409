use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ExecutionError;
use super::record::Record;
use super::table::Table;

/// Read-only description of one table, as shown by "describe tables".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub columns: Vec<String>,
    pub row_count: usize,
}

/// The in-memory registry of named tables.
///
/// Permanent tables come from the seed; temporary ones from CREATE TABLE.
/// Table names are matched exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<String, Table>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a permanent table, replacing any table of the same name.
    pub fn register_permanent(&mut self, name: impl Into<String>, records: Vec<Record>) {
        let name = name.into();
        self.tables
            .insert(name.clone(), Table::new(name, records, false));
    }

    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Like `get_table`, but a miss becomes the learner-facing error.
    pub fn require_table(&self, name: &str) -> Result<&Table, ExecutionError> {
        self.get_table(name)
            .ok_or_else(|| ExecutionError::TableNotFound {
                name: name.to_string(),
                available: self.table_names(),
            })
    }

    /// Register a temporary table. Re-creating an existing temporary table
    /// replaces it; seeded tables cannot be replaced.
    pub fn create_table(
        &mut self,
        name: &str,
        records: Vec<Record>,
    ) -> Result<(), ExecutionError> {
        if let Some(existing) = self.tables.get(name) {
            if !existing.temporary {
                return Err(ExecutionError::ReadOnlyTable(name.to_string()));
            }
            info!("replacing temporary table '{name}'");
        }
        self.tables
            .insert(name.to_string(), Table::new(name, records, true));
        Ok(())
    }

    pub fn append_record(&mut self, name: &str, record: Record) -> Result<(), ExecutionError> {
        match self.tables.get_mut(name) {
            Some(table) => {
                table.push(record);
                Ok(())
            }
            None => Err(ExecutionError::TableNotFound {
                name: name.to_string(),
                available: self.table_names(),
            }),
        }
    }

    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Snapshot of every table's columns and row count.
    #[must_use]
    pub fn list_tables(&self) -> BTreeMap<String, TableSummary> {
        self.tables
            .iter()
            .map(|(name, table)| {
                (
                    name.clone(),
                    TableSummary {
                        columns: table.columns(),
                        row_count: table.row_count(),
                    },
                )
            })
            .collect()
    }
}
