/// DDL (Data Definition Language) operations
///
/// CREATE TABLE registers a temporary table holding one placeholder record
/// whose fields carry the zero value of each declared type. Declared types
/// are not enforced afterwards.

use crate::core::{Catalog, ExecutionError, Record, Value};
use crate::parser::ColumnDef;
use log::info;

use super::dispatcher::QueryResult;

pub struct DdlExecutor;

impl DdlExecutor {
    pub fn create_table(
        catalog: &mut Catalog,
        name: &str,
        columns: &[ColumnDef],
        if_not_exists: bool,
    ) -> Result<QueryResult, ExecutionError> {
        if if_not_exists && catalog.get_table(name).is_some() {
            info!("table '{name}' already exists, CREATE TABLE skipped");
            return Ok(QueryResult::message(format!(
                "Table '{name}' already exists, skipping"
            )));
        }

        let seed = Self::seed_record(columns);
        catalog.create_table(name, vec![seed])?;
        info!("created temporary table '{name}' with {} columns", columns.len());

        Ok(QueryResult::message(format!("Table '{name}' created")))
    }

    /// The placeholder record for a column list. Repeated column names keep
    /// their first declaration.
    #[must_use]
    pub fn seed_record(columns: &[ColumnDef]) -> Record {
        let mut record = Record::new();
        for col in columns {
            if !record.contains(&col.name) {
                record.set(col.name.clone(), Self::default_for_type(&col.type_name));
            }
        }
        record
    }

    /// Zero value for a declared type, judged by its base name.
    #[must_use]
    pub fn default_for_type(type_name: &str) -> Value {
        let base: String = type_name
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect::<String>()
            .to_uppercase();

        match base.as_str() {
            t if t.starts_with("INT") => Value::Integer(0),
            "SERIAL" | "BIGSERIAL" | "SMALLSERIAL" | "BIGINT" | "SMALLINT" | "TINYINT" => {
                Value::Integer(0)
            }
            "REAL" | "FLOAT" | "FLOAT4" | "FLOAT8" | "DOUBLE" | "NUMERIC" | "DECIMAL" => {
                Value::Float(0.0)
            }
            t if t.starts_with("BOOL") => Value::Boolean(false),
            _ => Value::Text(String::new()),
        }
    }
}
