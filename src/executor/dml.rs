/// DML (Data Manipulation Language) operations
///
/// INSERT appends exactly one record. Values are reordered to the table's
/// implicit schema (the columns of its first record).

use crate::core::{Catalog, ExecutionError, Record, Value};
use log::info;

use super::dispatcher::QueryResult;

pub struct DmlExecutor;

impl DmlExecutor {
    pub fn insert(
        catalog: &mut Catalog,
        table: &str,
        columns: Option<Vec<String>>,
        values: Vec<Value>,
    ) -> Result<QueryResult, ExecutionError> {
        let schema = catalog.require_table(table)?.columns();
        let (schema, ordered) = Self::reorder_values(schema, columns, values)?;

        let record = Record::from_pairs(schema.into_iter().zip(ordered));
        catalog.append_record(table, record)?;
        info!("inserted 1 row into '{table}'");

        Ok(QueryResult::message(format!("1 row inserted into '{table}'")))
    }

    /// Reorder values to match the table schema.
    ///
    /// Listed columns are placed by name and unlisted ones become null.
    /// Without a list, values fill the schema left to right and missing
    /// trailing values become null. A table without columns takes its
    /// schema from the column list.
    fn reorder_values(
        schema: Vec<String>,
        columns: Option<Vec<String>>,
        values: Vec<Value>,
    ) -> Result<(Vec<String>, Vec<Value>), ExecutionError> {
        match columns {
            Some(col_names) => {
                if col_names.len() != values.len() {
                    return Err(ExecutionError::malformed(
                        "INSERT",
                        format!(
                            "{} columns listed but {} values given",
                            col_names.len(),
                            values.len()
                        ),
                    ));
                }
                if schema.is_empty() {
                    return Ok((col_names, values));
                }

                let mut ordered = vec![Value::Null; schema.len()];
                for (col_name, value) in col_names.iter().zip(values) {
                    let idx = schema
                        .iter()
                        .position(|c| c.eq_ignore_ascii_case(col_name))
                        .ok_or_else(|| ExecutionError::ColumnNotFound {
                            name: col_name.clone(),
                            available: schema.clone(),
                        })?;
                    ordered[idx] = value;
                }
                Ok((schema, ordered))
            }
            None => {
                if values.len() > schema.len() {
                    return Err(ExecutionError::malformed(
                        "INSERT",
                        format!(
                            "{} values given but the table has {} columns",
                            values.len(),
                            schema.len()
                        ),
                    ));
                }
                let mut ordered = values;
                ordered.resize(schema.len(), Value::Null);
                Ok((schema, ordered))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .create_table(
                "notes",
                vec![Record::from_pairs([
                    ("id", Value::Integer(0)),
                    ("body", Value::from("")),
                    ("done", Value::Boolean(false)),
                ])],
            )
            .unwrap();
        catalog
    }

    fn last(catalog: &Catalog) -> Record {
        catalog
            .get_table("notes")
            .unwrap()
            .records
            .last()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_named_columns_follow_schema_order() {
        let mut catalog = catalog();
        DmlExecutor::insert(
            &mut catalog,
            "notes",
            Some(vec!["DONE".to_string(), "id".to_string()]),
            vec![Value::Boolean(true), Value::Integer(7)],
        )
        .unwrap();

        let record = last(&catalog);
        assert_eq!(
            record.columns(),
            vec!["id".to_string(), "body".to_string(), "done".to_string()]
        );
        assert_eq!(record.get("id"), Some(&Value::Integer(7)));
        assert_eq!(record.get("body"), Some(&Value::Null));
        assert_eq!(record.get("done"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_positional_values_are_padded() {
        let mut catalog = catalog();
        DmlExecutor::insert(&mut catalog, "notes", None, vec![Value::Integer(1)]).unwrap();
        let record = last(&catalog);
        assert_eq!(record.get("body"), Some(&Value::Null));
        assert_eq!(catalog.get_table("notes").unwrap().row_count(), 2);
    }

    #[test]
    fn test_too_many_values() {
        let mut catalog = catalog();
        let err = DmlExecutor::insert(
            &mut catalog,
            "notes",
            None,
            vec![Value::Integer(1), Value::Null, Value::Null, Value::Null],
        )
        .unwrap_err();
        assert!(matches!(err, ExecutionError::MalformedClause { .. }));
        assert_eq!(catalog.get_table("notes").unwrap().row_count(), 1);
    }

    #[test]
    fn test_unknown_column() {
        let mut catalog = catalog();
        let err = DmlExecutor::insert(
            &mut catalog,
            "notes",
            Some(vec!["title".to_string()]),
            vec![Value::from("x")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ExecutionError::ColumnNotFound {
                name: "title".to_string(),
                available: vec!["id".to_string(), "body".to_string(), "done".to_string()],
            }
        );
    }

    #[test]
    fn test_unknown_table() {
        let mut catalog = catalog();
        let err = DmlExecutor::insert(&mut catalog, "nope", None, vec![]).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
