/// Query (SELECT) operations
///
/// Stages run in a fixed order, each consuming the previous stage's output:
/// FROM -> JOIN -> WHERE -> GROUP BY / aggregates -> projection ->
/// ORDER BY -> LIMIT.
///
/// Working records carry every column twice: bare (`name`) and qualified
/// by the table alias (`c.name`). After a join the right side's bare
/// columns overwrite same-named left ones, while the qualified names keep
/// both sides reachable.

use std::collections::HashMap;

use crate::core::record::{is_qualified, unqualified};
use crate::core::{Catalog, ExecutionError, Record, Value};
use crate::parser::{
    aggregate_call, AggregateCall, AggregateTarget, ClauseSet, JoinClause, JoinType, OrderBy,
    SelectExpr, SelectItem, SortOrder, TableRef,
};
use log::debug;
use nom::combinator::all_consuming;

use super::aggregates::Aggregator;
use super::conditions::ConditionEvaluator;
use super::dispatcher::QueryResult;

pub struct SelectExecutor;

/// Records flowing between stages, plus the shape (first record) used for
/// column checks. The shape survives filtering, so an empty result still
/// knows its columns.
struct WorkingSet {
    records: Vec<Record>,
    shape: Record,
}

impl WorkingSet {
    fn new(records: Vec<Record>) -> Self {
        let shape = records.first().cloned().unwrap_or_default();
        Self { records, shape }
    }

    // A table without records has no schema to check against.
    fn require_column(&self, name: &str) -> Result<(), ExecutionError> {
        if self.shape.is_empty() || self.shape.contains(name) {
            Ok(())
        } else {
            Err(ExecutionError::ColumnNotFound {
                name: name.to_string(),
                available: self.shape.columns(),
            })
        }
    }
}

struct OutputColumn {
    header: String,
    source: String,
}

/// Rows before the final cut: the record each row came from (needed by
/// ORDER BY) next to its projected values.
struct Projection {
    columns: Vec<String>,
    rows: Vec<(Record, Vec<Value>)>,
    shape: Record,
    grouped: bool,
}

impl SelectExecutor {
    pub fn select(catalog: &Catalog, clauses: &ClauseSet) -> Result<QueryResult, ExecutionError> {
        let mut working = Self::resolve_from(catalog, &clauses.from)?;
        debug!("FROM {}: {} records", clauses.from.name, working.records.len());

        if let Some(join) = &clauses.join {
            working = Self::apply_join(catalog, working, join)?;
            debug!("JOIN {}: {} records", join.table.name, working.records.len());
        }

        if let Some(condition) = &clauses.where_condition {
            working = Self::apply_where(working, condition)?;
            debug!("WHERE: {} records", working.records.len());
        }

        let mut projection = if clauses.group_by.is_some() || clauses.has_aggregates() {
            let group_by = clauses.group_by.as_deref().unwrap_or_default();
            Self::apply_grouping(&working, group_by, &clauses.select_list, clauses.order_by.as_ref())?
        } else {
            Self::project(working, &clauses.select_list)?
        };

        if let Some(order_by) = &clauses.order_by {
            Self::apply_order_by(&mut projection, order_by)?;
        }

        if let Some(limit) = clauses.limit {
            projection.rows.truncate(limit);
        }

        let rows = projection.rows.into_iter().map(|(_, values)| values).collect();
        Ok(QueryResult::rows(projection.columns, rows))
    }

    fn resolve_from(catalog: &Catalog, from: &TableRef) -> Result<WorkingSet, ExecutionError> {
        let table = catalog.require_table(&from.name)?;
        let records = table
            .records
            .iter()
            .map(|record| Self::qualify(record, from.qualifier()))
            .collect();
        Ok(WorkingSet::new(records))
    }

    /// Add `qualifier.column` aliases for every schema column.
    fn qualify(record: &Record, qualifier: &str) -> Record {
        let mut qualified = record.clone();
        for (name, value) in record.iter().filter(|(name, _)| !is_qualified(name)) {
            qualified.set(format!("{qualifier}.{name}"), value.clone());
        }
        qualified
    }

    /// `{...left, ...right}`: right-hand fields win.
    fn merge(left: &Record, right: &Record) -> Record {
        let mut merged = left.clone();
        for (name, value) in right.iter() {
            merged.set(name, value.clone());
        }
        merged
    }

    fn pad_nulls(left: &Record, right_shape: &Record) -> Record {
        let mut padded = left.clone();
        for (name, _) in right_shape.iter() {
            padded.set(name, Value::Null);
        }
        padded
    }

    // Each side of ON is looked up on its own table first, then on the other.
    fn join_matches(left: &Record, right: &Record, join: &JoinClause) -> bool {
        let lhs = left.get(&join.on_left).or_else(|| right.get(&join.on_left));
        let rhs = right.get(&join.on_right).or_else(|| left.get(&join.on_right));
        match (lhs, rhs) {
            (Some(a), Some(b)) => a.loose_eq(b),
            _ => false,
        }
    }

    /// Nested-loop equi-join. LEFT JOIN keeps unmatched left records with
    /// the right table's columns set to null.
    fn apply_join(
        catalog: &Catalog,
        left: WorkingSet,
        join: &JoinClause,
    ) -> Result<WorkingSet, ExecutionError> {
        let table = catalog.require_table(&join.table.name)?;
        let right: Vec<Record> = table
            .records
            .iter()
            .map(|record| Self::qualify(record, join.table.qualifier()))
            .collect();
        let right_shape = right.first().cloned().unwrap_or_default();

        let mut joined = WorkingSet {
            records: Vec::new(),
            shape: Self::merge(&left.shape, &right_shape),
        };
        joined.require_column(&join.on_left)?;
        joined.require_column(&join.on_right)?;

        for l in &left.records {
            let before = joined.records.len();
            joined.records.extend(
                right
                    .iter()
                    .filter(|r| Self::join_matches(l, r, join))
                    .map(|r| Self::merge(l, r)),
            );
            if joined.records.len() == before && join.join_type == JoinType::Left {
                joined.records.push(Self::pad_nulls(l, &right_shape));
            }
        }

        Ok(joined)
    }

    fn apply_where(mut working: WorkingSet, text: &str) -> Result<WorkingSet, ExecutionError> {
        let Some(condition) = ConditionEvaluator::parse(text) else {
            return Ok(working);
        };
        working.require_column(condition.column())?;
        working
            .records
            .retain(|record| ConditionEvaluator::evaluate_condition(record, &condition));
        Ok(working)
    }

    /// Partition by the group key values in first-seen order and reduce each
    /// partition to one record holding the keys and the aggregate values.
    /// Without GROUP BY the whole working set is one group, so exactly one
    /// row comes out even when nothing survived WHERE.
    fn apply_grouping(
        working: &WorkingSet,
        group_by: &[String],
        select_list: &[SelectItem],
        order_by: Option<&OrderBy>,
    ) -> Result<Projection, ExecutionError> {
        for key in group_by {
            working.require_column(key)?;
        }
        let mut calls: Vec<AggregateCall> = select_list
            .iter()
            .filter_map(|item| match &item.expr {
                SelectExpr::Aggregate(call) => Some(call.clone()),
                _ => None,
            })
            .collect();
        // ORDER BY may sort on an aggregate that is not projected.
        if let Some(Ok((_, call))) =
            order_by.map(|order| all_consuming(aggregate_call)(order.column.as_str()))
        {
            if !calls.contains(&call) {
                calls.push(call);
            }
        }
        for call in &calls {
            if let AggregateTarget::Column(column) = &call.target {
                working.require_column(column)?;
            }
        }

        let groups: Vec<Vec<&Record>> = if group_by.is_empty() {
            vec![working.records.iter().collect()]
        } else {
            let mut index: HashMap<String, usize> = HashMap::new();
            let mut groups: Vec<Vec<&Record>> = Vec::new();
            for record in &working.records {
                let key = group_by
                    .iter()
                    .map(|k| record.get(k).unwrap_or(&Value::Null).group_key())
                    .collect::<Vec<_>>()
                    .join("\u{1f}");
                let idx = *index.entry(key).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[idx].push(record);
            }
            groups
        };
        debug!("GROUP BY {group_by:?}: {} groups", groups.len());

        let shape = Self::group_record(group_by, &calls, &[]);
        let outputs = Self::output_columns(select_list, &shape, true)?;

        let rows = groups
            .iter()
            .map(|members| {
                let record = Self::group_record(group_by, &calls, members);
                let values = Self::project_record(&record, &outputs);
                (record, values)
            })
            .collect();

        Ok(Projection {
            columns: outputs.into_iter().map(|o| o.header).collect(),
            rows,
            shape,
            grouped: true,
        })
    }

    fn group_record(group_by: &[String], calls: &[AggregateCall], members: &[&Record]) -> Record {
        let mut record = Record::new();
        for key in group_by {
            let value = members
                .first()
                .and_then(|first| first.get(key))
                .cloned()
                .unwrap_or(Value::Null);
            record.set(unqualified(key), value.clone());
            if is_qualified(key) {
                record.set(key.clone(), value);
            }
        }
        for call in calls {
            record.set(call.label(), Aggregator::compute(call, members));
        }
        record
    }

    fn project(working: WorkingSet, select_list: &[SelectItem]) -> Result<Projection, ExecutionError> {
        let outputs = Self::output_columns(select_list, &working.shape, false)?;
        let rows = working
            .records
            .into_iter()
            .map(|record| {
                let values = Self::project_record(&record, &outputs);
                (record, values)
            })
            .collect();

        Ok(Projection {
            columns: outputs.into_iter().map(|o| o.header).collect(),
            rows,
            shape: working.shape,
            grouped: false,
        })
    }

    /// Field name a column reference reads from. Group records also answer
    /// to the bare name of a qualified key.
    fn resolve_field(shape: &Record, name: &str, grouped: bool) -> Option<String> {
        if shape.contains(name) || (shape.is_empty() && !grouped) {
            Some(name.to_string())
        } else if grouped && shape.contains(unqualified(name)) {
            Some(unqualified(name).to_string())
        } else {
            None
        }
    }

    fn output_columns(
        select_list: &[SelectItem],
        shape: &Record,
        grouped: bool,
    ) -> Result<Vec<OutputColumn>, ExecutionError> {
        let mut outputs = Vec::new();
        for item in select_list {
            match &item.expr {
                SelectExpr::Wildcard => {
                    outputs.extend(shape.columns().into_iter().map(|column| OutputColumn {
                        header: column.clone(),
                        source: column,
                    }));
                }
                SelectExpr::Column(name) => {
                    let source = Self::resolve_field(shape, name, grouped).ok_or_else(|| {
                        ExecutionError::ColumnNotFound {
                            name: name.clone(),
                            available: shape.columns(),
                        }
                    })?;
                    outputs.push(OutputColumn {
                        header: item.output_name(),
                        source,
                    });
                }
                SelectExpr::Aggregate(call) => outputs.push(OutputColumn {
                    header: item.output_name(),
                    source: call.label(),
                }),
            }
        }
        Ok(outputs)
    }

    fn project_record(record: &Record, outputs: &[OutputColumn]) -> Vec<Value> {
        outputs
            .iter()
            .map(|output| record.get(&output.source).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Stable sort on one key. The key names a working column first and an
    /// output header (alias or aggregate label) second.
    fn apply_order_by(projection: &mut Projection, order_by: &OrderBy) -> Result<(), ExecutionError> {
        enum SortKey {
            Field(String),
            Output(usize),
        }

        let key = &order_by.column;
        let sort_key = if projection.shape.contains(key) {
            SortKey::Field(key.clone())
        } else if let Some(idx) = projection
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(key))
        {
            SortKey::Output(idx)
        } else if let Some(field) = Self::resolve_field(&projection.shape, key, projection.grouped) {
            SortKey::Field(field)
        } else {
            let mut available = projection.shape.columns();
            for column in &projection.columns {
                if !available.contains(column) {
                    available.push(column.clone());
                }
            }
            return Err(ExecutionError::ColumnNotFound {
                name: key.clone(),
                available,
            });
        };

        let sort_value = |row: &(Record, Vec<Value>)| -> Value {
            match &sort_key {
                SortKey::Field(field) => row.0.get(field).cloned().unwrap_or(Value::Null),
                SortKey::Output(idx) => row.1[*idx].clone(),
            }
        };

        projection.rows.sort_by(|a, b| {
            let ordering = sort_value(a).natural_cmp(&sort_value(b));
            match order_by.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        debug!("ORDER BY {key} {:?}", order_by.order);
        Ok(())
    }
}
