/// Aggregate functions over one group of records
///
/// COUNT counts records regardless of nulls. SUM and AVG treat missing or
/// non-numeric values as 0, and AVG always divides by the group size.
/// MIN and MAX run over the same coerced numbers.

use crate::core::{ExecutionError, Record, Value};
use crate::parser::{aggregate_call, AggregateCall, AggregateFunction, AggregateTarget};
use nom::combinator::all_consuming;

pub struct Aggregator;

impl Aggregator {
    /// Evaluate aggregate text such as `COUNT(*)` or `avg(weight)`.
    pub fn evaluate(expression: &str, records: &[&Record]) -> Result<Value, ExecutionError> {
        let (_, call) = all_consuming(aggregate_call)(expression.trim()).map_err(|_| {
            ExecutionError::malformed(
                "SELECT",
                format!("'{}' is not an aggregate expression", expression.trim()),
            )
        })?;
        Ok(Self::compute(&call, records))
    }

    #[must_use]
    pub fn compute(call: &AggregateCall, records: &[&Record]) -> Value {
        let column = match &call.target {
            AggregateTarget::All => return Value::Integer(records.len() as i64),
            AggregateTarget::Column(column) => column,
        };

        let inputs: Vec<&Value> = records
            .iter()
            .map(|record| record.get(column).unwrap_or(&Value::Null))
            .collect();
        let integral = inputs.iter().all(|v| Self::is_integral(v));
        let numbers: Vec<f64> = inputs.iter().map(|v| v.coerce_number()).collect();

        match call.function {
            AggregateFunction::Count => Value::Integer(records.len() as i64),
            AggregateFunction::Sum => Self::typed(numbers.iter().sum(), integral),
            AggregateFunction::Avg => {
                if numbers.is_empty() {
                    Value::Null
                } else {
                    Value::Float(numbers.iter().sum::<f64>() / numbers.len() as f64)
                }
            }
            AggregateFunction::Min => numbers
                .iter()
                .copied()
                .reduce(f64::min)
                .map_or(Value::Null, |n| Self::typed(n, integral)),
            AggregateFunction::Max => numbers
                .iter()
                .copied()
                .reduce(f64::max)
                .map_or(Value::Null, |n| Self::typed(n, integral)),
        }
    }

    // Floats always stay floats; everything else counts by its coerced value.
    fn is_integral(value: &Value) -> bool {
        !matches!(value, Value::Float(_)) && value.coerce_number().fract() == 0.0
    }

    fn typed(n: f64, integral: bool) -> Value {
        if integral {
            Value::Integer(n as i64)
        } else {
            Value::Float(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relations() -> Vec<Record> {
        [(1, 1.0, "is_a"), (2, 1.0, "is_a"), (3, 0.5, "instance_of"), (4, 0.25, "resembles")]
            .into_iter()
            .map(|(id, weight, kind)| {
                Record::from_pairs([
                    ("id", Value::Integer(id)),
                    ("weight", Value::Float(weight)),
                    ("kind", Value::from(kind)),
                ])
            })
            .collect()
    }

    fn refs(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    #[test]
    fn test_count() {
        let records = relations();
        let group = refs(&records);
        assert_eq!(Aggregator::evaluate("COUNT(*)", &group).unwrap(), Value::Integer(4));
        assert_eq!(Aggregator::evaluate("count(kind)", &group).unwrap(), Value::Integer(4));
        assert_eq!(Aggregator::evaluate("COUNT(*)", &[]).unwrap(), Value::Integer(0));
    }

    #[test]
    fn test_count_column_includes_nulls() {
        let records = vec![
            Record::from_pairs([("parent_id", Value::Null)]),
            Record::from_pairs([("parent_id", Value::Integer(1))]),
        ];
        assert_eq!(
            Aggregator::evaluate("COUNT(parent_id)", &refs(&records)).unwrap(),
            Value::Integer(2)
        );
    }

    #[test]
    fn test_sum_keeps_integer_type() {
        let records = relations();
        let group = refs(&records);
        assert_eq!(Aggregator::evaluate("SUM(id)", &group).unwrap(), Value::Integer(10));
        assert_eq!(Aggregator::evaluate("SUM(weight)", &group).unwrap(), Value::Float(2.75));
        assert_eq!(Aggregator::evaluate("SUM(id)", &[]).unwrap(), Value::Integer(0));
    }

    #[test]
    fn test_avg_divides_by_group_size() {
        let records = vec![
            Record::from_pairs([("score", Value::Integer(4))]),
            Record::from_pairs([("score", Value::Null)]),
            Record::from_pairs([("score", Value::from("n/a"))]),
            Record::from_pairs([("score", Value::from("8"))]),
        ];
        assert_eq!(
            Aggregator::evaluate("AVG(score)", &refs(&records)).unwrap(),
            Value::Float(3.0)
        );
        assert_eq!(Aggregator::evaluate("AVG(score)", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_min_max_over_coerced_values() {
        let records = vec![
            Record::from_pairs([("score", Value::Integer(4))]),
            Record::from_pairs([("score", Value::from("abc"))]),
            Record::from_pairs([("score", Value::Integer(-2))]),
        ];
        let group = refs(&records);
        assert_eq!(Aggregator::evaluate("MAX(score)", &group).unwrap(), Value::Integer(4));
        assert_eq!(Aggregator::evaluate("MIN(score)", &group).unwrap(), Value::Integer(-2));

        let records = relations();
        assert_eq!(
            Aggregator::evaluate("MIN(weight)", &refs(&records)).unwrap(),
            Value::Float(0.25)
        );
        assert_eq!(Aggregator::evaluate("MAX(weight)", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_not_an_aggregate() {
        let err = Aggregator::evaluate("weight", &[]).unwrap_err();
        assert!(matches!(err, ExecutionError::MalformedClause { .. }));
    }
}
