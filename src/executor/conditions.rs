/// Condition evaluation for WHERE clauses
///
/// A WHERE clause holds exactly one atomic condition:
/// IS [NOT] NULL, =, != / <>, >, <, >=, <=, LIKE.
/// Text that matches none of these shapes filters nothing.

use crate::core::{Record, Value};
use crate::parser::{condition, Condition};
use log::warn;

pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Recognize the leading condition in `text`.
    ///
    /// Returns `None` for an unrecognized shape; callers then keep every row.
    #[must_use]
    pub fn parse(text: &str) -> Option<Condition> {
        match condition(text) {
            Ok((rest, cond)) => {
                let rest = rest.trim();
                if !rest.is_empty() {
                    warn!("WHERE: only the first condition is applied, ignoring '{rest}'");
                }
                Some(cond)
            }
            Err(_) => {
                warn!("WHERE: unrecognized condition '{}', no rows are filtered", text.trim());
                None
            }
        }
    }

    /// Evaluate raw condition text against one record.
    #[must_use]
    pub fn evaluate(record: &Record, text: &str) -> bool {
        Self::parse(text).is_none_or(|cond| Self::evaluate_condition(record, &cond))
    }

    #[must_use]
    pub fn evaluate_condition(record: &Record, condition: &Condition) -> bool {
        let value = record.get(condition.column()).unwrap_or(&Value::Null);

        match condition {
            Condition::IsNull(_) => value.is_null(),
            Condition::IsNotNull(_) => !value.is_null(),
            Condition::Equals(_, literal) => value.loose_eq(literal),
            Condition::NotEquals(_, literal) => {
                !value.is_null() && !literal.is_null() && !value.loose_eq(literal)
            }
            Condition::GreaterThan(_, n) => Self::compare(value, |v| v > *n),
            Condition::LessThan(_, n) => Self::compare(value, |v| v < *n),
            Condition::GreaterThanOrEqual(_, n) => Self::compare(value, |v| v >= *n),
            Condition::LessThanOrEqual(_, n) => Self::compare(value, |v| v <= *n),
            Condition::Like(_, pattern) => Self::match_like(value, pattern),
        }
    }

    // Null and non-numeric values never satisfy an ordering comparison.
    fn compare(value: &Value, op: impl Fn(f64) -> bool) -> bool {
        value.as_number().is_some_and(op)
    }

    /// Match a value against a LIKE pattern.
    ///
    /// `%` matches any run of characters; every other character, `_`
    /// included, matches itself. Matching is case-sensitive.
    #[must_use]
    pub fn match_like(value: &Value, pattern: &str) -> bool {
        if value.is_null() {
            return false;
        }
        let text: Vec<char> = value.to_string().chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        Self::match_wildcard(&text, &pattern)
    }

    /// On a mismatch only the most recent `%` is retried, one character
    /// further along the text, so the work is bounded by text x pattern.
    fn match_wildcard(text: &[char], pattern: &[char]) -> bool {
        let (mut ti, mut pi) = (0, 0);
        // (pattern index after the last `%`, text index it is resumed from)
        let mut star: Option<(usize, usize)> = None;

        while ti < text.len() {
            if pi < pattern.len() && pattern[pi] == '%' {
                pi += 1;
                star = Some((pi, ti));
            } else if pi < pattern.len() && pattern[pi] == text[ti] {
                pi += 1;
                ti += 1;
            } else if let Some((star_pi, star_ti)) = star {
                pi = star_pi;
                ti = star_ti + 1;
                star = Some((star_pi, ti));
            } else {
                return false;
            }
        }

        pattern[pi..].iter().all(|&c| c == '%')
    }
}
