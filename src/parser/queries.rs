use super::common::{column_ref, identifier, keyword, number, string_literal, value, ws};
use super::statement::{
    AggregateCall, AggregateFunction, AggregateTarget, Condition, OrderBy, SelectExpr,
    SelectItem, SortOrder, TableRef,
};
use crate::core::Value;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, verify},
    multi::separated_list1,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

fn numeric(input: &str) -> IResult<&str, f64> {
    map(number, |v: Value| v.coerce_number())(input)
}

// Shapes are tried in a fixed order; the first structural match wins.
pub fn condition(input: &str) -> IResult<&str, Condition> {
    alt((
        map(
            tuple((
                ws(column_ref),
                ws(keyword("IS")),
                ws(keyword("NOT")),
                ws(keyword("NULL")),
            )),
            |(col, _, _, _)| Condition::IsNotNull(col),
        ),
        map(
            tuple((ws(column_ref), ws(keyword("IS")), ws(keyword("NULL")))),
            |(col, _, _)| Condition::IsNull(col),
        ),
        map(
            tuple((ws(column_ref), ws(char('=')), ws(value))),
            |(col, _, val)| Condition::Equals(col, val),
        ),
        map(
            tuple((ws(column_ref), ws(alt((tag("!="), tag("<>")))), ws(value))),
            |(col, _, val)| Condition::NotEquals(col, val),
        ),
        map(
            tuple((ws(column_ref), ws(tag(">=")), ws(numeric))),
            |(col, _, n)| Condition::GreaterThanOrEqual(col, n),
        ),
        map(
            tuple((ws(column_ref), ws(tag("<=")), ws(numeric))),
            |(col, _, n)| Condition::LessThanOrEqual(col, n),
        ),
        map(
            tuple((ws(column_ref), ws(char('>')), ws(numeric))),
            |(col, _, n)| Condition::GreaterThan(col, n),
        ),
        map(
            tuple((ws(column_ref), ws(char('<')), ws(numeric))),
            |(col, _, n)| Condition::LessThan(col, n),
        ),
        map(
            tuple((ws(column_ref), ws(keyword("LIKE")), ws(string_literal))),
            |(col, _, pattern)| Condition::Like(col, pattern),
        ),
    ))(input)
}

fn count_target(input: &str) -> IResult<&str, AggregateTarget> {
    alt((
        map(ws(char('*')), |_| AggregateTarget::All),
        column_target,
    ))(input)
}

fn column_target(input: &str) -> IResult<&str, AggregateTarget> {
    map(ws(column_ref), AggregateTarget::Column)(input)
}

// COUNT(*), COUNT(col), SUM(col), AVG(col), MIN(col), MAX(col)
pub fn aggregate_call(input: &str) -> IResult<&str, AggregateCall> {
    let (input, function) = ws(alt((
        map(keyword("COUNT"), |_| AggregateFunction::Count),
        map(keyword("SUM"), |_| AggregateFunction::Sum),
        map(keyword("AVG"), |_| AggregateFunction::Avg),
        map(keyword("MIN"), |_| AggregateFunction::Min),
        map(keyword("MAX"), |_| AggregateFunction::Max),
    )))(input)?;

    let (input, target) = if function == AggregateFunction::Count {
        delimited(char('('), count_target, char(')'))(input)?
    } else {
        delimited(char('('), column_target, char(')'))(input)?
    };
    Ok((input, AggregateCall { function, target }))
}

fn is_reserved(word: &str) -> bool {
    matches!(
        word.to_uppercase().as_str(),
        "AS" | "ON" | "JOIN" | "INNER" | "LEFT" | "OUTER" | "WHERE"
    )
}

fn alias(input: &str) -> IResult<&str, String> {
    alt((
        preceded(ws(keyword("AS")), ws(identifier)),
        ws(verify(identifier, |s: &String| !is_reserved(s))),
    ))(input)
}

fn select_item(input: &str) -> IResult<&str, SelectItem> {
    let (input, expr) = ws(alt((
        map(aggregate_call, SelectExpr::Aggregate),
        map(char('*'), |_| SelectExpr::Wildcard),
        map(column_ref, SelectExpr::Column),
    )))(input)?;
    let (input, alias) = opt(alias)(input)?;
    Ok((input, SelectItem { expr, alias }))
}

pub fn select_list(input: &str) -> IResult<&str, Vec<SelectItem>> {
    separated_list1(ws(char(',')), select_item)(input)
}

/// `table`, `table alias` or `table AS alias`.
pub fn table_ref(input: &str) -> IResult<&str, TableRef> {
    map(pair(ws(identifier), opt(alias)), |(name, alias)| TableRef {
        name,
        alias,
    })(input)
}

/// First ORDER BY key with its direction. The key may be an aggregate
/// (`COUNT(*)`), which is stored by its canonical label.
pub fn order_by_key(input: &str) -> IResult<&str, OrderBy> {
    map(
        pair(
            ws(alt((map(aggregate_call, |call| call.label()), column_ref))),
            opt(ws(alt((
                map(keyword("ASC"), |_| SortOrder::Asc),
                map(keyword("DESC"), |_| SortOrder::Desc),
            )))),
        ),
        |(column, order)| OrderBy {
            column,
            order: order.unwrap_or(SortOrder::Asc),
        },
    )(input)
}

pub fn limit_count(input: &str) -> IResult<&str, usize> {
    ws(map_res(digit1, |s: &str| s.parse::<usize>()))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_shapes() {
        assert_eq!(
            condition("parent_id IS NULL").unwrap().1,
            Condition::IsNull("parent_id".to_string())
        );
        assert_eq!(
            condition("parent_id is not null").unwrap().1,
            Condition::IsNotNull("parent_id".to_string())
        );
        assert_eq!(
            condition("name = 'Dog'").unwrap().1,
            Condition::Equals("name".to_string(), Value::Text("Dog".to_string()))
        );
        assert_eq!(
            condition("c.id > 1").unwrap().1,
            Condition::GreaterThan("c.id".to_string(), 1.0)
        );
        assert_eq!(
            condition("id<3").unwrap().1,
            Condition::LessThan("id".to_string(), 3.0)
        );
        assert_eq!(
            condition("id >= 2").unwrap().1,
            Condition::GreaterThanOrEqual("id".to_string(), 2.0)
        );
        assert_eq!(
            condition("id <> 2").unwrap().1,
            Condition::NotEquals("id".to_string(), Value::Integer(2))
        );
        assert_eq!(
            condition("name LIKE 'D%'").unwrap().1,
            Condition::Like("name".to_string(), "D%".to_string())
        );
    }

    #[test]
    fn test_condition_stops_after_first_atom() {
        let (rest, cond) = condition("id = 1 AND name = 'Dog'").unwrap();
        assert_eq!(cond, Condition::Equals("id".to_string(), Value::Integer(1)));
        assert_eq!(rest.trim(), "AND name = 'Dog'");
    }

    #[test]
    fn test_unrecognized_condition() {
        assert!(condition("name = other_name").is_err());
        assert!(condition("id > 'abc'").is_err());
    }

    #[test]
    fn test_select_list_with_aliases() {
        let (rest, items) = select_list("c.name, p.name AS parent, COUNT(*) n").unwrap();
        assert!(rest.is_empty());
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].output_name(), "name");
        assert_eq!(items[1].output_name(), "parent");
        assert_eq!(items[2].output_name(), "n");
        assert_eq!(
            items[2].expr,
            SelectExpr::Aggregate(AggregateCall {
                function: AggregateFunction::Count,
                target: AggregateTarget::All,
            })
        );
    }

    #[test]
    fn test_aggregate_labels() {
        let (_, call) = aggregate_call("avg( weight )").unwrap();
        assert_eq!(call.label(), "AVG(weight)");
        assert!(aggregate_call("SUM(*)").is_err());
    }

    #[test]
    fn test_table_ref() {
        let (_, t) = table_ref(" concepts c ").unwrap();
        assert_eq!(t.name, "concepts");
        assert_eq!(t.qualifier(), "c");
        let (_, t) = table_ref("concepts AS p").unwrap();
        assert_eq!(t.alias.as_deref(), Some("p"));
        let (_, t) = table_ref("concepts").unwrap();
        assert_eq!(t.qualifier(), "concepts");
    }

    #[test]
    fn test_order_by_key() {
        let (_, key) = order_by_key("name DESC").unwrap();
        assert_eq!(key.column, "name");
        assert_eq!(key.order, SortOrder::Desc);
        let (_, key) = order_by_key("count(*)").unwrap();
        assert_eq!(key.column, "COUNT(*)");
        assert_eq!(key.order, SortOrder::Asc);
    }
}
