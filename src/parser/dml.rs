use super::common::{identifier, keyword, value, ws};
use super::statement::Statement;
use crate::core::Value;
use log::warn;
use nom::{
    character::complete::char,
    combinator::opt,
    multi::{many0, separated_list1},
    sequence::{delimited, preceded},
    IResult,
};

fn value_tuple(input: &str) -> IResult<&str, Vec<Value>> {
    delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), ws(value)),
        ws(char(')')),
    )(input)
}

// INSERT INTO name [(col, ...)] VALUES (v, ...) [, (v, ...)]
// Only the first tuple is inserted.
pub fn insert(input: &str) -> IResult<&str, Statement> {
    let (input, _) = ws(keyword("INSERT"))(input)?;
    let (input, _) = ws(keyword("INTO"))(input)?;
    let (input, table) = ws(identifier)(input)?;
    let (input, columns) = opt(delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), ws(identifier)),
        ws(char(')')),
    ))(input)?;
    let (input, _) = ws(keyword("VALUES"))(input)?;
    let (input, values) = value_tuple(input)?;
    let (input, extra) = many0(preceded(ws(char(',')), value_tuple))(input)?;

    if !extra.is_empty() {
        warn!(
            "INSERT INTO {table}: only the first VALUES tuple is inserted, ignoring {} more",
            extra.len()
        );
    }

    Ok((
        input,
        Statement::Insert {
            table,
            columns,
            values,
        },
    ))
}
