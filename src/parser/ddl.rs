use super::common::{identifier, keyword, ws};
use super::statement::{ColumnDef, Statement};
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, tuple},
    IResult,
};

// `(10, 2)` in DECIMAL(10, 2); kept as part of the type text.
fn type_modifier(input: &str) -> IResult<&str, &str> {
    recognize(delimited(char('('), take_while(|c| c != ')'), char(')')))(input)
}

fn type_text(input: &str) -> IResult<&str, String> {
    map(
        recognize(many0(alt((
            type_modifier,
            take_while1(|c| !matches!(c, ',' | '(' | ')')),
        )))),
        |s: &str| s.trim().to_string(),
    )(input)
}

fn column_def(input: &str) -> IResult<&str, ColumnDef> {
    map(pair(ws(identifier), type_text), |(name, type_name)| ColumnDef {
        name,
        type_name,
    })(input)
}

// CREATE [TEMP | TEMPORARY] TABLE [IF NOT EXISTS] name (col type, ...)
pub fn create_table(input: &str) -> IResult<&str, Statement> {
    let (input, _) = ws(keyword("CREATE"))(input)?;
    let (input, _) = opt(ws(alt((keyword("TEMPORARY"), keyword("TEMP")))))(input)?;
    let (input, _) = ws(keyword("TABLE"))(input)?;
    let (input, if_not_exists) = opt(tuple((
        ws(keyword("IF")),
        ws(keyword("NOT")),
        ws(keyword("EXISTS")),
    )))(input)?;
    let (input, name) = ws(identifier)(input)?;
    let (input, columns) = delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), column_def),
        ws(char(')')),
    )(input)?;

    Ok((
        input,
        Statement::CreateTable {
            name,
            columns,
            if_not_exists: if_not_exists.is_some(),
        },
    ))
}
