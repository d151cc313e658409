use crate::core::Value;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while},
    character::complete::{alpha1, char, digit1, multispace0, satisfy},
    combinator::{map, map_res, not, opt, peek, recognize},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive keyword that must not run into a longer word
/// (`NULL` matches, `NULLABLE` does not).
pub fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(kw), not(peek(satisfy(is_word_char))))
}

pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            take_while(is_word_char),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// `column` or `qualifier.column`.
pub fn column_ref(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(identifier, opt(pair(char('.'), identifier)))),
        |s: &str| s.to_string(),
    )(input)
}

pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        |s: &str| s.to_string(),
    )(input)
}

pub fn number(input: &str) -> IResult<&str, Value> {
    alt((
        map_res(
            recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
            |s: &str| s.parse::<f64>().map(Value::Float),
        ),
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>().map(Value::Integer)
        }),
    ))(input)
}

/// Literal as written in WHERE and VALUES: quoted text, a bare number,
/// or one of NULL / TRUE / FALSE in any case.
pub fn value(input: &str) -> IResult<&str, Value> {
    alt((
        map(keyword("NULL"), |_| Value::Null),
        map(keyword("TRUE"), |_| Value::Boolean(true)),
        map(keyword("FALSE"), |_| Value::Boolean(false)),
        map(string_literal, Value::Text),
        number,
    ))(input)
}
