/// Clause extraction for SELECT statements
///
/// Locates the clause keywords (SELECT, FROM, [INNER|LEFT] JOIN ... ON,
/// WHERE, GROUP BY, ORDER BY, LIMIT) at word boundaries outside string
/// literals. Each clause's text runs from the end of its keyword to the
/// start of the next recognized keyword, or to the end of the statement.
/// Only SELECT and FROM are mandatory.

use super::common::{column_ref, is_word_char, ws};
use super::queries::{limit_count, order_by_key, select_list, table_ref};
use super::statement::{ClauseSet, JoinClause, JoinType};
use crate::core::ExecutionError;
use log::{debug, warn};
use nom::{
    branch::alt,
    bytes::complete::{take, take_while, take_while1},
    character::complete::char,
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    sequence::delimited,
    IResult, Parser,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Select,
    From,
    Join,
    On,
    Where,
    GroupBy,
    OrderBy,
    Limit,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    keyword: Keyword,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

// One lexical step: a quoted literal (skipped), a word, or any other char.
fn token(input: &str) -> IResult<&str, Option<&str>> {
    alt((
        map(
            delimited(char('\''), take_while(|c| c != '\''), opt(char('\''))),
            |_| None,
        ),
        map(take_while1(is_word_char), Some),
        map(take(1usize), |_| None),
    ))(input)
}

fn words(input: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut rest = input;
    while let Ok((next, word)) = token(rest) {
        if let Some(text) = word {
            let start = input.len() - rest.len();
            words.push(Word {
                text,
                start,
                end: start + text.len(),
            });
        }
        rest = next;
    }
    words
}

fn is_word(word: Option<&Word<'_>>, expected: &str) -> bool {
    word.is_some_and(|w| w.text.eq_ignore_ascii_case(expected))
}

struct Anchors {
    anchors: Vec<Anchor>,
    join_type: JoinType,
}

fn find_anchors(input: &str) -> Result<Anchors, ExecutionError> {
    let words = words(input);
    let mut anchors: Vec<Anchor> = Vec::new();
    let mut join_type = JoinType::Inner;

    let seen = |anchors: &[Anchor], kw: Keyword| anchors.iter().any(|a| a.keyword == kw);

    for (i, word) in words.iter().enumerate() {
        let upper = word.text.to_ascii_uppercase();
        let found = match upper.as_str() {
            "SELECT" => Some((Keyword::Select, word.start, word.end)),
            "FROM" => Some((Keyword::From, word.start, word.end)),
            "WHERE" => Some((Keyword::Where, word.start, word.end)),
            "LIMIT" => Some((Keyword::Limit, word.start, word.end)),
            "GROUP" if is_word(words.get(i + 1), "BY") => {
                Some((Keyword::GroupBy, word.start, words[i + 1].end))
            }
            "ORDER" if is_word(words.get(i + 1), "BY") => {
                Some((Keyword::OrderBy, word.start, words[i + 1].end))
            }
            "ON" if seen(&anchors, Keyword::Join) => Some((Keyword::On, word.start, word.end)),
            "JOIN" => {
                // Walk back over [INNER | LEFT | RIGHT | FULL | CROSS] [OUTER].
                let mut start_idx = i;
                if start_idx > 0 && is_word(words.get(start_idx - 1), "OUTER") {
                    start_idx -= 1;
                }
                if start_idx > 0 {
                    let qualifier = words[start_idx - 1].text.to_ascii_uppercase();
                    match qualifier.as_str() {
                        "INNER" => start_idx -= 1,
                        "LEFT" => {
                            join_type = JoinType::Left;
                            start_idx -= 1;
                        }
                        "RIGHT" | "FULL" | "CROSS" => {
                            return Err(ExecutionError::malformed(
                                "JOIN",
                                format!("{qualifier} JOIN is not supported; use JOIN or LEFT JOIN"),
                            ));
                        }
                        _ => {}
                    }
                }
                Some((Keyword::Join, words[start_idx].start, word.end))
            }
            _ => None,
        };

        if let Some((keyword, start, end)) = found {
            if !seen(&anchors, keyword) {
                anchors.push(Anchor { keyword, start, end });
            }
        }
    }

    anchors.sort_by_key(|a| a.start);
    Ok(Anchors { anchors, join_type })
}

fn clause_text<'a>(input: &'a str, anchors: &[Anchor], keyword: Keyword) -> Option<&'a str> {
    let idx = anchors.iter().position(|a| a.keyword == keyword)?;
    let anchor = anchors[idx];
    let end = anchors.get(idx + 1).map_or(input.len(), |next| next.start);
    Some(input[anchor.end..end].trim())
}

fn parse_full<'a, O, F>(clause: &str, text: &'a str, parser: F) -> Result<O, ExecutionError>
where
    F: Parser<&'a str, O, nom::error::Error<&'a str>>,
{
    all_consuming(parser)(text)
        .map(|(_, out)| out)
        .map_err(|_| ExecutionError::malformed(clause, format!("could not read '{text}'")))
}

fn require_text<'a>(clause: &str, text: &'a str) -> Result<&'a str, ExecutionError> {
    if text.is_empty() {
        Err(ExecutionError::malformed(clause, "clause is empty"))
    } else {
        Ok(text)
    }
}

/// Split a SELECT statement into its clauses.
pub fn split_clauses(input: &str) -> Result<ClauseSet, ExecutionError> {
    let Anchors { anchors, join_type } = find_anchors(input)?;

    let select_text = clause_text(input, &anchors, Keyword::Select)
        .ok_or_else(|| ExecutionError::Clause("SELECT".to_string()))?;
    let from_text = clause_text(input, &anchors, Keyword::From)
        .ok_or_else(|| ExecutionError::Clause("FROM".to_string()))?;

    let select_list = parse_full("SELECT", require_text("SELECT", select_text)?, select_list)?;
    let from = parse_full("FROM", require_text("FROM", from_text)?, table_ref)?;

    let join = match clause_text(input, &anchors, Keyword::Join) {
        Some(join_text) => {
            let table = parse_full("JOIN", require_text("JOIN", join_text)?, table_ref)?;
            let on_text = clause_text(input, &anchors, Keyword::On)
                .ok_or_else(|| ExecutionError::malformed("JOIN", "missing ON condition"))?;
            let (left, right) = on_text.split_once('=').ok_or_else(|| {
                ExecutionError::malformed("ON", format!("expected left = right, got '{on_text}'"))
            })?;
            let on_left = parse_full("ON", left.trim(), column_ref)?;
            let on_right = parse_full("ON", right.trim(), column_ref)?;
            Some(JoinClause {
                join_type,
                table,
                on_left,
                on_right,
            })
        }
        None => None,
    };

    let where_condition = clause_text(input, &anchors, Keyword::Where)
        .map(|text| require_text("WHERE", text).map(str::to_string))
        .transpose()?;

    let group_by = clause_text(input, &anchors, Keyword::GroupBy)
        .map(|text| {
            parse_full(
                "GROUP BY",
                require_text("GROUP BY", text)?,
                separated_list1(ws(char(',')), ws(column_ref)),
            )
        })
        .transpose()?;

    let order_by = clause_text(input, &anchors, Keyword::OrderBy)
        .map(|text| {
            let text = require_text("ORDER BY", text)?;
            // Only the first sort key is honored.
            let (first, rest) = text.split_once(',').unwrap_or((text, ""));
            if !rest.trim().is_empty() {
                warn!("ORDER BY: ignoring additional sort keys '{}'", rest.trim());
            }
            parse_full("ORDER BY", first.trim(), order_by_key)
        })
        .transpose()?;

    let limit = clause_text(input, &anchors, Keyword::Limit)
        .map(|text| parse_full("LIMIT", require_text("LIMIT", text)?, limit_count))
        .transpose()?;

    let clauses = ClauseSet {
        select_list,
        from,
        join,
        where_condition,
        group_by,
        order_by,
        limit,
    };
    debug!("clauses: {clauses:?}");
    Ok(clauses)
}
