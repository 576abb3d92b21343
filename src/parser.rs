//! Access path tokenizer and key literal parser.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_till},
    character::complete::{anychar, char, digit1, hex_digit1, multispace0 as s, one_of},
    combinator::{all_consuming, cut, map, map_opt, map_res, not, opt, recognize, value},
    multi::{separated_list0, separated_list1},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
    Finish, IResult, Offset,
};

use crate::node::*;

impl<'p> AccessPath<'p> {
    /// Returns an iterator over the segments of the path.
    ///
    /// The base name is skipped. Segments are tokenized one at a time, and the
    /// iterator stops after the first error.
    pub fn segments(&self) -> Segments<'p> {
        Segments {
            path: self.text,
            rest: self.text,
            started: false,
        }
    }
}

/// The error type returned when a path is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("at position {position}, {message}")]
pub struct Error {
    position: usize,
    message: Box<str>,
}

impl Error {
    fn new(position: usize, message: impl Into<Box<str>>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Returns the byte offset in the path where the error was found.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the description of the error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Lazy iterator over the [`Segment`]s of an [`AccessPath`].
#[derive(Debug, Clone)]
pub struct Segments<'p> {
    path: &'p str,
    rest: &'p str,
    started: bool,
}

impl<'p> Segments<'p> {
    /// Pops the next raw segment and its position from the remaining path.
    fn pop(&mut self) -> Option<Result<(usize, &'p str), Error>> {
        if self.rest.is_empty() {
            return None;
        }
        let position = self.path.offset(self.rest);
        match raw_segment(self.rest).finish() {
            Ok((rest, raw)) => {
                self.rest = rest;
                Some(Ok((position, raw)))
            }
            Err(_) => {
                self.rest = "";
                Some(Err(Error::new(position, "unterminated string literal")))
            }
        }
    }
}

impl<'p> Iterator for Segments<'p> {
    type Item = Result<Segment<'p>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            // the base name only names the base object
            if let Err(e) = self.pop()? {
                return Some(Err(e));
            }
        }
        let segment = self
            .pop()?
            .and_then(|(position, raw)| parse_segment(raw, position));
        if segment.is_err() {
            self.rest = "";
        }
        Some(segment)
    }
}

fn is_delimiter(c: char) -> bool {
    c == '.' || c == '['
}

/// A raw segment: a leading delimiter, an optional quoted region directly after
/// it, and everything up to the next `.` or `[`.
fn raw_segment(input: &str) -> IResult<&str, &str> {
    recognize(pair(anychar, pair(opt(quoted_region), take_till(is_delimiter))))(input)
}

/// A quote region ends at the next quote of the same kind. There are no escapes.
fn quoted_region(input: &str) -> IResult<&str, ()> {
    let (rest, quote) = one_of("'\"")(input)?;
    value((), cut(pair(take_till(move |c| c == quote), char(quote))))(rest)
}

/// Parses a raw segment found at `position` in the path.
fn parse_segment(raw: &str, position: usize) -> Result<Segment<'_>, Error> {
    if let Some(name) = raw.strip_prefix('.') {
        return match name {
            "" => Err(Error::new(position, "empty member name")),
            "*" => Ok(Segment::MemberWildcard),
            name => Ok(Segment::Member(name)),
        };
    }
    let Some(key) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) else {
        return Err(Error::new(
            position,
            format!("invalid path segment \"{raw}\""),
        ));
    };
    match key.chars().next() {
        None => Err(Error::new(position, "empty key")),
        Some(_) if key == "*" => Ok(Segment::ElementWildcard),
        Some(c) if c.is_alphabetic() => Ok(Segment::Variable(key)),
        Some(_) => parse_literal(key, position + 1).map(Segment::Element),
    }
}

/// Parses a key literal found at `position` in the path.
pub(crate) fn parse_literal(input: &str, position: usize) -> Result<Literal, Error> {
    all_consuming(literal)(input)
        .finish()
        .map(|(_, literal)| literal)
        .map_err(|e| {
            Error::new(
                position + input.offset(e.input),
                format!("invalid key literal \"{input}\""),
            )
        })
}

fn literal(input: &str) -> IResult<&str, Literal> {
    delimited(
        s,
        alt((
            tuple_literal,
            list_literal,
            map(string, Literal::String),
            number,
            keyword,
        )),
        s,
    )(input)
}

/// `()`, `(a,)`, `(a, b)`, or a parenthesized literal `(a)`.
fn tuple_literal(input: &str) -> IResult<&str, Literal> {
    map_opt(
        delimited(
            pair(char('('), s),
            pair(separated_list0(char(','), literal), opt(char(','))),
            pair(s, char(')')),
        ),
        |(mut items, trailing)| match (items.len(), trailing) {
            (0, Some(_)) => None,
            (1, None) => items.pop(),
            _ => Some(Literal::Tuple(items)),
        },
    )(input)
}

fn list_literal(input: &str) -> IResult<&str, Literal> {
    map_opt(
        delimited(
            pair(char('['), s),
            pair(separated_list0(char(','), literal), opt(char(','))),
            pair(s, char(']')),
        ),
        |(items, trailing)| match (items.len(), trailing) {
            (0, Some(_)) => None,
            _ => Some(Literal::List(items)),
        },
    )(input)
}

fn number(input: &str) -> IResult<&str, Literal> {
    alt((
        map(radix_integer, Literal::Integer),
        map(decimal_integer, Literal::Integer),
        map(map_res(recognize_float, str::parse::<f64>), Literal::Float),
    ))(input)
}

/// `0x1f`, `0o17` or `0b101`, with an optional sign and `_` between digits.
fn radix_integer(input: &str) -> IResult<&str, i64> {
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, radix) = preceded(
        char('0'),
        alt((
            value(16, one_of("xX")),
            value(8, one_of("oO")),
            value(2, one_of("bB")),
        )),
    )(input)?;
    map_opt(
        recognize(pair(opt(char('_')), separated_list1(char('_'), hex_digit1))),
        move |digits: &str| {
            let v = i64::from_str_radix(&digits.replace('_', ""), radix).ok()?;
            Some(if sign == Some('-') { -v } else { v })
        },
    )(input)
}

/// A decimal integer with `_` between digits. Fails on overflow, so that the
/// number is parsed as a float instead.
fn decimal_integer(input: &str) -> IResult<&str, i64> {
    map_opt(
        terminated(
            recognize(pair(opt(one_of("+-")), separated_list1(char('_'), digit1))),
            not(one_of(".eE_")),
        ),
        |digits: &str| digits.replace('_', "").parse().ok(),
    )(input)
}

fn keyword(input: &str) -> IResult<&str, Literal> {
    alt((
        value(Literal::Null, alt((tag("None"), tag("null")))),
        value(Literal::Boolean(true), alt((tag("True"), tag("true")))),
        value(Literal::Boolean(false), alt((tag("False"), tag("false")))),
    ))(input)
}

fn string(input: &str) -> IResult<&str, String> {
    alt((
        delimited(char('\''), string_body("\\'"), char('\'')),
        delimited(char('"'), string_body("\\\""), char('"')),
    ))(input)
}

/// The body of a quoted string, stopping at any character in `stop`.
fn string_body(stop: &'static str) -> impl FnMut(&str) -> IResult<&str, String> {
    move |input| {
        map(
            opt(escaped_transform(
                is_not(stop),
                '\\',
                alt((
                    value("\\", char('\\')),
                    value("'", char('\'')),
                    value("\"", char('"')),
                    value("\n", char('n')),
                    value("\r", char('r')),
                    value("\t", char('t')),
                    value("\0", char('0')),
                )),
            )),
            Option::unwrap_or_default,
        )(input)
    }
}
