use std::str::FromStr;

use nom::IResult;
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, separated_pair},
};
use strum_macros::{Display, EnumString};

use crate::error::{QueryError, Result};
use crate::rational::ExactRational;

/// Longest accepted query once surrounding whitespace is trimmed.
pub const MAX_INPUT_LENGTH: usize = 69;

/// Most digits a single integer component may have, sign excluded.
const MAX_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OperandShape {
    #[strum(serialize = "whole number (A)")]
    WholeNumber,
    #[strum(serialize = "fraction (A/B)")]
    Fraction,
    #[strum(serialize = "mixed number (A_B/C)")]
    MixedNumber,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedQuery {
    pub left: ExactRational,
    pub right: ExactRational,
    pub operator: Operator,
}

fn signed_digits(i: &str) -> IResult<&str, &str> {
    recognize(pair(opt(char('-')), digit1))(i)
}

fn fraction_parts(i: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(signed_digits, char('/'), signed_digits)(i)
}

fn mixed_parts(i: &str) -> IResult<&str, (&str, (&str, &str))> {
    separated_pair(signed_digits, char('_'), fraction_parts)(i)
}

fn malformed(expected: OperandShape, operand: &str) -> QueryError {
    QueryError::MalformedOperand {
        expected,
        operand: operand.to_string(),
    }
}

/// Reports a zero denominator against the operand as it was typed.
fn as_typed(operand: &str) -> impl FnOnce(QueryError) -> QueryError + '_ {
    move |e| match e {
        QueryError::UndefinedFraction(_) => QueryError::UndefinedFraction(operand.to_string()),
        e => e,
    }
}

/// Splits a query into its left operand, operator and right operand tokens.
///
/// Tokens are separated by runs of spaces, other whitespace is not a
/// separator.
pub fn tokenize(input: &str, max_length: usize) -> Result<[&str; 3]> {
    let trimmed = input.trim();
    let length = trimmed.chars().count();
    if length > max_length {
        return Err(QueryError::InputTooLong {
            length,
            max: max_length,
        });
    }

    let tokens: Vec<&str> = trimmed.split(' ').filter(|t| !t.is_empty()).collect();
    match tokens.as_slice() {
        [left, operator, right] => Ok([*left, *operator, *right]),
        _ => Err(QueryError::WrongTokenCount(tokens.len())),
    }
}

pub fn parse_operator(token: &str) -> Result<Operator> {
    Operator::from_str(token).map_err(|_| QueryError::UnknownOperator(token.to_string()))
}

/// Parses one signed component of at most ten digits into an `i32`.
///
/// Anything shaped like an integer but outside the `i32` range, including
/// any run of more than ten digits, is an overflow rather than a format error.
pub fn parse_integer(text: &str) -> Result<i32> {
    let (_, digits) = all_consuming(signed_digits)(text)
        .map_err(|_| malformed(OperandShape::WholeNumber, text))?;

    if digits.trim_start_matches('-').len() > MAX_DIGITS {
        return Err(QueryError::overflow(format!("Integer {}", text)));
    }
    digits
        .parse::<i32>()
        .map_err(|_| QueryError::overflow(format!("Integer {}", text)))
}

/// Parses a whole number, fraction or mixed number operand.
pub fn parse_operand(operand: &str) -> Result<ExactRational> {
    if operand.contains('.') {
        return Err(QueryError::DecimalNotSupported(operand.to_string()));
    }

    if operand.contains('_') && operand.contains('/') {
        parse_mixed_number(operand)
    } else if operand.contains('/') {
        parse_fraction(operand)
    } else {
        parse_integer(operand).map(ExactRational::whole)
    }
}

fn parse_mixed_number(operand: &str) -> Result<ExactRational> {
    let (_, (whole, (numerator, denominator))) = all_consuming(mixed_parts)(operand)
        .map_err(|_| malformed(OperandShape::MixedNumber, operand))?;

    if numerator.starts_with('-') || denominator.starts_with('-') {
        return Err(QueryError::IllegalMixedNumberSign(operand.to_string()));
    }

    ExactRational::mixed(
        parse_integer(whole)?,
        parse_integer(numerator)?,
        parse_integer(denominator)?,
    )
    .map_err(as_typed(operand))
}

fn parse_fraction(operand: &str) -> Result<ExactRational> {
    let (_, (numerator, denominator)) = all_consuming(fraction_parts)(operand)
        .map_err(|_| malformed(OperandShape::Fraction, operand))?;

    ExactRational::fraction(parse_integer(numerator)?, parse_integer(denominator)?)
        .map_err(as_typed(operand))
}
