use derive_more::Display;
use strum_macros::IntoStaticStr;

use crate::query::OperandShape;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Every way a single query can be rejected.
///
/// None of these are fatal to the caller, each one describes a problem with
/// the submitted text or with the arithmetic it asked for.
#[derive(Debug, Display, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum QueryError {
    #[display(
        fmt = "Input query of {} characters exceeds the maximum of {}",
        length,
        max
    )]
    InputTooLong { length: usize, max: usize },

    #[display(fmt = "Invalid input query, expected 3 values but found {}", _0)]
    WrongTokenCount(usize),

    #[display(
        fmt = "Expected arithmetic operation token (+, -, *, /) between operands but found: {}",
        _0
    )]
    UnknownOperator(String),

    #[display(fmt = "Decimal numbers are not supported but found: {}", _0)]
    DecimalNotSupported(String),

    #[display(
        fmt = "Mixed number may only carry a sign on its whole number part but found: {}",
        _0
    )]
    IllegalMixedNumberSign(String),

    #[display(fmt = "Expected {} but found: {}", expected, operand)]
    MalformedOperand {
        expected: OperandShape,
        operand: String,
    },

    #[display(
        fmt = "{} exceeds the signed 32-bit integer range (-2,147,483,648 to 2,147,483,647)",
        _0
    )]
    IntegerOverflow(String),

    #[display(fmt = "Fraction {} is undefined", _0)]
    UndefinedFraction(String),
}

impl QueryError {
    /// Stable identifier for the kind of rejection, e.g. `integer_overflow`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub(crate) fn overflow(step: impl Into<String>) -> Self {
        QueryError::IntegerOverflow(step.into())
    }

    pub(crate) fn undefined(numerator: i32) -> Self {
        QueryError::UndefinedFraction(format!("{}/0", numerator))
    }
}

impl std::error::Error for QueryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code() {
        assert_eq!(
            QueryError::InputTooLong { length: 70, max: 69 }.code(),
            "input_too_long"
        );
        assert_eq!(QueryError::WrongTokenCount(2).code(), "wrong_token_count");
        assert_eq!(
            QueryError::IllegalMixedNumberSign("5_-3/4".to_string()).code(),
            "illegal_mixed_number_sign"
        );
        assert_eq!(QueryError::undefined(2).code(), "undefined_fraction");
    }

    #[test]
    fn test_display() {
        let e = QueryError::MalformedOperand {
            expected: OperandShape::Fraction,
            operand: "44/Q".to_string(),
        };
        assert_eq!(e.to_string(), "Expected fraction (A/B) but found: 44/Q");
        assert_eq!(
            QueryError::undefined(2).to_string(),
            "Fraction 2/0 is undefined"
        );
        assert_eq!(
            QueryError::UndefinedFraction("1_1/0".to_string()).to_string(),
            "Fraction 1_1/0 is undefined"
        );
        assert_eq!(
            QueryError::overflow("Addition").to_string(),
            "Addition exceeds the signed 32-bit integer range (-2,147,483,648 to 2,147,483,647)"
        );
    }
}
