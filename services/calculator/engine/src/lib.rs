//! Exact fraction arithmetic over signed 32-bit components.
//!
//! A query is a single `<operand> <op> <operand>` line where each operand is a
//! whole number (`-3`), a fraction (`5/10`) or a mixed number (`1_1/4`). Every
//! intermediate value must fit in an `i32`, any step that would not is
//! rejected rather than wrapped.

use log::{debug, trace};

pub use api::{ComputeRequest, ComputeResponse, ErrorResponse};
pub use error::{QueryError, Result};
pub use query::{OperandShape, Operator, ParsedQuery, MAX_INPUT_LENGTH};
pub use rational::ExactRational;

pub mod api;
pub mod error;
pub mod eval;
pub mod query;
pub mod rational;

const DEFAULT_LOG_TARGET: &str = "calculator";

/// Parses, evaluates and formats queries.
///
/// Holds no state between queries, a single instance may be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Calculator {
    max_input_length: usize,
    log_target: &'static str,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(MAX_INPUT_LENGTH)
    }
}

impl Calculator {
    pub fn new(max_input_length: usize) -> Calculator {
        Calculator {
            max_input_length,
            log_target: DEFAULT_LOG_TARGET,
        }
    }

    /// Routes this calculator's log records to `target`.
    pub fn with_log_target(mut self, target: &'static str) -> Calculator {
        self.log_target = target;
        self
    }

    pub fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    pub fn parse(&self, input: &str) -> Result<ParsedQuery> {
        let target = self.log_target;
        trace!(target: target, "Tokenizing query {:?}", input);
        let [left, operator, right] = query::tokenize(input, self.max_input_length)?;

        trace!(target: target, "Parsing left operand {}", left);
        let left = query::parse_operand(left)?;
        trace!(target: target, "Parsing right operand {}", right);
        let right = query::parse_operand(right)?;
        trace!(target: target, "Parsing operator {}", operator);
        let operator = query::parse_operator(operator)?;

        Ok(ParsedQuery {
            left,
            right,
            operator,
        })
    }

    pub fn evaluate(&self, query: &ParsedQuery) -> Result<ExactRational> {
        trace!(
            target: self.log_target,
            "Evaluating {} {} {}",
            query.left,
            query.operator,
            query.right
        );
        eval::evaluate(query.left, query.right, query.operator)
    }

    /// Runs a query end to end, returning the canonical text of the result.
    pub fn execute(&self, input: &str) -> Result<String> {
        let parsed = self.parse(input)?;
        let result = self.evaluate(&parsed)?.to_text()?;
        debug!(target: self.log_target, "{} = {}", input.trim(), result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(r: Result<String>) -> &'static str {
        r.unwrap_err().code()
    }

    #[test]
    fn test_execute() -> Result<()> {
        let calculator = Calculator::default();

        assert_eq!(calculator.execute("1 + 2")?, "3");
        assert_eq!(calculator.execute("5/10 + 29/3")?, "10_1/6");
        assert_eq!(calculator.execute("1_1/4 * 2")?, "2_1/2");
        assert_eq!(calculator.execute("-1_1/4 - 1/4")?, "-1_1/2");
        assert_eq!(calculator.execute("3/4 / -3/8")?, "-2");
        assert_eq!(calculator.execute("  1/3   -   1/3  ")?, "0");
        assert_eq!(calculator.execute("2147483647 * 1")?, "2147483647");
        Ok(())
    }

    #[test]
    fn test_execute_errors() {
        let calculator = Calculator::default();

        assert_eq!(code(calculator.execute("2 / 0")), "undefined_fraction");
        assert_eq!(code(calculator.execute("2147483647 + 1")), "integer_overflow");
        assert_eq!(
            code(calculator.execute("5_-3/4 + 1")),
            "illegal_mixed_number_sign"
        );
        assert_eq!(code(calculator.execute("1.5 + 1")), "decimal_not_supported");
        assert_eq!(code(calculator.execute("1 % 1")), "unknown_operator");
        assert_eq!(code(calculator.execute("1 +")), "wrong_token_count");
        assert_eq!(code(calculator.execute("1 + x")), "malformed_operand");
        assert_eq!(code(calculator.execute("1/0 + 1")), "undefined_fraction");
        assert_eq!(code(calculator.execute("-2147483648 * 1")), "integer_overflow");
        assert_eq!(code(calculator.execute("-2147483648 / -1")), "integer_overflow");
        assert_eq!(
            code(calculator.execute(&format!("1 + {}", "1".repeat(66)))),
            "input_too_long"
        );
    }

    #[test]
    fn test_undefined_operand_names_token() {
        let calculator = Calculator::default();
        assert_eq!(
            calculator.execute("2 * 1_1/0"),
            Err(QueryError::UndefinedFraction("1_1/0".to_string()))
        );
        assert_eq!(
            calculator.execute("2 / 0"),
            Err(QueryError::UndefinedFraction("2/0".to_string()))
        );
    }

    #[test]
    fn test_operands_checked_before_operator() {
        let calculator = Calculator::default();
        assert_eq!(code(calculator.execute("1.5 x 2")), "decimal_not_supported");
    }

    #[test]
    fn test_max_input_length() -> Result<()> {
        let calculator = Calculator::new(5).with_log_target("test");
        assert_eq!(calculator.max_input_length(), 5);
        assert_eq!(calculator.execute(" 1 + 2 ")?, "3");
        assert_eq!(
            calculator.execute("10 + 2"),
            Err(QueryError::InputTooLong { length: 6, max: 5 })
        );
        Ok(())
    }

    #[test]
    fn test_parse() -> Result<()> {
        let parsed = Calculator::default().parse("1_1/4 * 2")?;
        assert_eq!(parsed.operator, Operator::Multiply);
        assert_eq!(parsed.left, ExactRational::fraction(5, 4)?);
        assert_eq!(parsed.right, ExactRational::whole(2));
        Ok(())
    }

    #[test]
    fn test_shared_across_threads() {
        let calculator = std::sync::Arc::new(Calculator::default());
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let calculator = calculator.clone();
                std::thread::spawn(move || calculator.execute(&format!("{} * 1/2", i)))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            results,
            vec![
                Ok("1/2".to_string()),
                Ok("1".to_string()),
                Ok("1_1/2".to_string()),
                Ok("2".to_string())
            ]
        );
    }
}
