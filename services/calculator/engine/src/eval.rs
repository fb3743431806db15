use crate::error::Result;
use crate::query::Operator;
use crate::rational::{ExactRational, OrOverflow};

/// Scales both operands onto the product of their denominators.
///
/// This is deliberately not the least common denominator, `5/10` and `29/3`
/// become `15/30` and `290/30`.
pub fn common_denominator(
    left: ExactRational,
    right: ExactRational,
) -> Result<(ExactRational, ExactRational)> {
    let (ln, ld) = (left.numerator(), left.denominator());
    let (rn, rd) = (right.numerator(), right.denominator());
    let step = "Common denominator scaling";

    let denominator = ld.checked_mul(rd).or_overflow(step)?;
    let left = ExactRational::fraction(ln.checked_mul(rd).or_overflow(step)?, denominator)?;
    let right = ExactRational::fraction(rn.checked_mul(ld).or_overflow(step)?, denominator)?;
    Ok((left, right))
}

pub fn evaluate(left: ExactRational, right: ExactRational, op: Operator) -> Result<ExactRational> {
    match op {
        Operator::Add => add(left, right),
        Operator::Subtract => subtract(left, right),
        Operator::Multiply => multiply(left, right),
        Operator::Divide => divide(left, right),
    }
}

fn add(left: ExactRational, right: ExactRational) -> Result<ExactRational> {
    let (left, right) = common_denominator(left, right)?;
    let numerator = left
        .numerator()
        .checked_add(right.numerator())
        .or_overflow("Addition")?;
    ExactRational::fraction(numerator, left.denominator())
}

fn subtract(left: ExactRational, right: ExactRational) -> Result<ExactRational> {
    let (left, right) = common_denominator(left, right)?;
    let numerator = left
        .numerator()
        .checked_sub(right.numerator())
        .or_overflow("Subtraction")?;
    ExactRational::fraction(numerator, left.denominator())
}

fn multiply(left: ExactRational, right: ExactRational) -> Result<ExactRational> {
    let step = "Multiplication";
    ExactRational::fraction(
        left.numerator()
            .checked_mul(right.numerator())
            .or_overflow(step)?,
        left.denominator()
            .checked_mul(right.denominator())
            .or_overflow(step)?,
    )
}

/// Multiplies by the reciprocal of `right`.
///
/// Dividing by zero leaves a zero denominator, which construction rejects as
/// an undefined fraction.
fn divide(left: ExactRational, right: ExactRational) -> Result<ExactRational> {
    let step = "Division";
    let mut numerator = left
        .numerator()
        .checked_mul(right.denominator())
        .or_overflow(step)?;
    let mut denominator = left
        .denominator()
        .checked_mul(right.numerator())
        .or_overflow(step)?;

    if right.numerator() < 0 {
        numerator = numerator.checked_neg().or_overflow(step)?;
        denominator = denominator.checked_neg().or_overflow(step)?;
    }

    ExactRational::fraction(numerator, denominator)
}
