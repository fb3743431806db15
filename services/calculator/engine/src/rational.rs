use std::fmt;

use crate::error::{QueryError, Result};

/// Maps the `None` of an `i32::checked_*` call onto an overflow rejection
/// naming the step that overflowed.
pub(crate) trait OrOverflow<T> {
    fn or_overflow(self, step: &str) -> Result<T>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow(self, step: &str) -> Result<T> {
        self.ok_or_else(|| QueryError::overflow(step))
    }
}

/// Greatest common divisor of two magnitudes.
///
/// Computes the same divisor as repeatedly subtracting the smaller value from
/// the larger until both are equal, using remainders so that `gcd(i32::MAX, 1)`
/// does not take two billion steps.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// A fraction whose numerator and denominator both fit in an `i32`.
///
/// Every constructor leaves the value normalized: the denominator is strictly
/// positive and the sign lives on the numerator. Values are not kept in
/// lowest terms, [`ExactRational::reduce`] does that on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactRational {
    numerator: i32,
    denominator: i32,
}

impl ExactRational {
    pub fn whole(value: i32) -> ExactRational {
        ExactRational {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn fraction(numerator: i32, denominator: i32) -> Result<ExactRational> {
        if denominator == 0 {
            return Err(QueryError::undefined(numerator));
        }
        ExactRational {
            numerator,
            denominator,
        }
        .normalize()
    }

    /// Builds the improper fraction for `whole_numerator/denominator`.
    ///
    /// A negative whole part makes the whole value negative. With a zero whole
    /// part the numerator is taken as given, sign included.
    pub fn mixed(whole: i32, numerator: i32, denominator: i32) -> Result<ExactRational> {
        if denominator == 0 {
            return Err(QueryError::undefined(numerator));
        }

        let numerator = if whole == 0 {
            numerator
        } else {
            let step = "Mixed number to improper fraction conversion";
            let magnitude = whole
                .checked_abs()
                .and_then(|w| w.checked_mul(denominator))
                .and_then(|w| w.checked_add(numerator))
                .or_overflow(step)?;
            if whole < 0 {
                magnitude.checked_neg().or_overflow(step)?
            } else {
                magnitude
            }
        };

        ExactRational {
            numerator,
            denominator,
        }
        .normalize()
    }

    pub fn numerator(&self) -> i32 {
        self.numerator
    }

    pub fn denominator(&self) -> i32 {
        self.denominator
    }

    /// Moves the sign onto the numerator so the denominator is positive.
    ///
    /// This is the only place a zero denominator is rejected once a value
    /// exists, arithmetic results are all funnelled through it.
    pub fn normalize(self) -> Result<ExactRational> {
        if self.denominator == 0 {
            return Err(QueryError::undefined(self.numerator));
        }
        if self.denominator > 0 {
            return Ok(self);
        }

        let step = "Fraction sign normalization";
        Ok(ExactRational {
            numerator: self.numerator.checked_neg().or_overflow(step)?,
            denominator: self.denominator.checked_neg().or_overflow(step)?,
        })
    }

    /// Divides out the greatest common divisor. Zero is left as `0/d`.
    pub fn reduce(self) -> Result<ExactRational> {
        if self.denominator == 0 {
            return Err(QueryError::undefined(self.numerator));
        }
        if self.numerator == 0 {
            return Ok(self);
        }

        let step = "Fraction reduction";
        let n = self.numerator.checked_abs().or_overflow(step)?;
        let d = self.denominator.checked_abs().or_overflow(step)?;
        let divisor = gcd(n as u32, d as u32) as i32;

        Ok(ExactRational {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        })
    }

    /// Canonical text: `0`, `7`, `-1/3` or `-2_2/3`, always in lowest terms.
    pub fn to_text(self) -> Result<String> {
        let reduced = self.reduce()?;
        let (n, d) = (reduced.numerator, reduced.denominator);
        let step = "Result formatting";

        if n == 0 {
            return Ok("0".to_string());
        }

        let remainder = n.checked_rem(d).or_overflow(step)?;
        let quotient = n.checked_div(d).or_overflow(step)?;
        if remainder == 0 {
            return Ok(quotient.to_string());
        }

        if n.checked_abs().or_overflow(step)? < d.checked_abs().or_overflow(step)? {
            return Ok(format!("{}/{}", n, d));
        }

        Ok(format!(
            "{}_{}/{}",
            quotient,
            remainder.checked_abs().or_overflow(step)?,
            d
        ))
    }
}

impl fmt::Display for ExactRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
