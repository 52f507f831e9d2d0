//! Exact fraction arithmetic.
//!
//! A [`Rational`] wraps an arbitrary-precision `BigRational`, kept in lowest
//! terms with a positive denominator, so two values compare equal exactly
//! when they denote the same number and no intermediate ever overflows.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Serialize, Serializer};

use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rational(BigRational);

impl Rational {
  pub fn zero() -> Self {
    Rational(BigRational::zero())
  }

  pub fn one() -> Self {
    Rational(BigRational::one())
  }

  pub fn from_integer(n: i128) -> Self {
    Self::from_bigint(BigInt::from(n))
  }

  pub fn from_bigint(n: BigInt) -> Self {
    Rational(BigRational::from_integer(n))
  }

  /// Build `numer / denom`, reduced and with the sign on the numerator.
  pub fn new(numer: i128, denom: i128) -> Result<Self, EngineError> {
    Self::from_parts(BigInt::from(numer), BigInt::from(denom))
  }

  pub fn from_parts(numer: BigInt, denom: BigInt) -> Result<Self, EngineError> {
    if denom.is_zero() {
      return Err(EngineError::DivisionByZero);
    }
    Ok(Rational(BigRational::new(numer, denom)))
  }

  pub fn numer(&self) -> &BigInt {
    self.0.numer()
  }

  pub fn denom(&self) -> &BigInt {
    self.0.denom()
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }

  pub fn is_one(&self) -> bool {
    self.0.is_one()
  }

  pub fn is_integer(&self) -> bool {
    self.0.is_integer()
  }

  pub fn is_negative(&self) -> bool {
    self.0.is_negative()
  }

  pub fn abs(&self) -> Self {
    Rational(self.0.abs())
  }

  pub fn signum(&self) -> i32 {
    if self.0.is_zero() {
      0
    } else if self.0.is_negative() {
      -1
    } else {
      1
    }
  }

  pub fn checked_div(&self, other: &Rational) -> Result<Self, EngineError> {
    if other.is_zero() {
      return Err(EngineError::DivisionByZero);
    }
    Ok(Rational(&self.0 / &other.0))
  }

  pub fn reciprocal(&self) -> Result<Self, EngineError> {
    if self.is_zero() {
      return Err(EngineError::DivisionByZero);
    }
    Ok(self.recip_nonzero())
  }

  /// Reciprocal of a value already known to be non-zero (pivots, norms).
  pub(crate) fn recip_nonzero(&self) -> Self {
    Rational(self.0.recip())
  }

  /// Nearest `f64`; infinite when the magnitude is out of range.
  pub fn to_f64(&self) -> f64 {
    self.0.to_f64().unwrap_or(f64::NAN)
  }

  /// Exact square root when both numerator and denominator are perfect
  /// squares.
  pub fn exact_sqrt(&self) -> Option<Self> {
    if self.is_negative() {
      return None;
    }
    let n = self.numer().sqrt();
    let d = self.denom().sqrt();
    if &n * &n == *self.numer() && &d * &d == *self.denom() {
      Some(Rational(BigRational::new(n, d)))
    } else {
      None
    }
  }

  pub fn pow(&self, exp: u32) -> Self {
    Rational(num_traits::pow(self.0.clone(), exp as usize))
  }
}

impl Default for Rational {
  fn default() -> Self {
    Self::zero()
  }
}

impl From<i64> for Rational {
  fn from(n: i64) -> Self {
    Self::from_bigint(BigInt::from(n))
  }
}

impl From<BigInt> for Rational {
  fn from(n: BigInt) -> Self {
    Self::from_bigint(n)
  }
}

// Owned and borrowed operands in every combination, so callers never clone
// just to add two entries.
macro_rules! forward_binop {
  ($imp:ident, $method:ident) => {
    impl $imp<Rational> for Rational {
      type Output = Rational;

      fn $method(self, other: Rational) -> Rational {
        Rational(self.0.$method(other.0))
      }
    }

    impl<'a> $imp<&'a Rational> for Rational {
      type Output = Rational;

      fn $method(self, other: &'a Rational) -> Rational {
        Rational(self.0.$method(&other.0))
      }
    }

    impl<'a> $imp<Rational> for &'a Rational {
      type Output = Rational;

      fn $method(self, other: Rational) -> Rational {
        Rational((&self.0).$method(other.0))
      }
    }

    impl<'a, 'b> $imp<&'b Rational> for &'a Rational {
      type Output = Rational;

      fn $method(self, other: &'b Rational) -> Rational {
        Rational((&self.0).$method(&other.0))
      }
    }
  };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Rational {
  type Output = Rational;

  fn neg(self) -> Rational {
    Rational(-self.0)
  }
}

impl<'a> Neg for &'a Rational {
  type Output = Rational;

  fn neg(self) -> Rational {
    Rational(-&self.0)
  }
}

impl Sum for Rational {
  fn sum<I: Iterator<Item = Rational>>(iter: I) -> Self {
    iter.fold(Rational::zero(), |acc, x| acc + x)
  }
}

impl<'a> Sum<&'a Rational> for Rational {
  fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
    iter.fold(Rational::zero(), |acc, x| acc + x)
  }
}

impl fmt::Display for Rational {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0.is_integer() {
      write!(f, "{}", self.numer())
    } else {
      write!(f, "{}/{}", self.numer(), self.denom())
    }
  }
}

impl FromStr for Rational {
  type Err = EngineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    crate::literal::parse_rational(s)
  }
}

impl Serialize for Rational {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
