//! Text literals for rationals, vectors and matrices.
//!
//! Accepted forms:
//!
//! - rational: `3`, `-2/5`, `0.25`, `.5`, `+7.`
//! - vector: `[1, 2, 3]` or `1, 2, 3`
//! - matrix: `[[1, 2], [3, 4]]` or `1, 2; 3, 4`

use num_bigint::BigInt;
use num_traits::Zero;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::matrix::Matrix;
use crate::rational::Rational;
use crate::EngineError;

#[derive(Parser)]
#[grammar = "literal.pest"]
pub struct LiteralParser;

fn parse_digits(digits: &str) -> Result<BigInt, EngineError> {
  digits.parse::<BigInt>().map_err(|_| {
    EngineError::InvalidLiteral(format!("{digits} is not a number"))
  })
}

fn decimal_to_rational(text: &str) -> Result<Rational, EngineError> {
  let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
  let scale = num_traits::pow(BigInt::from(10), frac_part.len());
  let whole = if int_part.is_empty() {
    BigInt::zero()
  } else {
    parse_digits(int_part)?
  };
  let frac = if frac_part.is_empty() {
    BigInt::zero()
  } else {
    parse_digits(frac_part)?
  };
  Rational::from_parts(whole * &scale + frac, scale)
}

/// Convert a `Number` pair into a reduced rational.
fn number_from_pair(pair: Pair<Rule>) -> Result<Rational, EngineError> {
  let mut negative = false;
  let mut value = Rational::zero();
  for inner in pair.into_inner() {
    match inner.as_rule() {
      Rule::Sign => negative = inner.as_str() == "-",
      Rule::Integer => {
        value = Rational::from_bigint(parse_digits(inner.as_str())?);
      }
      Rule::Decimal => value = decimal_to_rational(inner.as_str())?,
      Rule::Fraction => {
        let mut parts = inner.into_inner();
        let numer = parts.next().map(|p| p.as_str()).unwrap_or("0");
        let denom = parts.next().map(|p| p.as_str()).unwrap_or("1");
        value =
          Rational::from_parts(parse_digits(numer)?, parse_digits(denom)?)?;
      }
      _ => {}
    }
  }
  Ok(if negative { -value } else { value })
}

fn row_from_pair(pair: Pair<Rule>) -> Result<Vec<Rational>, EngineError> {
  pair
    .into_inner()
    .filter(|p| p.as_rule() == Rule::Number)
    .map(number_from_pair)
    .collect()
}

pub fn parse_rational(input: &str) -> Result<Rational, EngineError> {
  let literal = LiteralParser::parse(Rule::RationalLiteral, input.trim())
    .map_err(Box::new)?
    .next()
    .ok_or(EngineError::EmptyMatrix)?;
  literal
    .into_inner()
    .find(|p| p.as_rule() == Rule::Number)
    .map(number_from_pair)
    .unwrap_or_else(|| Ok(Rational::zero()))
}

pub fn parse_vector(input: &str) -> Result<Vec<Rational>, EngineError> {
  let literal = LiteralParser::parse(Rule::VectorLiteral, input.trim())
    .map_err(Box::new)?
    .next()
    .ok_or(EngineError::EmptyMatrix)?;
  for pair in literal.into_inner() {
    if matches!(pair.as_rule(), Rule::BracketedRow | Rule::FlatRow) {
      return row_from_pair(pair);
    }
  }
  Err(EngineError::EmptyMatrix)
}

pub fn parse_matrix(input: &str) -> Result<Matrix, EngineError> {
  let literal = LiteralParser::parse(Rule::MatrixLiteral, input.trim())
    .map_err(Box::new)?
    .next()
    .ok_or(EngineError::EmptyMatrix)?;
  let mut rows = Vec::new();
  for pair in literal.into_inner() {
    if matches!(pair.as_rule(), Rule::BracketedMatrix | Rule::CompactMatrix) {
      for row in pair.into_inner() {
        rows.push(row_from_pair(row)?);
      }
    }
  }
  Matrix::from_rows(rows)
}

/// Parse a user-entered cell, falling back to `0/1` for anything that is
/// not a valid literal (blank cells, stray text, zero denominators).
pub fn parse_cell_lenient(cell: &str) -> Rational {
  parse_rational(cell).unwrap_or_default()
}
