//! Rectangular matrices of exact rationals.
//!
//! A [`Matrix`] is never mutated after construction: every operation,
//! including the elementary row operations used by the elimination
//! engine, returns a new value.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::literal::parse_cell_lenient;
use crate::rational::Rational;
use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Matrix {
  rows: Vec<Vec<Rational>>,
}

impl Matrix {
  /// Build a matrix from row vectors. Rejects empty input and ragged rows.
  pub fn from_rows(rows: Vec<Vec<Rational>>) -> Result<Self, EngineError> {
    let ncols = match rows.first() {
      Some(first) if !first.is_empty() => first.len(),
      _ => return Err(EngineError::EmptyMatrix),
    };
    if let Some((i, row)) =
      rows.iter().enumerate().find(|(_, r)| r.len() != ncols)
    {
      return Err(EngineError::ShapeMismatch(format!(
        "row {} has {} entries, expected {}",
        i + 1,
        row.len(),
        ncols
      )));
    }
    Ok(Matrix { rows })
  }

  pub fn from_integers<R: AsRef<[i64]>>(
    rows: &[R],
  ) -> Result<Self, EngineError> {
    Self::from_rows(
      rows
        .iter()
        .map(|r| r.as_ref().iter().map(|&x| Rational::from(x)).collect())
        .collect(),
    )
  }

  /// Build a matrix from raw user-entered cell strings. Unparsable cells
  /// become zero.
  pub fn from_cells<S: AsRef<str>>(
    cells: &[Vec<S>],
  ) -> Result<Self, EngineError> {
    Self::from_rows(
      cells
        .iter()
        .map(|r| r.iter().map(|c| parse_cell_lenient(c.as_ref())).collect())
        .collect(),
    )
  }

  /// Build a single-column matrix from a vector.
  pub fn column_vector(entries: &[Rational]) -> Result<Self, EngineError> {
    Self::from_rows(entries.iter().map(|x| vec![x.clone()]).collect())
  }

  /// Internal constructor for shapes already known to be valid.
  fn from_rows_unchecked(rows: Vec<Vec<Rational>>) -> Self {
    debug_assert!(!rows.is_empty() && !rows[0].is_empty());
    Matrix { rows }
  }

  pub fn zeros(rows: usize, cols: usize) -> Result<Self, EngineError> {
    Self::from_rows(vec![vec![Rational::zero(); cols]; rows])
  }

  pub fn identity(n: usize) -> Result<Self, EngineError> {
    if n == 0 {
      return Err(EngineError::EmptyMatrix);
    }
    Ok(Self::from_rows_unchecked(
      (0..n)
        .map(|i| {
          (0..n)
            .map(|j| if i == j {
                Rational::one()
              } else {
                Rational::zero()
              })
            .collect()
        })
        .collect(),
    ))
  }

  pub fn rows(&self) -> usize {
    self.rows.len()
  }

  pub fn cols(&self) -> usize {
    self.rows[0].len()
  }

  pub fn shape(&self) -> (usize, usize) {
    (self.rows(), self.cols())
  }

  pub fn get(&self, row: usize, col: usize) -> &Rational {
    &self.rows[row][col]
  }

  pub fn row(&self, i: usize) -> &[Rational] {
    &self.rows[i]
  }

  pub fn column(&self, j: usize) -> Vec<Rational> {
    self.rows.iter().map(|r| r[j].clone()).collect()
  }

  pub fn row_vectors(&self) -> &[Vec<Rational>] {
    &self.rows
  }

  pub fn is_square(&self) -> bool {
    self.rows() == self.cols()
  }

  pub fn is_zero(&self) -> bool {
    self.rows.iter().flatten().all(Rational::is_zero)
  }

  pub fn is_identity(&self) -> bool {
    self.is_square()
      && self.rows.iter().enumerate().all(|(i, row)| {
        row.iter().enumerate().all(|(j, x)| {
          if i == j {
            x.is_one()
          } else {
            x.is_zero()
          }
        })
      })
  }

  pub fn transpose(&self) -> Matrix {
    Self::from_rows_unchecked(
      (0..self.cols()).map(|j| self.column(j)).collect(),
    )
  }

  /// Horizontal concatenation `[self | other]`.
  pub fn augment(&self, other: &Matrix) -> Result<Matrix, EngineError> {
    if self.rows() != other.rows() {
      return Err(EngineError::ShapeMismatch(format!(
        "cannot augment a matrix with {} rows by one with {} rows",
        self.rows(),
        other.rows()
      )));
    }
    Ok(Self::from_rows_unchecked(
      self
        .rows
        .iter()
        .zip(&other.rows)
        .map(|(a, b)| a.iter().chain(b).cloned().collect())
        .collect(),
    ))
  }

  pub fn submatrix(
    &self,
    rows: Range<usize>,
    cols: Range<usize>,
  ) -> Result<Matrix, EngineError> {
    if rows.end > self.rows() || cols.end > self.cols() {
      return Err(EngineError::ShapeMismatch(format!(
        "block {}..{} x {}..{} lies outside a {}x{} matrix",
        rows.start,
        rows.end,
        cols.start,
        cols.end,
        self.rows(),
        self.cols()
      )));
    }
    Self::from_rows(
      self.rows[rows]
        .iter()
        .map(|r| r[cols.clone()].to_vec())
        .collect(),
    )
  }

  /// The matrix with row `row` and column `col` removed.
  pub fn minor(&self, row: usize, col: usize) -> Result<Matrix, EngineError> {
    Self::from_rows(
      self
        .rows
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != row)
        .map(|(_, r)| {
          r.iter()
            .enumerate()
            .filter(|(j, _)| *j != col)
            .map(|(_, x)| x.clone())
            .collect()
        })
        .collect(),
    )
  }

  pub fn multiply(&self, other: &Matrix) -> Result<Matrix, EngineError> {
    if self.cols() != other.rows() {
      return Err(EngineError::ShapeMismatch(format!(
        "cannot multiply {}x{} by {}x{}",
        self.rows(),
        self.cols(),
        other.rows(),
        other.cols()
      )));
    }
    Ok(Self::from_rows_unchecked(
      self
        .rows
        .iter()
        .map(|row| {
          (0..other.cols())
            .map(|j| {
              row
                .iter()
                .zip(&other.rows)
                .map(|(a, b_row)| a * &b_row[j])
                .sum()
            })
            .collect()
        })
        .collect(),
    ))
  }

  /// Matrix-vector product `A v`.
  pub fn apply(&self, v: &[Rational]) -> Result<Vec<Rational>, EngineError> {
    if v.len() != self.cols() {
      return Err(EngineError::ShapeMismatch(format!(
        "vector of length {} does not fit a matrix with {} columns",
        v.len(),
        self.cols()
      )));
    }
    Ok(self.rows.iter().map(|row| dot(row, v)).collect())
  }

  pub fn with_rows_swapped(&self, a: usize, b: usize) -> Matrix {
    let mut rows = self.rows.clone();
    rows.swap(a, b);
    Self::from_rows_unchecked(rows)
  }

  /// Row `row` multiplied by `factor`.
  pub fn with_row_scaled(&self, row: usize, factor: Rational) -> Matrix {
    let mut rows = self.rows.clone();
    for x in rows[row].iter_mut() {
      *x = &*x * &factor;
    }
    Self::from_rows_unchecked(rows)
  }

  /// Row `target` replaced by `target + factor * source`.
  pub fn with_row_added(
    &self,
    target: usize,
    source: usize,
    factor: Rational,
  ) -> Matrix {
    let mut rows = self.rows.clone();
    let source_row = self.rows[source].clone();
    for (x, s) in rows[target].iter_mut().zip(source_row) {
      *x = &*x + &factor * s;
    }
    Self::from_rows_unchecked(rows)
  }
}

/// Dot product of two equal-length slices.
pub fn dot(a: &[Rational], b: &[Rational]) -> Rational {
  a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl fmt::Display for Matrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let cells: Vec<Vec<String>> = self
      .rows
      .iter()
      .map(|r| r.iter().map(|x| x.to_string()).collect())
      .collect();
    let width = cells.iter().flatten().map(|s| s.len()).max().unwrap_or(1);
    for (i, row) in cells.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      let padded: Vec<String> =
        row.iter().map(|s| format!("{s:>width$}")).collect();
      write!(f, "[{}]", padded.join("  "))?;
    }
    Ok(())
  }
}
