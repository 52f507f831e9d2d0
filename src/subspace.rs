//! Bases for the four fundamental subspaces.

use log::debug;
use serde::Serialize;

use crate::elimination::{reduce_to_rref, PivotSet};
use crate::matrix::Matrix;
use crate::rational::Rational;

/// Columns of the original (unreduced) matrix at the pivot positions.
pub fn column_space_basis(
  original: &Matrix,
  pivots: &PivotSet,
) -> Vec<Vec<Rational>> {
  pivots.columns().iter().map(|&c| original.column(c)).collect()
}

/// Non-zero rows of the RREF.
pub fn row_space_basis(rref: &Matrix) -> Vec<Vec<Rational>> {
  rref
    .row_vectors()
    .iter()
    .filter(|row| row.iter().any(|x| !x.is_zero()))
    .cloned()
    .collect()
}

/// One basis vector per free column of the RREF. Empty when every column
/// holds a pivot.
pub fn null_space_basis(
  rref: &Matrix,
  pivots: &PivotSet,
) -> Vec<Vec<Rational>> {
  let cols = rref.cols();
  pivots
    .free_columns(cols)
    .into_iter()
    .map(|free| {
      let mut v = vec![Rational::zero(); cols];
      v[free] = Rational::one();
      for (pivot_row, &p) in pivots.columns().iter().enumerate() {
        v[p] = -rref.get(pivot_row, free);
      }
      v
    })
    .collect()
}

/// Null space of the transpose, i.e. all `y` with `yᵀ A = 0`.
pub fn left_null_space_basis(original: &Matrix) -> Vec<Vec<Rational>> {
  let trace = reduce_to_rref(&original.transpose());
  null_space_basis(trace.final_matrix(), trace.pivots())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubspaceReport {
  pub rank: usize,
  pub nullity: usize,
  pub pivots: PivotSet,
  pub column_space: Vec<Vec<Rational>>,
  pub row_space: Vec<Vec<Rational>>,
  pub null_space: Vec<Vec<Rational>>,
  pub left_null_space: Vec<Vec<Rational>>,
}

pub fn subspaces(matrix: &Matrix) -> SubspaceReport {
  let trace = reduce_to_rref(matrix);
  let rref = trace.final_matrix();
  let pivots = trace.pivots().clone();
  let null_space = null_space_basis(rref, &pivots);
  let report = SubspaceReport {
    rank: pivots.len(),
    nullity: null_space.len(),
    column_space: column_space_basis(matrix, &pivots),
    row_space: row_space_basis(rref),
    null_space,
    left_null_space: left_null_space_basis(matrix),
    pivots,
  };
  debug!(
    "subspaces: rank {}, nullity {}, left nullity {}",
    report.rank,
    report.nullity,
    report.left_null_space.len()
  );
  report
}
