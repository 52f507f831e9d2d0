//! Linear systems `Ax = b` solved by reducing `[A | b]`.

use log::debug;
use serde::Serialize;

use crate::elimination::{pivot_indices, reduce_to_rref, Trace};
use crate::matrix::Matrix;
use crate::rational::Rational;
use crate::subspace::null_space_basis;
use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Solution {
  Unique(Vec<Rational>),
  /// `particular + Σ tᵢ directionsᵢ` for any scalars `tᵢ`.
  Infinite {
    particular: Vec<Rational>,
    directions: Vec<Vec<Rational>>,
  },
  Inconsistent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemReport {
  pub solution: Solution,
  pub trace: Trace,
}

pub fn solve_system(
  a: &Matrix,
  b: &[Rational],
) -> Result<SystemReport, EngineError> {
  let (rows, cols) = a.shape();
  if b.len() != rows {
    return Err(EngineError::ShapeMismatch(format!(
      "right-hand side has {} entries, the matrix has {} rows",
      b.len(),
      rows
    )));
  }
  let trace = reduce_to_rref(&a.augment(&Matrix::column_vector(b)?)?);
  let rref = trace.final_matrix();

  // A pivot in the augmented column means a row 0 = c with c != 0.
  if trace.pivots().contains(cols) {
    debug!("system is inconsistent");
    return Ok(SystemReport {
      solution: Solution::Inconsistent,
      trace,
    });
  }

  let coefficients = rref.submatrix(0..rows, 0..cols)?;
  let pivots = pivot_indices(&coefficients);
  let mut particular = vec![Rational::zero(); cols];
  for (pivot_row, &p) in pivots.columns().iter().enumerate() {
    particular[p] = rref.get(pivot_row, cols).clone();
  }
  let directions = null_space_basis(&coefficients, &pivots);
  debug!("system solved with {} free variables", directions.len());

  let solution = if directions.is_empty() {
    Solution::Unique(particular)
  } else {
    Solution::Infinite {
      particular,
      directions,
    }
  };
  Ok(SystemReport { solution, trace })
}
