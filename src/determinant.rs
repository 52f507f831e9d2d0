//! Determinants by cofactor expansion and inverses by Gauss-Jordan
//! elimination on `[A | I]`.

use log::debug;
use serde::Serialize;

use crate::elimination::{reduce_to_rref, Trace};
use crate::matrix::Matrix;
use crate::rational::Rational;
use crate::EngineError;

fn ensure_square(matrix: &Matrix) -> Result<usize, EngineError> {
  let (rows, cols) = matrix.shape();
  if rows != cols {
    return Err(EngineError::NotSquare { rows, cols });
  }
  Ok(rows)
}

/// Determinant of a square matrix by expansion along the first row.
pub fn determinant(matrix: &Matrix) -> Result<Rational, EngineError> {
  ensure_square(matrix)?;
  Ok(expand(matrix))
}

/// Widest matrix expanded by cofactors; the memo holds `2^n` minors.
const MAX_EXPANSION_SIZE: usize = 20;

fn expand(matrix: &Matrix) -> Rational {
  let n = matrix.rows();
  if n > MAX_EXPANSION_SIZE {
    debug!("{n}x{n} determinant by elimination");
    return by_elimination(matrix);
  }
  let all = (1_usize << n) - 1;
  let mut memo = vec![None; all + 1];
  minor_determinant(matrix, all, &mut memo)
}

/// Determinant of the minor formed by the bottom `popcount(columns)` rows
/// and the columns set in `columns`, expanded along its own top row.
///
/// Expanding row by row from the top, a minor depends only on which columns
/// it keeps, so each one is computed once and cached under its column mask.
fn minor_determinant(
  matrix: &Matrix,
  columns: usize,
  memo: &mut [Option<Rational>],
) -> Rational {
  if let Some(known) = &memo[columns] {
    return known.clone();
  }
  let n = matrix.rows();
  let size = columns.count_ones() as usize;
  let row = n - size;
  let kept: Vec<usize> =
    (0..n).filter(|&j| columns & (1_usize << j) != 0).collect();

  let det = match kept.as_slice() {
    [] => Rational::one(),
    [j] => matrix.get(row, *j).clone(),
    [j, k] => {
      matrix.get(row, *j) * matrix.get(row + 1, *k)
        - matrix.get(row, *k) * matrix.get(row + 1, *j)
    }
    _ => {
      let mut det = Rational::zero();
      for (position, &j) in kept.iter().enumerate() {
        let entry = matrix.get(row, j);
        // A zero entry contributes nothing; skip its minor.
        if entry.is_zero() {
          continue;
        }
        let cofactor =
          entry * minor_determinant(matrix, columns & !(1_usize << j), memo);
        if position % 2 == 0 {
          det = det + cofactor;
        } else {
          det = det - cofactor;
        }
      }
      det
    }
  };
  memo[columns] = Some(det.clone());
  det
}

/// Product of the pivots of forward elimination, negated once per row swap.
fn by_elimination(matrix: &Matrix) -> Rational {
  let n = matrix.rows();
  let mut rows = matrix.row_vectors().to_vec();
  let mut det = Rational::one();
  for col in 0..n {
    let Some(found) = (col..n).find(|&r| !rows[r][col].is_zero()) else {
      return Rational::zero();
    };
    if found != col {
      rows.swap(found, col);
      det = -det;
    }
    let pivot = rows[col][col].clone();
    let inverse = pivot.recip_nonzero();
    let source = rows[col].clone();
    for row in rows.iter_mut().skip(col + 1) {
      if row[col].is_zero() {
        continue;
      }
      let factor = &row[col] * &inverse;
      for (x, s) in row.iter_mut().zip(&source).skip(col) {
        *x = &*x - &factor * s;
      }
    }
    det = det * pivot;
  }
  det
}

/// One signed term `(-1)^j * a[0][j] * det(M_0j)` of a first-row expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CofactorTerm {
  pub column: usize,
  pub sign: i32,
  pub entry: Rational,
  pub minor: Matrix,
  pub minor_determinant: Rational,
  pub contribution: Rational,
}

/// The terms of the first-row cofactor expansion, for worked solutions.
/// Empty for a 1x1 matrix.
pub fn cofactor_expansion(
  matrix: &Matrix,
) -> Result<Vec<CofactorTerm>, EngineError> {
  let n = ensure_square(matrix)?;
  if n == 1 {
    return Ok(Vec::new());
  }
  (0..n)
    .map(|j| {
      let minor = matrix.minor(0, j)?;
      let minor_determinant = expand(&minor);
      let sign: i32 = if j % 2 == 0 { 1 } else { -1 };
      let entry = matrix.get(0, j).clone();
      let contribution =
        Rational::from_integer(sign.into()) * &entry * &minor_determinant;
      Ok(CofactorTerm {
        column: j,
        sign,
        entry,
        minor,
        minor_determinant,
        contribution,
      })
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InverseOutcome {
  Invertible { inverse: Matrix, trace: Trace },
  Singular { trace: Trace },
}

impl InverseOutcome {
  pub fn inverse(&self) -> Option<&Matrix> {
    match self {
      InverseOutcome::Invertible { inverse, .. } => Some(inverse),
      InverseOutcome::Singular { .. } => None,
    }
  }

  pub fn trace(&self) -> &Trace {
    match self {
      InverseOutcome::Invertible { trace, .. }
      | InverseOutcome::Singular { trace } => trace,
    }
  }

  pub fn is_singular(&self) -> bool {
    matches!(self, InverseOutcome::Singular { .. })
  }
}

/// Reduce `[A | I]`; the right block is the inverse exactly when the left
/// block reduces to the identity.
pub fn inverse(matrix: &Matrix) -> Result<InverseOutcome, EngineError> {
  let n = ensure_square(matrix)?;
  let augmented = matrix.augment(&Matrix::identity(n)?)?;
  let trace = reduce_to_rref(&augmented);
  let rref = trace.final_matrix();

  if !rref.submatrix(0..n, 0..n)?.is_identity() {
    debug!("{n}x{n} matrix is singular");
    return Ok(InverseOutcome::Singular { trace });
  }
  let inverse = rref.submatrix(0..n, n..2 * n)?;
  debug!("inverted {n}x{n} matrix in {} steps", trace.len());
  Ok(InverseOutcome::Invertible { inverse, trace })
}
