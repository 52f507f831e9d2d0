//! One synchronous recompute over every analysis the engine offers.
//!
//! Callers invoke [`recompute`] after each edit; nothing is cached between
//! calls.

use log::debug;
use serde::Serialize;

use crate::characteristic::{characteristic_polynomial, CharacteristicReport};
use crate::config::EngineConfig;
use crate::determinant::{determinant, inverse, InverseOutcome};
use crate::elimination::{reduce_to_rref, Trace};
use crate::matrix::Matrix;
use crate::orthogonality::{check_orthogonal_set, OrthoStep};
use crate::rational::Rational;
use crate::subspace::{subspaces, SubspaceReport};
use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
  pub rref: Trace,
  pub subspaces: SubspaceReport,
  /// `None` for non-square input.
  pub determinant: Option<Rational>,
  /// `None` for non-square input.
  pub inverse: Option<InverseOutcome>,
  /// `None` unless the input is 2x2 or 3x3.
  pub characteristic: Option<CharacteristicReport>,
  pub orthogonal_set: Vec<OrthoStep>,
}

pub fn recompute(
  matrix: &Matrix,
  config: &EngineConfig,
) -> Result<Results, EngineError> {
  config.ensure_within_bounds(matrix)?;
  let (rows, cols) = matrix.shape();
  debug!("recompute for {rows}x{cols} matrix");

  let (det, inv) = if matrix.is_square() {
    (Some(determinant(matrix)?), Some(inverse(matrix)?))
  } else {
    (None, None)
  };
  let characteristic = if matrix.is_square() && (rows == 2 || rows == 3) {
    Some(characteristic_polynomial(matrix)?)
  } else {
    None
  };

  Ok(Results {
    rref: reduce_to_rref(matrix),
    subspaces: subspaces(matrix),
    determinant: det,
    inverse: inv,
    characteristic,
    orthogonal_set: check_orthogonal_set(matrix),
  })
}
