//! Dot products, norms, angles and orthogonality checks.

use log::debug;
use serde::Serialize;

use crate::matrix::{dot, Matrix};
use crate::rational::Rational;
use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VectorName {
  U,
  V,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OrthoStep {
  /// `Σ uᵢvᵢ` with the individual products.
  DotProduct {
    products: Vec<Rational>,
    value: Rational,
  },
  SquaredNorm {
    vector: VectorName,
    value: Rational,
  },
  /// `‖x‖`; `exact` is set when the squared norm is a perfect square.
  Norm {
    vector: VectorName,
    squared: Rational,
    exact: Option<Rational>,
    value: f64,
  },
  Cosine {
    dot: Rational,
    norm_product: f64,
    value: f64,
  },
  Angle {
    radians: f64,
    degrees: f64,
  },
  Verdict {
    orthogonal: bool,
  },
  /// One unordered column pair of an orthogonal-set check.
  PairCheck {
    first: usize,
    second: usize,
    dot: Rational,
    orthogonal: bool,
  },
  SetVerdict {
    orthogonal: bool,
    pairs_checked: usize,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrthogonalityReport {
  pub steps: Vec<OrthoStep>,
  pub dot: Rational,
  pub cosine: f64,
  pub orthogonal: bool,
}

fn ensure_same_length(
  u: &[Rational],
  v: &[Rational],
) -> Result<(), EngineError> {
  if u.is_empty() || v.is_empty() {
    return Err(EngineError::EmptyMatrix);
  }
  if u.len() != v.len() {
    return Err(EngineError::ShapeMismatch(format!(
      "vectors of length {} and {}",
      u.len(),
      v.len()
    )));
  }
  Ok(())
}

fn norm_step(vector: VectorName, squared: Rational) -> OrthoStep {
  OrthoStep::Norm {
    vector,
    exact: squared.exact_sqrt(),
    value: squared.to_f64().sqrt(),
    squared,
  }
}

/// Derive `u · v`, both norms, the angle between `u` and `v` and whether
/// they are orthogonal.
pub fn analyze(
  u: &[Rational],
  v: &[Rational],
) -> Result<OrthogonalityReport, EngineError> {
  ensure_same_length(u, v)?;
  let products: Vec<Rational> = u.iter().zip(v).map(|(a, b)| a * b).collect();
  let dot_value: Rational = products.iter().sum();
  let u_squared = dot(u, u);
  let v_squared = dot(v, v);

  if u_squared.is_zero() || v_squared.is_zero() {
    return Err(EngineError::ZeroVector);
  }

  let norm_product = u_squared.to_f64().sqrt() * v_squared.to_f64().sqrt();
  let cosine = (dot_value.to_f64() / norm_product).clamp(-1.0, 1.0);
  let radians = cosine.acos();
  let orthogonal = dot_value.is_zero();
  debug!("u · v = {dot_value}, orthogonal: {orthogonal}");

  let steps = vec![
    OrthoStep::DotProduct {
      products,
      value: dot_value.clone(),
    },
    OrthoStep::SquaredNorm {
      vector: VectorName::U,
      value: u_squared.clone(),
    },
    norm_step(VectorName::U, u_squared),
    OrthoStep::SquaredNorm {
      vector: VectorName::V,
      value: v_squared.clone(),
    },
    norm_step(VectorName::V, v_squared),
    OrthoStep::Cosine {
      dot: dot_value.clone(),
      norm_product,
      value: cosine,
    },
    OrthoStep::Angle {
      radians,
      degrees: radians.to_degrees(),
    },
    OrthoStep::Verdict { orthogonal },
  ];

  Ok(OrthogonalityReport {
    steps,
    dot: dot_value,
    cosine,
    orthogonal,
  })
}

/// Check every unordered pair of columns, stopping at the first pair with a
/// non-zero dot product.
pub fn check_orthogonal_set(matrix: &Matrix) -> Vec<OrthoStep> {
  let columns: Vec<Vec<Rational>> =
    (0..matrix.cols()).map(|j| matrix.column(j)).collect();
  let mut steps = Vec::new();

  for i in 0..columns.len() {
    for j in i + 1..columns.len() {
      let value = dot(&columns[i], &columns[j]);
      let orthogonal = value.is_zero();
      steps.push(OrthoStep::PairCheck {
        first: i,
        second: j,
        dot: value,
        orthogonal,
      });
      if !orthogonal {
        debug!("columns {i} and {j} are not orthogonal");
        let pairs_checked = steps.len();
        steps.push(OrthoStep::SetVerdict {
          orthogonal: false,
          pairs_checked,
        });
        return steps;
      }
    }
  }

  let pairs_checked = steps.len();
  steps.push(OrthoStep::SetVerdict {
    orthogonal: true,
    pairs_checked,
  });
  steps
}

/// Exact projection of `u` onto `v`: `(u·v / v·v) v`.
pub fn projection(
  u: &[Rational],
  v: &[Rational],
) -> Result<Vec<Rational>, EngineError> {
  ensure_same_length(u, v)?;
  let v_squared = dot(v, v);
  if v_squared.is_zero() {
    return Err(EngineError::ZeroVector);
  }
  let coefficient = dot(u, v).checked_div(&v_squared)?;
  Ok(v.iter().map(|x| &coefficient * x).collect())
}
