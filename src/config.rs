//! Engine configuration.

use std::env;

use serde::Serialize;

use crate::matrix::Matrix;
use crate::EngineError;

pub const MAX_DIMENSION_VAR: &str = "LINWORK_MAX_DIMENSION";
pub const DISPLAY_DECIMALS_VAR: &str = "LINWORK_DISPLAY_DECIMALS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
  /// Largest row or column count accepted by the bounded entry points.
  pub max_dimension: usize,
  /// Decimal places used when showing floating-point roots and angles.
  pub display_decimals: usize,
}

impl Default for EngineConfig {
  fn default() -> Self {
    EngineConfig {
      max_dimension: 10,
      display_decimals: 4,
    }
  }
}

fn read_var(name: &str) -> Result<Option<usize>, EngineError> {
  match env::var(name) {
    Ok(value) => value
      .trim()
      .parse::<usize>()
      .map(Some)
      .map_err(|_| EngineError::InvalidConfig(format!("{name}={value}"))),
    Err(_) => Ok(None),
  }
}

impl EngineConfig {
  /// Defaults overridden by `LINWORK_MAX_DIMENSION` and
  /// `LINWORK_DISPLAY_DECIMALS`.
  pub fn from_env() -> Result<Self, EngineError> {
    let mut config = Self::default();
    if let Some(max) = read_var(MAX_DIMENSION_VAR)? {
      if max == 0 {
        return Err(EngineError::InvalidConfig(format!(
          "{MAX_DIMENSION_VAR} must be positive"
        )));
      }
      config.max_dimension = max;
    }
    if let Some(decimals) = read_var(DISPLAY_DECIMALS_VAR)? {
      config.display_decimals = decimals;
    }
    Ok(config)
  }

  pub fn ensure_within_bounds(
    &self,
    matrix: &Matrix,
  ) -> Result<(), EngineError> {
    let (rows, cols) = matrix.shape();
    if rows > self.max_dimension || cols > self.max_dimension {
      return Err(EngineError::DimensionTooLarge {
        rows,
        cols,
        max: self.max_dimension,
      });
    }
    Ok(())
  }
}
