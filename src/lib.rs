//! Exact-rational linear algebra with replayable step traces.
//!
//! Every computation is a pure function from an immutable [`Matrix`] to an
//! immutable result. Row reduction, inversion and the characteristic
//! polynomial also return the ordered steps that produced the answer, so a
//! worked solution can be shown one operation at a time.

use thiserror::Error;

pub mod characteristic;
pub mod config;
pub mod determinant;
pub mod elimination;
pub mod literal;
pub mod matrix;
pub mod orthogonality;
pub mod rational;
pub mod subspace;
pub mod system;
pub mod workbench;

pub use characteristic::{
  characteristic_polynomial, eigenspace_basis, Cell, CharacteristicReport,
  EigenStep, MatrixStyle, Polynomial,
};
pub use config::EngineConfig;
pub use determinant::{
  cofactor_expansion, determinant, inverse, CofactorTerm, InverseOutcome,
};
pub use elimination::{
  pivot_indices, rank, reduce_to_rref, OperationKind, PivotSet,
  RowMultiplier, Step, StepDescription, Trace,
};
pub use literal::{parse_cell_lenient, parse_matrix, parse_vector, Rule};
pub use matrix::Matrix;
pub use orthogonality::{
  analyze as analyze_orthogonality, check_orthogonal_set, projection,
  OrthoStep, OrthogonalityReport, VectorName,
};
pub use rational::Rational;
pub use subspace::{
  column_space_basis, left_null_space_basis, null_space_basis,
  row_space_basis, subspaces, SubspaceReport,
};
pub use system::{solve_system, Solution, SystemReport};
pub use workbench::{recompute, Results};

#[derive(Error, Debug)]
pub enum EngineError {
  #[error("Shape mismatch: {0}")]
  ShapeMismatch(String),
  #[error("Matrix is not square ({rows}x{cols})")]
  NotSquare { rows: usize, cols: usize },
  #[error("Unsupported size: {0}x{0} (only 2x2 and 3x3 are supported)")]
  UnsupportedSize(usize),
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Zero vector has no direction")]
  ZeroVector,
  #[error("Empty matrix or vector")]
  EmptyMatrix,
  #[error("Matrix is {rows}x{cols}, the limit is {max}x{max}")]
  DimensionTooLarge { rows: usize, cols: usize, max: usize },
  #[error("Invalid literal: {0}")]
  InvalidLiteral(String),
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}
