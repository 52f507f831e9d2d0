//! Gauss-Jordan elimination with a replayable step trace.
//!
//! [`reduce_to_rref`] walks the columns left to right with a pivot-row
//! cursor. Each elementary operation is recorded as a [`Step`] holding the
//! matrix it produced, so a presentation layer can replay the reduction
//! one operation at a time.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::matrix::Matrix;
use crate::rational::Rational;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
  Initial,
  Swap,
  Scale,
  Eliminate,
  Final,
}

/// One row touched by an [`StepDescription::Eliminate`] step:
/// `R[row] -> R[row] - multiplier * R[pivot_row]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowMultiplier {
  pub row: usize,
  pub multiplier: Rational,
}

/// Structured operands of a step. Row and column indices are zero-based;
/// the `Display` impl uses one-based `R1, R2, ...` labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepDescription {
  Initial,
  Swap {
    first: usize,
    second: usize,
  },
  Scale {
    row: usize,
    factor: Rational,
  },
  Eliminate {
    pivot_row: usize,
    pivot_column: usize,
    rows: Vec<RowMultiplier>,
  },
  Final {
    rank: usize,
  },
}

impl StepDescription {
  pub fn kind(&self) -> OperationKind {
    match self {
      StepDescription::Initial => OperationKind::Initial,
      StepDescription::Swap { .. } => OperationKind::Swap,
      StepDescription::Scale { .. } => OperationKind::Scale,
      StepDescription::Eliminate { .. } => OperationKind::Eliminate,
      StepDescription::Final { .. } => OperationKind::Final,
    }
  }
}

impl fmt::Display for StepDescription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepDescription::Initial => write!(f, "Initial matrix"),
      StepDescription::Swap { first, second } => {
        write!(f, "R{} <-> R{}", first + 1, second + 1)
      }
      StepDescription::Scale { row, factor } => {
        write!(f, "R{} -> {} * R{}", row + 1, factor, row + 1)
      }
      StepDescription::Eliminate {
        pivot_row, rows, ..
      } => {
        let parts: Vec<String> = rows
          .iter()
          .map(|RowMultiplier { row, multiplier }| {
            let sign = if multiplier.is_negative() { "+" } else { "-" };
            let magnitude = multiplier.abs();
            let (r, p) = (row + 1, pivot_row + 1);
            if magnitude.is_one() {
              format!("R{r} -> R{r} {sign} R{p}")
            } else {
              format!("R{r} -> R{r} {sign} {magnitude} * R{p}")
            }
          })
          .collect();
        write!(f, "{}", parts.join("; "))
      }
      StepDescription::Final { rank } => {
        write!(f, "Reduced row-echelon form (rank {rank})")
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
  pub kind: OperationKind,
  pub description: StepDescription,
  pub matrix: Matrix,
  pub highlighted_rows: BTreeSet<usize>,
}

impl Step {
  fn new(
    description: StepDescription,
    matrix: Matrix,
    highlighted_rows: BTreeSet<usize>,
  ) -> Self {
    trace!("{description}");
    Step {
      kind: description.kind(),
      description,
      matrix,
      highlighted_rows,
    }
  }
}

/// Strictly increasing pivot column indices, one per pivot row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PivotSet(Vec<usize>);

impl PivotSet {
  pub fn columns(&self) -> &[usize] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn contains(&self, column: usize) -> bool {
    self.0.binary_search(&column).is_ok()
  }

  /// Columns in `0..cols` without a pivot.
  pub fn free_columns(&self, cols: usize) -> Vec<usize> {
    (0..cols).filter(|c| !self.contains(*c)).collect()
  }
}

/// Ordered steps of one reduction. Always starts with an `Initial` step
/// and ends with a `Final` step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
  steps: Vec<Step>,
  pivots: PivotSet,
}

impl Trace {
  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn into_steps(self) -> Vec<Step> {
    self.steps
  }

  pub fn initial(&self) -> &Matrix {
    &self.steps[0].matrix
  }

  /// The reduced row-echelon form.
  pub fn final_matrix(&self) -> &Matrix {
    &self.steps[self.steps.len() - 1].matrix
  }

  pub fn pivots(&self) -> &PivotSet {
    &self.pivots
  }

  pub fn rank(&self) -> usize {
    self.pivots.len()
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }
}

/// Row-reduce `matrix` to reduced row-echelon form, recording every
/// elementary operation.
///
/// The first row at or below the cursor with a non-zero entry in the
/// current column becomes the pivot row (smallest index wins), so the trace
/// is identical for identical input.
pub fn reduce_to_rref(matrix: &Matrix) -> Trace {
  let (rows, cols) = matrix.shape();
  debug!("reducing {rows}x{cols} matrix");

  let mut steps = vec![Step::new(
    StepDescription::Initial,
    matrix.clone(),
    BTreeSet::new(),
  )];
  let mut current = matrix.clone();
  let mut pivots = Vec::new();
  let mut cursor = 0;

  for col in 0..cols {
    if cursor >= rows {
      break;
    }
    let Some(found) = (cursor..rows).find(|&r| !current.get(r, col).is_zero())
    else {
      continue;
    };

    if found != cursor {
      current = current.with_rows_swapped(cursor, found);
      steps.push(Step::new(
        StepDescription::Swap {
          first: cursor,
          second: found,
        },
        current.clone(),
        BTreeSet::from([cursor, found]),
      ));
    }

    let factor = current.get(cursor, col).recip_nonzero();
    current = current.with_row_scaled(cursor, factor.clone());
    steps.push(Step::new(
      StepDescription::Scale {
        row: cursor,
        factor,
      },
      current.clone(),
      BTreeSet::from([cursor]),
    ));

    let targets: Vec<RowMultiplier> = (0..rows)
      .filter(|&r| r != cursor)
      .map(|r| RowMultiplier {
        row: r,
        multiplier: current.get(r, col).clone(),
      })
      .filter(|m| !m.multiplier.is_zero())
      .collect();
    if !targets.is_empty() {
      for RowMultiplier { row, multiplier } in &targets {
        current = current.with_row_added(*row, cursor, -multiplier);
      }
      let highlighted = targets.iter().map(|m| m.row).collect();
      steps.push(Step::new(
        StepDescription::Eliminate {
          pivot_row: cursor,
          pivot_column: col,
          rows: targets,
        },
        current.clone(),
        highlighted,
      ));
    }

    pivots.push(col);
    cursor += 1;
  }

  let rank = pivots.len();
  steps.push(Step::new(
    StepDescription::Final { rank },
    current,
    (0..rank).collect(),
  ));
  debug!("rank {rank}, pivot columns {pivots:?}, {} steps", steps.len());

  Trace {
    steps,
    pivots: PivotSet(pivots),
  }
}

/// Pivot columns of a matrix already in RREF: the first non-zero entry of
/// each non-zero row.
pub fn pivot_indices(rref: &Matrix) -> PivotSet {
  PivotSet(
    rref
      .row_vectors()
      .iter()
      .filter_map(|row| row.iter().position(|x| !x.is_zero()))
      .collect(),
  )
}

pub fn rank(matrix: &Matrix) -> usize {
  reduce_to_rref(matrix).rank()
}
