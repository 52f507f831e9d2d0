//! Characteristic polynomials and real eigenvalues of 2x2 and 3x3
//! matrices.
//!
//! The derivation mirrors what a learner writes by hand: form `λI − A`,
//! expand its determinant, collect the coefficients and solve. Every stage
//! is recorded as an [`EigenStep`]. Coefficients stay exact; only the
//! irrational roots of the final polynomial are floating point.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use log::debug;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use serde::Serialize;

use crate::determinant::determinant;
use crate::elimination::reduce_to_rref;
use crate::matrix::Matrix;
use crate::rational::Rational;
use crate::subspace::null_space_basis;
use crate::EngineError;

pub const LAMBDA: &str = "λ";

/// Coefficients above this bound skip the exact rational-root search.
const RATIONAL_ROOT_SEARCH_LIMIT: u64 = 1_000_000_000;

/// A polynomial in λ with exact coefficients, lowest degree first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Polynomial {
  coefficients: Vec<Rational>,
}

impl Polynomial {
  pub fn new(mut coefficients: Vec<Rational>) -> Self {
    while coefficients.last().is_some_and(Rational::is_zero) {
      coefficients.pop();
    }
    Polynomial { coefficients }
  }

  pub fn constant(c: Rational) -> Self {
    Self::new(vec![c])
  }

  /// `λ − a`
  pub fn lambda_minus(a: Rational) -> Self {
    Self::new(vec![-a, Rational::one()])
  }

  /// `None` for the zero polynomial.
  pub fn degree(&self) -> Option<usize> {
    self.coefficients.len().checked_sub(1)
  }

  pub fn coefficients(&self) -> &[Rational] {
    &self.coefficients
  }

  pub fn coefficient(&self, power: usize) -> Rational {
    self
      .coefficients
      .get(power)
      .cloned()
      .unwrap_or_default()
  }

  pub fn eval(&self, x: &Rational) -> Rational {
    self
      .coefficients
      .iter()
      .rev()
      .fold(Rational::zero(), |acc, c| acc * x + c)
  }

  pub fn eval_f64(&self, x: f64) -> f64 {
    self
      .coefficients
      .iter()
      .rev()
      .fold(0.0, |acc, c| acc * x + c.to_f64())
  }

  /// Quotient by `(λ − root)`; the remainder is discarded.
  fn deflate(&self, root: &Rational) -> Polynomial {
    let Some(degree) = self.degree() else {
      return Polynomial::default();
    };
    let mut quotient = vec![Rational::zero(); degree];
    let mut carry = Rational::zero();
    for k in (1..=degree).rev() {
      carry = carry * root + &self.coefficients[k];
      quotient[k - 1] = carry.clone();
    }
    Polynomial::new(quotient)
  }
}

impl Add for &Polynomial {
  type Output = Polynomial;

  fn add(self, other: &Polynomial) -> Polynomial {
    let len = self.coefficients.len().max(other.coefficients.len());
    Polynomial::new(
      (0..len)
        .map(|k| self.coefficient(k) + other.coefficient(k))
        .collect(),
    )
  }
}

impl Neg for &Polynomial {
  type Output = Polynomial;

  fn neg(self) -> Polynomial {
    Polynomial::new(self.coefficients.iter().map(|c| -c).collect())
  }
}

impl Sub for &Polynomial {
  type Output = Polynomial;

  fn sub(self, other: &Polynomial) -> Polynomial {
    self + &(-other)
  }
}

impl Mul for &Polynomial {
  type Output = Polynomial;

  fn mul(self, other: &Polynomial) -> Polynomial {
    if self.coefficients.is_empty() || other.coefficients.is_empty() {
      return Polynomial::default();
    }
    let len = self.coefficients.len() + other.coefficients.len();
    let mut product = vec![Rational::zero(); len];
    for (i, a) in self.coefficients.iter().enumerate() {
      for (j, b) in other.coefficients.iter().enumerate() {
        product[i + j] = &product[i + j] + a * b;
      }
    }
    Polynomial::new(product)
  }
}

impl fmt::Display for Polynomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.coefficients.is_empty() {
      return write!(f, "0");
    }
    let mut first = true;
    for (power, c) in self.coefficients.iter().enumerate().rev() {
      if c.is_zero() {
        continue;
      }
      let magnitude = c.abs();
      if first {
        if c.is_negative() {
          write!(f, "-")?;
        }
      } else {
        write!(f, " {} ", if c.is_negative() { "-" } else { "+" })?;
      }
      first = false;
      let variable = match power {
        0 => String::new(),
        1 => LAMBDA.to_string(),
        p => format!("{LAMBDA}^{p}"),
      };
      if power == 0 {
        write!(f, "{magnitude}")?;
      } else if magnitude.is_one() {
        write!(f, "{variable}")?;
      } else if magnitude.is_integer() {
        write!(f, "{magnitude}{variable}")?;
      } else {
        write!(f, "({magnitude}){variable}")?;
      }
    }
    Ok(())
  }
}

/// A matrix cell that is either a known number or an expression in λ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
  Known(Rational),
  Symbolic(String),
}

impl Cell {
  fn from_polynomial(p: &Polynomial) -> Cell {
    match p.degree() {
      None => Cell::Known(Rational::zero()),
      Some(0) => Cell::Known(p.coefficient(0)),
      Some(_) => Cell::Symbolic(p.to_string()),
    }
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Cell::Known(x) => write!(f, "{x}"),
      Cell::Symbolic(s) => write!(f, "{s}"),
    }
  }
}

/// How a presentation layer should render an [`EigenStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatrixStyle {
  /// Bracketed matrix.
  Plain,
  /// Determinant bars around the matrix.
  Determinant,
  /// No matrix; show the polynomial.
  Polynomial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenStep {
  pub title: String,
  pub description: String,
  pub symbolic_matrix: Vec<Vec<Cell>>,
  pub style: MatrixStyle,
  pub polynomial: Option<Polynomial>,
  pub roots_so_far: Vec<f64>,
}

impl EigenStep {
  fn matrix(
    title: &str,
    description: String,
    cells: Vec<Vec<Cell>>,
    style: MatrixStyle,
  ) -> Self {
    EigenStep {
      title: title.to_string(),
      description,
      symbolic_matrix: cells,
      style,
      polynomial: None,
      roots_so_far: Vec::new(),
    }
  }

  fn polynomial(title: &str, description: String, p: &Polynomial) -> Self {
    EigenStep {
      title: title.to_string(),
      description,
      symbolic_matrix: Vec::new(),
      style: MatrixStyle::Polynomial,
      polynomial: Some(p.clone()),
      roots_so_far: Vec::new(),
    }
  }

  fn roots(title: &str, description: String, roots: &[f64]) -> Self {
    EigenStep {
      title: title.to_string(),
      description,
      symbolic_matrix: Vec::new(),
      style: MatrixStyle::Polynomial,
      polynomial: None,
      roots_so_far: roots.to_vec(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacteristicReport {
  pub steps: Vec<EigenStep>,
  pub polynomial: Polynomial,
  /// Real roots in ascending order, repeated by algebraic multiplicity.
  pub roots: Vec<f64>,
  /// The subset of `roots` that is known exactly, ascending.
  pub exact_roots: Vec<Rational>,
}

impl CharacteristicReport {
  pub fn has_real_roots(&self) -> bool {
    !self.roots.is_empty()
  }

  pub fn display_roots(&self, decimals: usize) -> Vec<String> {
    self
      .roots
      .iter()
      .map(|r| round_for_display(*r, decimals))
      .collect()
  }
}

/// Round for display, dropping trailing zeros (`2.5000` -> `2.5`).
pub fn round_for_display(x: f64, decimals: usize) -> String {
  let s = format!("{x:.decimals$}");
  let s = if s.contains('.') {
    s.trim_end_matches('0').trim_end_matches('.').to_string()
  } else {
    s
  };
  if s == "-0" {
    "0".to_string()
  } else {
    s
  }
}

/// `n / d` for a non-zero `d`.
fn ratio(n: i128, d: i128) -> Rational {
  Rational::from_integer(n) * Rational::from_integer(d).recip_nonzero()
}

fn lambda_matrix(matrix: &Matrix) -> Vec<Vec<Polynomial>> {
  (0..matrix.rows())
    .map(|i| {
      (0..matrix.cols())
        .map(|j| {
          if i == j {
            Polynomial::lambda_minus(matrix.get(i, j).clone())
          } else {
            Polynomial::constant(-matrix.get(i, j))
          }
        })
        .collect()
    })
    .collect()
}

fn to_cells(entries: &[Vec<Polynomial>]) -> Vec<Vec<Cell>> {
  entries
    .iter()
    .map(|row| row.iter().map(Cell::from_polynomial).collect())
    .collect()
}

fn det2(m: &[Vec<Polynomial>]) -> Polynomial {
  &(&m[0][0] * &m[1][1]) - &(&m[0][1] * &m[1][0])
}

fn poly_minor(m: &[Vec<Polynomial>], col: usize) -> Vec<Vec<Polynomial>> {
  m[1..]
    .iter()
    .map(|row| {
      row
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != col)
        .map(|(_, p)| p.clone())
        .collect()
    })
    .collect()
}

fn trace_of(matrix: &Matrix) -> Rational {
  (0..matrix.rows()).map(|i| matrix.get(i, i)).sum()
}

fn sorted(mut roots: Vec<f64>) -> Vec<f64> {
  roots.sort_by(|a, b| a.total_cmp(b));
  roots
}

/// Build `det(λI − A)` step by step and find its real roots.
///
/// Only 2x2 and 3x3 matrices are supported.
pub fn characteristic_polynomial(
  matrix: &Matrix,
) -> Result<CharacteristicReport, EngineError> {
  let (rows, cols) = matrix.shape();
  if rows != cols {
    return Err(EngineError::NotSquare { rows, cols });
  }
  let entries = lambda_matrix(matrix);
  let cells = to_cells(&entries);
  let mut steps = vec![EigenStep::matrix(
    "Form λI − A",
    "Subtract A from λI: diagonal entries become λ − aᵢᵢ, the others \
     change sign"
      .to_string(),
    cells.clone(),
    MatrixStyle::Plain,
  )];

  let report = match rows {
    2 => characteristic_2x2(matrix, &entries, cells, steps)?,
    3 => {
      steps.push(EigenStep::matrix(
        "Take the determinant",
        "Expand det(λI − A) along the first row".to_string(),
        cells,
        MatrixStyle::Determinant,
      ));
      characteristic_3x3(matrix, &entries, steps)?
    }
    n => return Err(EngineError::UnsupportedSize(n)),
  };
  debug!(
    "characteristic polynomial {}, real roots {:?}",
    report.polynomial, report.roots
  );
  Ok(report)
}

fn characteristic_2x2(
  matrix: &Matrix,
  entries: &[Vec<Polynomial>],
  cells: Vec<Vec<Cell>>,
  mut steps: Vec<EigenStep>,
) -> Result<CharacteristicReport, EngineError> {
  steps.push(EigenStep::matrix(
    "Take the determinant",
    format!(
      "det(λI − A) = ({})({}) - ({})({})",
      cells[0][0], cells[1][1], cells[0][1], cells[1][0]
    ),
    cells,
    MatrixStyle::Determinant,
  ));

  let trace = trace_of(matrix);
  let det = determinant(matrix)?;
  let polynomial =
    Polynomial::new(vec![det.clone(), -&trace, Rational::one()]);
  debug_assert_eq!(polynomial, det2(entries));
  steps.push(EigenStep::polynomial(
    "Characteristic polynomial",
    format!("λ^2 - (trace)λ + det with trace = {trace} and det = {det}"),
    &polynomial,
  ));

  let quadratic = solve_monic_quadratic(&polynomial);
  steps.push(EigenStep::roots(
    "Solve the quadratic",
    quadratic.describe(),
    &quadratic.roots,
  ));

  Ok(CharacteristicReport {
    steps,
    polynomial,
    roots: quadratic.roots,
    exact_roots: quadratic.exact,
  })
}

fn characteristic_3x3(
  matrix: &Matrix,
  entries: &[Vec<Polynomial>],
  mut steps: Vec<EigenStep>,
) -> Result<CharacteristicReport, EngineError> {
  let mut expanded = Polynomial::default();
  for j in 0..3 {
    let minor = poly_minor(entries, j);
    let sign = if j % 2 == 0 { "+" } else { "-" };
    let mut term = &entries[0][j] * &det2(&minor);
    if j % 2 == 1 {
      term = -&term;
    }
    expanded = &expanded + &term;
    let mut step = EigenStep::matrix(
      &format!("Cofactor term {}", j + 1),
      format!(
        "{sign} ({}) · det(minor) = {term}",
        Cell::from_polynomial(&entries[0][j])
      ),
      to_cells(&minor),
      MatrixStyle::Determinant,
    );
    step.polynomial = Some(term);
    steps.push(step);
  }

  let c2 = trace_of(matrix);
  let c1 = (0..3)
    .map(|i| matrix.minor(i, i).and_then(|m| determinant(&m)))
    .sum::<Result<Rational, EngineError>>()?;
  let c0 = determinant(matrix)?;
  let polynomial =
    Polynomial::new(vec![-&c0, c1.clone(), -&c2, Rational::one()]);
  debug_assert_eq!(polynomial, expanded);
  steps.push(EigenStep::polynomial(
    "Collect coefficients",
    format!(
      "λ^3 - c2·λ^2 + c1·λ - c0 with c2 = trace = {c2}, c1 = sum of \
       principal minors = {c1}, c0 = det = {c0}"
    ),
    &polynomial,
  ));

  let (roots, exact_roots) = match find_rational_root(&polynomial) {
    Some(root) => {
      steps.push(EigenStep::roots(
        "Rational root",
        format!(
          "λ = {root} is a root (rational root test); divide it out to \
           leave a quadratic"
        ),
        &[root.to_f64()],
      ));
      let quadratic = solve_monic_quadratic(&polynomial.deflate(&root));
      let mut roots = quadratic.roots.clone();
      roots.push(root.to_f64());
      let mut exact = quadratic.exact.clone();
      exact.push(root);
      exact.sort();
      let roots = sorted(roots);
      steps.push(EigenStep::roots(
        "Solve the remaining quadratic",
        quadratic.describe(),
        &roots,
      ));
      (roots, exact)
    }
    None => {
      let cubic = solve_depressed_cubic(&polynomial);
      steps.push(EigenStep::roots(
        "Solve the cubic",
        cubic.description,
        &cubic.roots,
      ));
      (cubic.roots, cubic.exact)
    }
  };

  Ok(CharacteristicReport {
    steps,
    polynomial,
    roots,
    exact_roots,
  })
}

struct QuadraticRoots {
  discriminant: Rational,
  roots: Vec<f64>,
  exact: Vec<Rational>,
}

impl QuadraticRoots {
  fn describe(&self) -> String {
    let d = &self.discriminant;
    if d.is_negative() {
      format!("discriminant = {d} < 0: no real eigenvalues")
    } else if d.is_zero() {
      format!("discriminant = 0: repeated root λ = {}", self.describe_roots())
    } else {
      format!("discriminant = {d}: λ = {}", self.describe_roots())
    }
  }

  fn describe_roots(&self) -> String {
    if self.exact.len() == self.roots.len() {
      let exact: Vec<String> =
        self.exact.iter().map(|r| r.to_string()).collect();
      exact.join(", ")
    } else {
      let approx: Vec<String> =
        self.roots.iter().map(|r| round_for_display(*r, 6)).collect();
      approx.join(", ")
    }
  }
}

/// Roots of `λ^2 + bλ + c`, exact when the discriminant is a perfect
/// square.
fn solve_monic_quadratic(p: &Polynomial) -> QuadraticRoots {
  let b = p.coefficient(1);
  let c = p.coefficient(0);
  let discriminant = &b * &b - Rational::from_integer(4) * &c;
  let half = ratio(1, 2);

  if discriminant.is_negative() {
    return QuadraticRoots {
      discriminant,
      roots: Vec::new(),
      exact: Vec::new(),
    };
  }
  if let Some(root) = discriminant.exact_sqrt() {
    let mut exact = vec![(-&b - &root) * &half, (-&b + &root) * &half];
    exact.sort();
    return QuadraticRoots {
      discriminant,
      roots: exact.iter().map(Rational::to_f64).collect(),
      exact,
    };
  }
  let sqrt = discriminant.to_f64().sqrt();
  let b = b.to_f64();
  QuadraticRoots {
    discriminant,
    roots: sorted(vec![(-b - sqrt) / 2.0, (-b + sqrt) / 2.0]),
    exact: Vec::new(),
  }
}

fn divisors(n: u64) -> Vec<u64> {
  let mut small = Vec::new();
  let mut large = Vec::new();
  let mut d = 1;
  while d * d <= n {
    if n % d == 0 {
      small.push(d);
      if d != n / d {
        large.push(n / d);
      }
    }
    d += 1;
  }
  small.extend(large.into_iter().rev());
  small
}

/// `|n|` when it is within the rational-root search bound.
fn searchable(n: &BigInt) -> Option<u64> {
  n.magnitude()
    .to_u64()
    .filter(|&m| m <= RATIONAL_ROOT_SEARCH_LIMIT)
}

fn is_root(p: &Polynomial, x: &Rational) -> bool {
  // Cheap float screen before the exact check.
  let xf = x.to_f64();
  let magnitude: f64 = p
    .coefficients()
    .iter()
    .enumerate()
    .map(|(k, c)| c.to_f64().abs() * xf.abs().powi(k as i32))
    .sum();
  p.eval_f64(xf).abs() <= 1e-9 * magnitude.max(1.0) && p.eval(x).is_zero()
}

/// Smallest rational root of a polynomial with rational coefficients, by
/// the rational root theorem on the integer-scaled coefficients.
///
/// Candidates `±n/q` are tested as they are generated, in lowest terms
/// only; anything not below the best root found so far is skipped.
fn find_rational_root(p: &Polynomial) -> Option<Rational> {
  let degree = p.degree()?;
  if p.coefficient(0).is_zero() {
    return Some(Rational::zero());
  }
  let scale = Rational::from_bigint(
    p.coefficients()
      .iter()
      .fold(BigInt::one(), |acc, c| acc.lcm(c.denom())),
  );
  let leading = searchable((p.coefficient(degree) * &scale).numer());
  let constant = searchable((p.coefficient(0) * &scale).numer());
  let (Some(leading), Some(constant)) = (leading, constant) else {
    debug!("coefficients too large for rational root search");
    return None;
  };

  let mut smallest: Option<Rational> = None;
  for q in divisors(leading) {
    for n in divisors(constant) {
      if n.gcd(&q) != 1 {
        continue;
      }
      let (n, q) = (i128::from(n), i128::from(q));
      for candidate in [ratio(-n, q), ratio(n, q)] {
        if smallest.as_ref().is_some_and(|best| candidate >= *best) {
          continue;
        }
        if is_root(p, &candidate) {
          smallest = Some(candidate);
        }
      }
    }
  }
  smallest
}

struct CubicRoots {
  roots: Vec<f64>,
  exact: Vec<Rational>,
  description: String,
}

/// Real roots of a monic cubic `λ^3 + aλ^2 + bλ + c` via the depressed
/// form `t^3 + Pt + Q` with `λ = t − a/3`.
///
/// The sign of the discriminant is computed exactly: positive means three
/// distinct real roots (trigonometric method), negative means one real root
/// (Cardano), zero means a repeated root given in closed form.
fn solve_depressed_cubic(p: &Polynomial) -> CubicRoots {
  let a = p.coefficient(2);
  let b = p.coefficient(1);
  let c = p.coefficient(0);
  let three = Rational::from_integer(3);
  let third = ratio(1, 3);
  let shift = -(&a * &third);

  let big_p = &b - &a * &a * &third;
  let big_q = ratio(2, 27) * a.pow(3) - &a * &b * &third + &c;
  let discriminant = -(Rational::from_integer(4) * big_p.pow(3)
    + Rational::from_integer(27) * &big_q * &big_q);
  let pf = big_p.to_f64();
  let qf = big_q.to_f64();
  let sf = shift.to_f64();

  if discriminant.is_zero() {
    if big_p.is_zero() {
      return CubicRoots {
        roots: vec![sf; 3],
        description: format!("triple root λ = {shift}"),
        exact: vec![shift; 3],
      };
    }
    let simple = &three * &big_q * big_p.recip_nonzero() + &shift;
    let double = -(&three * &big_q)
      * (Rational::from_integer(2) * &big_p).recip_nonzero()
      + &shift;
    let description = format!(
      "discriminant = 0: simple root λ = {simple}, double root λ = {double}"
    );
    let mut exact = vec![simple, double.clone(), double];
    exact.sort();
    return CubicRoots {
      roots: exact.iter().map(Rational::to_f64).collect(),
      description,
      exact,
    };
  }

  if discriminant.signum() > 0 {
    let m = 2.0 * (-pf / 3.0).sqrt();
    let arg = ((3.0 * qf) / (2.0 * pf) * (-3.0 / pf).sqrt()).clamp(-1.0, 1.0);
    let theta = arg.acos() / 3.0;
    let roots = (0..3)
      .map(|k| m * (theta - 2.0 * PI * k as f64 / 3.0).cos() + sf)
      .collect();
    return CubicRoots {
      roots: sorted(roots),
      exact: Vec::new(),
      description: format!(
        "discriminant = {discriminant} > 0: three real roots by the \
         trigonometric method"
      ),
    };
  }

  let inner = (qf * qf / 4.0 + pf * pf * pf / 27.0).sqrt();
  let t = (-qf / 2.0 + inner).cbrt() + (-qf / 2.0 - inner).cbrt();
  CubicRoots {
    roots: vec![t + sf],
    exact: Vec::new(),
    description: format!(
      "discriminant = {discriminant} < 0: one real root by Cardano's formula"
    ),
  }
}

/// Basis of the eigenspace `null(A − λI)` for an exact eigenvalue.
pub fn eigenspace_basis(
  matrix: &Matrix,
  eigenvalue: Rational,
) -> Result<Vec<Vec<Rational>>, EngineError> {
  let (rows, cols) = matrix.shape();
  if rows != cols {
    return Err(EngineError::NotSquare { rows, cols });
  }
  let shifted = Matrix::from_rows(
    (0..rows)
      .map(|i| {
        (0..cols)
          .map(|j| {
            if i == j {
              matrix.get(i, j) - &eigenvalue
            } else {
              matrix.get(i, j).clone()
            }
          })
          .collect()
      })
      .collect(),
  )?;
  let trace = reduce_to_rref(&shifted);
  Ok(null_space_basis(trace.final_matrix(), trace.pivots()))
}
