use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use serde::Serialize;

use linwork::characteristic::round_for_display;
use linwork::{
  analyze_orthogonality, check_orthogonal_set, cofactor_expansion,
  characteristic_polynomial, determinant, inverse, parse_matrix, parse_vector,
  recompute, reduce_to_rref, solve_system, subspaces, CharacteristicReport,
  EngineConfig, InverseOutcome, Matrix, OrthoStep, Rational, Solution,
  SubspaceReport, Trace,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Print results as JSON
  #[arg(long, global = true)]
  json: bool,

  /// Log each computation at debug level
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Decimal places for floating-point roots and angles
  #[arg(long, global = true)]
  decimals: Option<usize>,

  /// Largest accepted row or column count
  #[arg(
    long,
    global = true,
    value_parser = RangedU64ValueParser::<usize>::new().range(1..)
  )]
  max_dimension: Option<usize>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Row-reduce a matrix, printing every step
  Rref {
    /// Matrix literal, e.g. "[[1, 2], [3, 4]]" or "1, 2; 3, 4"
    matrix: String,
  },
  /// Bases of the four fundamental subspaces
  Subspaces { matrix: String },
  /// Determinant with its first-row cofactor expansion
  Det { matrix: String },
  /// Inverse by Gauss-Jordan elimination on [A | I]
  Inverse { matrix: String },
  /// Characteristic polynomial and real eigenvalues (2x2 or 3x3)
  Eigen { matrix: String },
  /// Dot product, norms and angle of two vectors
  Ortho { u: String, v: String },
  /// Check whether the columns form an orthogonal set
  OrthoSet { matrix: String },
  /// Solve Ax = b
  Solve { matrix: String, vector: String },
  /// Run every analysis
  All { matrix: String },
}

fn read_matrix(text: &str, config: &EngineConfig) -> Result<Matrix> {
  let matrix =
    parse_matrix(text).with_context(|| format!("cannot read matrix {text:?}"))?;
  config.ensure_within_bounds(&matrix)?;
  Ok(matrix)
}

fn read_vector(text: &str) -> Result<Vec<Rational>> {
  parse_vector(text).with_context(|| format!("cannot read vector {text:?}"))
}

fn format_vector(v: &[Rational]) -> String {
  let cells: Vec<String> = v.iter().map(|x| x.to_string()).collect();
  format!("[{}]", cells.join(", "))
}

fn format_basis(name: &str, basis: &[Vec<Rational>]) -> String {
  if basis.is_empty() {
    return format!("{name}: {{}}");
  }
  let vectors: Vec<String> = basis.iter().map(|v| format_vector(v)).collect();
  format!("{name}: {{{}}}", vectors.join(", "))
}

fn print_trace(trace: &Trace) {
  for (i, step) in trace.steps().iter().enumerate() {
    println!("Step {}: {}", i + 1, step.description);
    println!("{}\n", step.matrix);
  }
}

fn print_subspaces(report: &SubspaceReport) {
  println!("rank: {}", report.rank);
  println!("nullity: {}", report.nullity);
  println!("pivot columns: {:?}", report.pivots.columns());
  println!("{}", format_basis("column space", &report.column_space));
  println!("{}", format_basis("row space", &report.row_space));
  println!("{}", format_basis("null space", &report.null_space));
  println!("{}", format_basis("left null space", &report.left_null_space));
}

fn print_inverse(outcome: &InverseOutcome) {
  match outcome {
    InverseOutcome::Invertible { inverse, .. } => {
      println!("inverse:\n{inverse}");
    }
    InverseOutcome::Singular { .. } => {
      println!("inverse: undefined (singular)");
    }
  }
}

fn print_characteristic(report: &CharacteristicReport, decimals: usize) {
  for step in &report.steps {
    println!("{}: {}", step.title, step.description);
    for row in &step.symbolic_matrix {
      let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
      println!("  [{}]", cells.join(", "));
    }
  }
  println!("p(λ) = {}", report.polynomial);
  if report.has_real_roots() {
    println!("eigenvalues: {}", report.display_roots(decimals).join(", "));
  } else {
    println!("eigenvalues: no real eigenvalues");
  }
}

fn print_ortho_steps(steps: &[OrthoStep], decimals: usize) {
  for step in steps {
    match step {
      OrthoStep::DotProduct { products, value } => {
        let terms: Vec<String> =
          products.iter().map(|p| p.to_string()).collect();
        println!("u · v = {} = {value}", terms.join(" + "));
      }
      OrthoStep::SquaredNorm { vector, value } => {
        println!("‖{vector:?}‖² = {value}");
      }
      OrthoStep::Norm {
        vector,
        exact,
        value,
        ..
      } => match exact {
        Some(exact) => println!("‖{vector:?}‖ = {exact}"),
        None => {
          let approx = round_for_display(*value, decimals);
          println!("‖{vector:?}‖ ≈ {approx}");
        }
      },
      OrthoStep::Cosine { value, .. } => {
        println!("cos θ ≈ {}", round_for_display(*value, decimals));
      }
      OrthoStep::Angle { degrees, .. } => {
        println!("θ ≈ {}°", round_for_display(*degrees, decimals));
      }
      OrthoStep::Verdict { orthogonal } => {
        let verdict = if *orthogonal { "orthogonal" } else { "not orthogonal" };
        println!("{verdict}");
      }
      OrthoStep::PairCheck {
        first,
        second,
        dot,
        orthogonal,
      } => {
        let mark = if *orthogonal { "pass" } else { "fail" };
        println!("c{} · c{} = {dot} ({mark})", first + 1, second + 1);
      }
      OrthoStep::SetVerdict { orthogonal, .. } => {
        if *orthogonal {
          println!("orthogonal set");
        } else {
          println!("not an orthogonal set");
        }
      }
    }
  }
}

fn emit<T: Serialize>(
  json: bool,
  value: &T,
  text: impl FnOnce(),
) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value)?);
  } else {
    text();
  }
  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or(default_filter),
  )
  .init();

  let mut config = EngineConfig::from_env()?;
  if let Some(decimals) = cli.decimals {
    config.display_decimals = decimals;
  }
  if let Some(max) = cli.max_dimension {
    config.max_dimension = max;
  }
  let decimals = config.display_decimals;

  match &cli.command {
    Commands::Rref { matrix } => {
      let trace = reduce_to_rref(&read_matrix(matrix, &config)?);
      emit(cli.json, &trace, || print_trace(&trace))
    }
    Commands::Subspaces { matrix } => {
      let report = subspaces(&read_matrix(matrix, &config)?);
      emit(cli.json, &report, || print_subspaces(&report))
    }
    Commands::Det { matrix } => {
      let matrix = read_matrix(matrix, &config)?;
      let value = determinant(&matrix)?;
      let terms = cofactor_expansion(&matrix)?;
      emit(cli.json, &(&value, &terms), || {
        for term in &terms {
          let sign = if term.sign > 0 { "+" } else { "-" };
          println!(
            "{sign} {} * {} = {}",
            term.entry, term.minor_determinant, term.contribution
          );
        }
        println!("det = {value}");
      })
    }
    Commands::Inverse { matrix } => {
      let outcome = inverse(&read_matrix(matrix, &config)?)?;
      emit(cli.json, &outcome, || {
        print_trace(outcome.trace());
        print_inverse(&outcome);
      })
    }
    Commands::Eigen { matrix } => {
      let report = characteristic_polynomial(&read_matrix(matrix, &config)?)?;
      emit(cli.json, &report, || print_characteristic(&report, decimals))
    }
    Commands::Ortho { u, v } => {
      let report = analyze_orthogonality(&read_vector(u)?, &read_vector(v)?)?;
      emit(cli.json, &report, || print_ortho_steps(&report.steps, decimals))
    }
    Commands::OrthoSet { matrix } => {
      let steps = check_orthogonal_set(&read_matrix(matrix, &config)?);
      emit(cli.json, &steps, || print_ortho_steps(&steps, decimals))
    }
    Commands::Solve { matrix, vector } => {
      let report =
        solve_system(&read_matrix(matrix, &config)?, &read_vector(vector)?)?;
      emit(cli.json, &report, || {
        print_trace(&report.trace);
        match &report.solution {
          Solution::Unique(x) => println!("x = {}", format_vector(x)),
          Solution::Infinite {
            particular,
            directions,
          } => {
            println!("x = {}", format_vector(particular));
            println!("{}", format_basis("plus any combination of", directions));
          }
          Solution::Inconsistent => println!("no solution (inconsistent)"),
        }
      })
    }
    Commands::All { matrix } => {
      let results = recompute(&parse_matrix(matrix)?, &config)?;
      emit(cli.json, &results, || {
        print_trace(&results.rref);
        print_subspaces(&results.subspaces);
        if let Some(det) = &results.determinant {
          println!("det = {det}");
        }
        if let Some(outcome) = &results.inverse {
          print_inverse(outcome);
        }
        if let Some(report) = &results.characteristic {
          print_characteristic(report, decimals);
        }
        print_ortho_steps(&results.orthogonal_set, decimals);
      })
    }
  }
}
