use super::*;

fn verdict(steps: &[OrthoStep]) -> (bool, usize) {
  match steps.last() {
    Some(OrthoStep::SetVerdict {
      orthogonal,
      pairs_checked,
    }) => (*orthogonal, *pairs_checked),
    other => panic!("expected a set verdict, got {other:?}"),
  }
}

mod pairs {
  use super::*;

  #[test]
  fn perpendicular_unit_vectors() {
    let report = analyze_orthogonality(&v(&[1, 0]), &v(&[0, 1])).unwrap();
    assert!(report.orthogonal);
    assert_eq!(report.dot, Rational::zero());
    assert!(report.cosine.abs() < 1e-12);
    match &report.steps[6] {
      OrthoStep::Angle { degrees, .. } => {
        assert!((degrees - 90.0).abs() < 1e-9);
      }
      other => panic!("unexpected step {other:?}"),
    }
    assert_eq!(report.steps.last(), Some(&OrthoStep::Verdict {
      orthogonal: true
    }));
  }

  #[test]
  fn parallel_vectors() {
    let report = analyze_orthogonality(&v(&[1, 0]), &v(&[1, 0])).unwrap();
    assert!(!report.orthogonal);
    assert_eq!(report.dot, int(1));
    assert!((report.cosine - 1.0).abs() < 1e-12);
  }

  #[test]
  fn step_order() {
    let report = analyze_orthogonality(&v(&[1, 2, 3]), &v(&[4, 5, 6])).unwrap();
    assert_eq!(report.steps.len(), 8);
    assert_eq!(report.steps[0], OrthoStep::DotProduct {
      products: v(&[4, 10, 18]),
      value: int(32),
    });
    assert_eq!(report.steps[1], OrthoStep::SquaredNorm {
      vector: VectorName::U,
      value: int(14),
    });
    assert!(matches!(report.steps[2], OrthoStep::Norm {
      vector: VectorName::U,
      exact: None,
      ..
    }));
    assert_eq!(report.steps[3], OrthoStep::SquaredNorm {
      vector: VectorName::V,
      value: int(77),
    });
    assert!(matches!(report.steps[5], OrthoStep::Cosine { .. }));
    assert!(matches!(report.steps[7], OrthoStep::Verdict {
      orthogonal: false
    }));
  }

  #[test]
  fn exact_norm_when_perfect_square() {
    let report = analyze_orthogonality(&v(&[3, 4]), &v(&[4, -3])).unwrap();
    assert!(report.orthogonal);
    match &report.steps[2] {
      OrthoStep::Norm { exact, value, .. } => {
        assert_eq!(*exact, Some(int(5)));
        assert!((value - 5.0).abs() < 1e-12);
      }
      other => panic!("unexpected step {other:?}"),
    }
  }

  #[test]
  fn forty_five_degrees() {
    let report = analyze_orthogonality(&v(&[1, 0]), &v(&[1, 1])).unwrap();
    match &report.steps[6] {
      OrthoStep::Angle { radians, degrees } => {
        assert!((radians - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((degrees - 45.0).abs() < 1e-9);
      }
      other => panic!("unexpected step {other:?}"),
    }
  }

  #[test]
  fn zero_vector_is_an_error() {
    assert!(matches!(
      analyze_orthogonality(&v(&[0, 0]), &v(&[1, 2])),
      Err(EngineError::ZeroVector)
    ));
    assert!(matches!(
      analyze_orthogonality(&v(&[1, 2]), &v(&[0, 0])),
      Err(EngineError::ZeroVector)
    ));
  }

  #[test]
  fn length_mismatch() {
    assert!(matches!(
      analyze_orthogonality(&v(&[1, 2]), &v(&[1, 2, 3])),
      Err(EngineError::ShapeMismatch(_))
    ));
    assert!(matches!(
      analyze_orthogonality(&[], &[]),
      Err(EngineError::EmptyMatrix)
    ));
  }
}

mod sets {
  use super::*;

  #[test]
  fn identity_columns() {
    let steps = check_orthogonal_set(&Matrix::identity(3).unwrap());
    assert_eq!(steps.len(), 4);
    assert_eq!(verdict(&steps), (true, 3));
    assert_eq!(steps[0], OrthoStep::PairCheck {
      first: 0,
      second: 1,
      dot: Rational::zero(),
      orthogonal: true,
    });
  }

  #[test]
  fn stops_at_first_failing_pair() {
    let a = m(&[&[1, 1, 0], &[0, 1, 1]]);
    let steps = check_orthogonal_set(&a);
    assert_eq!(steps, vec![
      OrthoStep::PairCheck {
        first: 0,
        second: 1,
        dot: int(1),
        orthogonal: false,
      },
      OrthoStep::SetVerdict {
        orthogonal: false,
        pairs_checked: 1,
      },
    ]);
  }

  #[test]
  fn failure_after_passing_pairs() {
    let a = m(&[&[1, 0, 1], &[0, 1, 1]]);
    let steps = check_orthogonal_set(&a);
    assert_eq!(verdict(&steps), (false, 2));
    assert!(matches!(steps[1], OrthoStep::PairCheck {
      first: 0,
      second: 2,
      orthogonal: false,
      ..
    }));
  }

  #[test]
  fn single_column_is_trivially_orthogonal() {
    let steps = check_orthogonal_set(&m(&[&[1], &[2]]));
    assert_eq!(steps, vec![OrthoStep::SetVerdict {
      orthogonal: true,
      pairs_checked: 0,
    }]);
  }

  #[test]
  fn columns_of_a_rotation() {
    let a = m(&[&[3, -4], &[4, 3]]);
    assert_eq!(verdict(&check_orthogonal_set(&a)), (true, 1));
  }
}

mod projections {
  use super::*;

  #[test]
  fn onto_axis() {
    assert_eq!(projection(&v(&[2, 3]), &v(&[1, 0])).unwrap(), v(&[2, 0]));
  }

  #[test]
  fn onto_diagonal_is_exact() {
    assert_eq!(projection(&v(&[1, 2]), &v(&[1, 1])).unwrap(), vec![
      r(3, 2),
      r(3, 2)
    ]);
  }

  #[test]
  fn residual_is_orthogonal() {
    let mut rng = StdRng::seed_from_u64(71);
    for _ in 0..100 {
      let n = rng.gen_range(1..=5);
      let u: Vec<i64> = (0..n).map(|_| rng.gen_range(-5..=5)).collect();
      let w: Vec<i64> = (0..n).map(|_| rng.gen_range(-5..=5)).collect();
      let (u, w) = (v(&u), v(&w));
      if is_zero_vector(&w) {
        continue;
      }
      let p = projection(&u, &w).unwrap();
      let residual: Vec<Rational> =
        u.iter().zip(&p).map(|(a, b)| a - b).collect();
      assert!(linwork::matrix::dot(&residual, &w).is_zero());
    }
  }

  #[test]
  fn onto_zero_vector() {
    assert!(matches!(
      projection(&v(&[1, 2]), &v(&[0, 0])),
      Err(EngineError::ZeroVector)
    ));
  }
}
