use super::*;

mod recompute_all {
  use super::*;

  #[test]
  fn invertible_3x3() {
    let a = m(&[&[4, 1, -1], &[2, 5, -2], &[1, 1, 2]]);
    let results = recompute(&a, &EngineConfig::default()).unwrap();
    assert!(results.rref.final_matrix().is_identity());
    assert_eq!(results.determinant, Some(int(45)));
    let inverse = results.inverse.unwrap();
    assert!(!inverse.is_singular());
    let characteristic = results.characteristic.unwrap();
    assert_eq!(characteristic.polynomial.coefficient(0), int(-45));
    assert_eq!(results.subspaces.rank, 3);
    assert!(!results.orthogonal_set.is_empty());
  }

  #[test]
  fn rectangular_skips_square_only_analyses() {
    let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
    let results = recompute(&a, &EngineConfig::default()).unwrap();
    assert_eq!(results.determinant, None);
    assert!(results.inverse.is_none());
    assert!(results.characteristic.is_none());
    assert_eq!(results.subspaces.nullity, 1);
  }

  #[test]
  fn large_square_has_no_characteristic() {
    let a = Matrix::identity(4).unwrap();
    let results = recompute(&a, &EngineConfig::default()).unwrap();
    assert_eq!(results.determinant, Some(int(1)));
    assert!(results.characteristic.is_none());
  }

  #[test]
  fn singular_square() {
    let results =
      recompute(&m(&[&[1, 2], &[2, 4]]), &EngineConfig::default()).unwrap();
    assert_eq!(results.determinant, Some(Rational::zero()));
    assert!(results.inverse.unwrap().is_singular());
  }

  #[test]
  fn fractional_10x10_at_the_default_bound() {
    let mut rng = StdRng::seed_from_u64(103);
    let a = random_fraction_matrix(&mut rng, 10, 10);
    let results = recompute(&a, &EngineConfig::default()).unwrap();
    let det = results.determinant.clone().unwrap();
    match results.inverse.as_ref().and_then(InverseOutcome::inverse) {
      Some(inv) => {
        assert!(!det.is_zero());
        assert!(a.multiply(inv).unwrap().is_identity());
      }
      None => assert!(det.is_zero()),
    }
    assert!(results.characteristic.is_none());
  }

  #[test]
  fn results_match_the_individual_operations() {
    for a in random_shapes(83, 60) {
      let results = recompute(&a, &EngineConfig::default()).unwrap();
      assert_eq!(results.rref, reduce_to_rref(&a));
      assert_eq!(results.subspaces, subspaces(&a));
      assert_eq!(results.orthogonal_set, check_orthogonal_set(&a));
    }
  }
}

mod settings {
  use super::*;
  use linwork::config::{DISPLAY_DECIMALS_VAR, MAX_DIMENSION_VAR};

  #[test]
  fn dimension_bound() {
    let a = Matrix::zeros(11, 11).unwrap();
    assert!(matches!(
      recompute(&a, &EngineConfig::default()),
      Err(EngineError::DimensionTooLarge {
        rows: 11,
        cols: 11,
        max: 10
      })
    ));
    let tight = EngineConfig {
      max_dimension: 2,
      ..EngineConfig::default()
    };
    assert!(recompute(&Matrix::identity(3).unwrap(), &tight).is_err());
    assert!(recompute(&Matrix::identity(2).unwrap(), &tight).is_ok());
  }

  #[test]
  fn from_env() {
    // The only test touching these variables.
    std::env::set_var(MAX_DIMENSION_VAR, "3");
    std::env::set_var(DISPLAY_DECIMALS_VAR, "2");
    let config = EngineConfig::from_env().unwrap();
    assert_eq!(config, EngineConfig {
      max_dimension: 3,
      display_decimals: 2,
    });

    std::env::set_var(MAX_DIMENSION_VAR, "0");
    assert!(matches!(
      EngineConfig::from_env(),
      Err(EngineError::InvalidConfig(_))
    ));
    std::env::set_var(MAX_DIMENSION_VAR, "many");
    assert!(matches!(
      EngineConfig::from_env(),
      Err(EngineError::InvalidConfig(_))
    ));

    std::env::remove_var(MAX_DIMENSION_VAR);
    std::env::remove_var(DISPLAY_DECIMALS_VAR);
    assert_eq!(EngineConfig::from_env().unwrap(), EngineConfig::default());
  }
}
