use super::*;
use num_bigint::BigInt;
use num_traits::One;

mod construction {
  use super::*;

  #[test]
  fn reduces_and_moves_sign_to_numerator() {
    let x = r(2, -4);
    assert_eq!(*x.numer(), BigInt::from(-1));
    assert_eq!(*x.denom(), BigInt::from(2));
    assert_eq!(x, r(-1, 2));
  }

  #[test]
  fn zero_is_canonical() {
    let x = r(0, -5);
    assert_eq!(x, Rational::zero());
    assert!(x.denom().is_one());
    assert!(x.is_zero());
  }

  #[test]
  fn equality_ignores_construction_path() {
    assert_eq!(r(6, 8), r(3, 4));
    assert_eq!(r(1, 2) + r(1, 2), Rational::one());
    assert_eq!("0.75".parse::<Rational>().unwrap(), r(3, 4));
  }

  #[test]
  fn zero_denominator_is_rejected() {
    assert!(matches!(Rational::new(1, 0), Err(EngineError::DivisionByZero)));
  }
}

mod arithmetic {
  use super::*;

  #[test]
  fn add_sub_mul() {
    assert_eq!(r(1, 2) + r(1, 3), r(5, 6));
    assert_eq!(r(1, 2) - r(1, 3), r(1, 6));
    assert_eq!(r(2, 3) * r(3, 4), r(1, 2));
    assert_eq!(-r(2, 3), r(-2, 3));
  }

  #[test]
  fn division() {
    assert_eq!(r(1, 2).checked_div(&r(3, 4)).unwrap(), r(2, 3));
    assert_eq!(r(-3, 5).reciprocal().unwrap(), r(-5, 3));
  }

  #[test]
  fn division_by_zero() {
    assert!(matches!(
      int(3).checked_div(&Rational::zero()),
      Err(EngineError::DivisionByZero)
    ));
    assert!(matches!(
      Rational::zero().reciprocal(),
      Err(EngineError::DivisionByZero)
    ));
  }

  #[test]
  fn sum_of_iterator() {
    let total: Rational = [r(1, 2), r(1, 3), r(1, 6)].into_iter().sum();
    assert_eq!(total, Rational::one());
  }

  #[test]
  fn exact_sqrt() {
    assert_eq!(r(9, 4).exact_sqrt(), Some(r(3, 2)));
    assert_eq!(int(0).exact_sqrt(), Some(Rational::zero()));
    assert_eq!(int(2).exact_sqrt(), None);
    assert_eq!(int(-4).exact_sqrt(), None);
  }

  #[test]
  fn sums_past_machine_integers() {
    // The denominator of H(120) needs 162 bits.
    let harmonic: Rational = (1..=120).map(|d| r(1, d)).sum();
    assert!(harmonic.denom().bits() > 128);
    let back = (1..=120).fold(harmonic, |acc, d| acc - r(1, d));
    assert!(back.is_zero());
  }

  #[test]
  fn huge_values() {
    let big = Rational::from_bigint(BigInt::from(10).pow(50));
    let product = &big * &big;
    assert_eq!(product.to_string(), format!("1{}", "0".repeat(100)));
    assert_eq!(product.exact_sqrt(), Some(big.clone()));
    assert_eq!(big.reciprocal().unwrap() * &big, Rational::one());
    assert!((big.to_f64() / 1e50 - 1.0).abs() < 1e-12);
  }

  #[test]
  fn to_f64() {
    assert_eq!(r(1, 4).to_f64(), 0.25);
    assert_eq!(int(-3).to_f64(), -3.0);
  }
}

mod ordering {
  use super::*;

  #[test]
  fn compares_by_value() {
    assert!(r(-1, 2) < r(1, 3));
    assert!(r(2, 3) > r(3, 5));
    let mut xs = vec![int(2), r(-1, 2), r(1, 3), Rational::zero()];
    xs.sort();
    assert_eq!(xs, vec![r(-1, 2), Rational::zero(), r(1, 3), int(2)]);
  }
}

mod display {
  use super::*;

  #[test]
  fn integers_have_no_denominator() {
    assert_eq!(int(3).to_string(), "3");
    assert_eq!(r(-4, 2).to_string(), "-2");
    assert_eq!(Rational::zero().to_string(), "0");
  }

  #[test]
  fn fractions() {
    assert_eq!(r(1, -2).to_string(), "-1/2");
    assert_eq!(r(10, 4).to_string(), "5/2");
  }
}
