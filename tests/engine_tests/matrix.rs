use super::*;

mod construction {
  use super::*;

  #[test]
  fn shape() {
    let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
    assert_eq!(a.shape(), (2, 3));
    assert_eq!(a.row(1), v(&[4, 5, 6]).as_slice());
    assert_eq!(a.column(2), v(&[3, 6]));
  }

  #[test]
  fn empty_is_rejected() {
    assert!(matches!(
      Matrix::from_rows(Vec::new()),
      Err(EngineError::EmptyMatrix)
    ));
    assert!(matches!(
      Matrix::from_rows(vec![Vec::new()]),
      Err(EngineError::EmptyMatrix)
    ));
    assert!(matches!(Matrix::identity(0), Err(EngineError::EmptyMatrix)));
  }

  #[test]
  fn ragged_is_rejected() {
    assert!(matches!(
      Matrix::from_rows(vec![v(&[1, 2]), v(&[3])]),
      Err(EngineError::ShapeMismatch(_))
    ));
  }

  #[test]
  fn identity() {
    let i = Matrix::identity(3).unwrap();
    assert!(i.is_identity());
    assert_eq!(i, m(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]));
    assert!(!m(&[&[1, 0], &[0, 2]]).is_identity());
    assert!(!m(&[&[1, 0, 0], &[0, 1, 0]]).is_identity());
  }

  #[test]
  fn from_cells_is_lenient() {
    let cells = vec![
      vec!["1".to_string(), "1/2".to_string()],
      vec!["".to_string(), "oops".to_string()],
    ];
    let a = Matrix::from_cells(&cells).unwrap();
    assert_eq!(*a.get(0, 1), r(1, 2));
    assert_eq!(*a.get(1, 0), Rational::zero());
    assert_eq!(*a.get(1, 1), Rational::zero());
  }
}

mod reshaping {
  use super::*;

  #[test]
  fn transpose() {
    let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
    assert_eq!(a.transpose(), m(&[&[1, 4], &[2, 5], &[3, 6]]));
    assert_eq!(a.transpose().transpose(), a);
  }

  #[test]
  fn augment() {
    let a = m(&[&[1, 2], &[3, 4]]);
    let b = m(&[&[5], &[6]]);
    assert_eq!(a.augment(&b).unwrap(), m(&[&[1, 2, 5], &[3, 4, 6]]));
  }

  #[test]
  fn augment_shape_mismatch() {
    let a = m(&[&[1, 2], &[3, 4]]);
    let b = m(&[&[5]]);
    assert!(matches!(a.augment(&b), Err(EngineError::ShapeMismatch(_))));
  }

  #[test]
  fn submatrix() {
    let a = m(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
    assert_eq!(a.submatrix(1..3, 0..2).unwrap(), m(&[&[4, 5], &[7, 8]]));
    assert!(matches!(
      a.submatrix(0..4, 0..1),
      Err(EngineError::ShapeMismatch(_))
    ));
    assert!(matches!(
      a.submatrix(1..1, 0..1),
      Err(EngineError::EmptyMatrix)
    ));
  }

  #[test]
  fn minor() {
    let a = m(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
    assert_eq!(a.minor(0, 1).unwrap(), m(&[&[4, 6], &[7, 9]]));
  }

  #[test]
  fn operations_do_not_mutate_receiver() {
    let a = m(&[&[1, 2], &[3, 4]]);
    let before = a.clone();
    let _ = a.with_rows_swapped(0, 1);
    let _ = a.with_row_scaled(0, int(5));
    let _ = a.with_row_added(1, 0, int(-3));
    let _ = a.transpose();
    assert_eq!(a, before);
  }

  #[test]
  fn row_operations() {
    let a = m(&[&[1, 2], &[3, 4]]);
    assert_eq!(a.with_rows_swapped(0, 1), m(&[&[3, 4], &[1, 2]]));
    assert_eq!(a.with_row_scaled(1, r(1, 2)).row(1), &[r(3, 2), int(2)]);
    assert_eq!(a.with_row_added(1, 0, int(-3)), m(&[&[1, 2], &[0, -2]]));
  }
}

mod products {
  use super::*;

  #[test]
  fn multiply() {
    let a = m(&[&[1, 2], &[3, 4]]);
    let b = m(&[&[5, 6], &[7, 8]]);
    assert_eq!(a.multiply(&b).unwrap(), m(&[&[19, 22], &[43, 50]]));
  }

  #[test]
  fn multiply_shape_mismatch() {
    let a = m(&[&[1, 2, 3]]);
    assert!(matches!(a.multiply(&a), Err(EngineError::ShapeMismatch(_))));
  }

  #[test]
  fn apply() {
    let a = m(&[&[1, 2], &[3, 4]]);
    assert_eq!(a.apply(&v(&[5, 6])).unwrap(), v(&[17, 39]));
    assert!(matches!(
      a.apply(&v(&[1, 2, 3])),
      Err(EngineError::ShapeMismatch(_))
    ));
  }
}

mod display {
  use super::*;

  #[test]
  fn aligned_rows() {
    let a = Matrix::from_rows(vec![vec![int(1), r(-1, 2)], v(&[10, 0])])
      .unwrap();
    assert_eq!(a.to_string(), "[   1  -1/2]\n[  10     0]");
  }
}
