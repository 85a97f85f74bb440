//! Unit tests for embedding vectors

use vdr_domain::Error;
use vdr_domain::value_objects::EmbeddingVector;

#[test]
fn test_single_vector_shape() {
    let vector = EmbeddingVector::from(vec![0.1, 0.2, 0.3]);
    assert!(!vector.is_multi());
    assert_eq!(vector.dimensions(), 3);
    assert_eq!(vector.len(), 1);
}

#[test]
fn test_multi_vector_shape() {
    let vector = EmbeddingVector::from(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]]);
    assert!(vector.is_multi());
    assert_eq!(vector.dimensions(), 2);
    assert_eq!(vector.len(), 3);
    assert_eq!(vector.rows()[2], &[0.5, 0.5]);
}

#[test]
fn test_ensure_dimensions_rejects_ragged_rows() {
    let vector = EmbeddingVector::Multi(vec![vec![1.0, 0.0], vec![1.0]]);
    assert!(matches!(
        vector.ensure_dimensions(2),
        Err(Error::EmbeddingInference { .. })
    ));
}

#[test]
fn test_ensure_dimensions_rejects_empty() {
    let vector = EmbeddingVector::Single(Vec::new());
    assert!(vector.ensure_dimensions(0).is_err());
}

#[test]
fn test_untagged_json_shapes() {
    let single: EmbeddingVector = serde_json::from_str("[0.5, 1.5]").unwrap();
    assert_eq!(single, EmbeddingVector::Single(vec![0.5, 1.5]));

    let multi: EmbeddingVector = serde_json::from_str("[[0.5, 1.5], [2.0, 3.0]]").unwrap();
    assert_eq!(
        multi,
        EmbeddingVector::Multi(vec![vec![0.5, 1.5], vec![2.0, 3.0]])
    );
}
