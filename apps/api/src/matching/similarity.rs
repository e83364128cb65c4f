//! Cosine-similarity scoring between a résumé embedding and a job embedding.
//!
//! Pure and deterministic — no I/O, no shared state. The only inputs are the
//! two vectors; the output is a match percentage rounded to two decimals.

use crate::matching::error::MatchError;

/// Computes the cosine match percentage between two embedding vectors.
///
/// The similarity is computed in f64, clamped to [-1, 1] against floating
/// point drift, and floored at 0 before scaling — anti-correlated texts read
/// as 0.00% rather than a negative percentage, keeping the result in
/// [0, 100].
///
/// Errors: `DimensionMismatch` when the vectors differ in length,
/// `DegenerateVector` when either has zero norm.
pub fn score(a: &[f32], b: &[f32]) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(MatchError::DegenerateVector);
    }

    let similarity = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0);
    let percentage = similarity.max(0.0) * 100.0;

    Ok((percentage * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_100() {
        let a = vec![0.3_f32, 0.5, -0.2, 0.8];
        assert_eq!(score(&a, &a).unwrap(), 100.0);
    }

    #[test]
    fn test_orthogonal_vectors_score_0() {
        let a = vec![1.0_f32, 0.0];
        let b = vec![0.0_f32, 1.0];
        assert_eq!(score(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_opposite_vectors_floor_at_0() {
        let a = vec![1.0_f32, 2.0];
        let b = vec![-1.0_f32, -2.0];
        assert_eq!(score(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = vec![0.1_f32, 0.9, 0.4];
        let b = vec![0.7_f32, 0.2, 0.5];
        assert_eq!(score(&a, &b).unwrap(), score(&b, &a).unwrap());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0_f32, 2.0];
        let b = vec![1.0_f32, 2.0, 3.0];
        match score(&a, &b) {
            Err(MatchError::DimensionMismatch { left: 2, right: 3 }) => {}
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_vector_is_degenerate() {
        let a = vec![0.0_f32, 0.0, 0.0];
        let b = vec![1.0_f32, 2.0, 3.0];
        assert!(matches!(score(&a, &b), Err(MatchError::DegenerateVector)));
        assert!(matches!(score(&b, &a), Err(MatchError::DegenerateVector)));
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // cos = 2.5 / (sqrt(3) * 1.5) ≈ 0.9622504 → 96.23%
        let a = vec![1.0_f32, 1.0, 1.0];
        let b = vec![1.0_f32, 1.0, 0.5];
        let pct = score(&a, &b).unwrap();
        assert_eq!(pct, (pct * 100.0).round() / 100.0);
        assert_eq!(pct, 96.23);
    }

    #[test]
    fn test_scale_invariant() {
        let a = vec![0.2_f32, 0.4, 0.6];
        let b: Vec<f32> = a.iter().map(|x| x * 10.0).collect();
        assert_eq!(score(&a, &b).unwrap(), 100.0);
    }
}
