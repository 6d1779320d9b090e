//! Vector Scorer: cosine similarity between two precomputed embeddings.
//!
//! Embeddings come from an external provider. Absent (empty) or zero-magnitude
//! vectors carry no signal and score 0; vectors of different lengths are a
//! caller error.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Side};

/// Absorbs rounding so that identical vectors land on exactly 100.
const SIMILARITY_EPSILON: f64 = 1e-9;

/// Fixed-length embedding. Length 0 means "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_empty()
    }

    pub fn magnitude(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| (x as f64) * (x as f64))
            .sum::<f64>()
            .sqrt()
    }

    /// True when every component is zero. An absent vector is also zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }

    /// Unit-length copy. Zero and absent vectors are returned unchanged.
    pub fn normalized(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return self.clone();
        }
        Self(
            self.0
                .iter()
                .map(|&x| (x as f64 / magnitude) as f32)
                .collect(),
        )
    }

    /// Checks a present vector against the configured dimension. Absent
    /// vectors always pass.
    pub fn check_dimension(&self, expected: usize, side: Side) -> Result<(), MatchError> {
        if self.is_absent() || self.dimension() == expected {
            Ok(())
        } else {
            Err(MatchError::UnexpectedDimension {
                side,
                expected,
                actual: self.dimension(),
            })
        }
    }

    fn check_finite(&self, side: Side) -> Result<(), MatchError> {
        if self.0.iter().all(|x| x.is_finite()) {
            Ok(())
        } else {
            Err(MatchError::NonFiniteEmbedding { side })
        }
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Cosine similarity clamped to `[0, 1]`, or `None` when either side has no
/// signal. Lengths must already match.
fn cosine(a: &EmbeddingVector, b: &EmbeddingVector) -> Option<f64> {
    let norms = a.magnitude() * b.magnitude();
    if norms == 0.0 {
        return None;
    }

    let dot: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| x as f64 * y as f64)
        .sum();
    Some((dot / norms).clamp(0.0, 1.0))
}

/// Scores two embeddings on `[0, 100]` as `floor(cosine * 100)`.
///
/// Returns 0 when either vector is absent or zero. Fails on a length mismatch
/// or non-finite components; neither is ever coerced into a score.
pub fn vector_score(a: &EmbeddingVector, b: &EmbeddingVector) -> Result<u8, MatchError> {
    if a.is_absent() || b.is_absent() {
        return Ok(0);
    }
    if a.dimension() != b.dimension() {
        return Err(MatchError::DimensionMismatch {
            left: a.dimension(),
            right: b.dimension(),
        });
    }
    a.check_finite(Side::Cv)?;
    b.check_finite(Side::Role)?;

    let Some(similarity) = cosine(a, b) else {
        tracing::debug!("zero-magnitude embedding, scoring 0");
        return Ok(0);
    };

    let score = (similarity * 100.0 + SIMILARITY_EPSILON).floor().min(100.0) as u8;
    tracing::debug!(similarity, score, "vector score computed");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIM: usize = 384;

    fn ramp(dim: usize, offset: f32) -> EmbeddingVector {
        EmbeddingVector::new((0..dim).map(|i| (i as f32 * 0.37 + offset).sin()).collect())
    }

    #[test]
    fn test_identical_vectors_score_100() {
        let a = ramp(DIM, 0.0);
        assert_eq!(vector_score(&a, &a.clone()).unwrap(), 100);
    }

    #[test]
    fn test_scaled_vector_scores_100() {
        let a = EmbeddingVector::new(vec![0.5; DIM]);
        let b = EmbeddingVector::new(vec![2.0; DIM]);
        assert_eq!(vector_score(&a, &b).unwrap(), 100);
    }

    #[test]
    fn test_zero_vector_scores_0() {
        let zero = EmbeddingVector::new(vec![0.0; DIM]);
        let other = ramp(DIM, 1.0);
        assert_eq!(vector_score(&zero, &other).unwrap(), 0);
        assert_eq!(vector_score(&other, &zero).unwrap(), 0);
    }

    #[test]
    fn test_absent_vector_scores_0() {
        let other = ramp(DIM, 1.0);
        assert_eq!(vector_score(&EmbeddingVector::absent(), &other).unwrap(), 0);
        assert_eq!(
            vector_score(&EmbeddingVector::absent(), &EmbeddingVector::absent()).unwrap(),
            0
        );
    }

    #[test]
    fn test_opposite_vectors_clamp_to_0() {
        let a = EmbeddingVector::new(vec![1.0, 2.0, 3.0]);
        let b = EmbeddingVector::new(vec![-1.0, -2.0, -3.0]);
        assert_eq!(vector_score(&a, &b).unwrap(), 0);
    }

    #[test]
    fn test_orthogonal_vectors_score_0() {
        let a = EmbeddingVector::new(vec![1.0, 0.0]);
        let b = EmbeddingVector::new(vec![0.0, 1.0]);
        assert_eq!(vector_score(&a, &b).unwrap(), 0);
    }

    #[test]
    fn test_partial_similarity_floors() {
        // cos(45°) = 0.7071 -> 70
        let a = EmbeddingVector::new(vec![1.0, 0.0]);
        let b = EmbeddingVector::new(vec![1.0, 1.0]);
        assert_eq!(vector_score(&a, &b).unwrap(), 70);
    }

    #[test]
    fn test_score_is_symmetric() {
        for offset in [0.1_f32, 0.7, 1.3, 2.9] {
            let a = ramp(DIM, 0.0);
            let b = ramp(DIM, offset);
            assert_eq!(vector_score(&a, &b).unwrap(), vector_score(&b, &a).unwrap());
        }
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let a = ramp(DIM, 0.0);
        let b = ramp(DIM - 1, 0.0);
        assert_eq!(
            vector_score(&a, &b),
            Err(MatchError::DimensionMismatch {
                left: DIM,
                right: DIM - 1
            })
        );
    }

    #[test]
    fn test_non_finite_is_error() {
        let a = EmbeddingVector::new(vec![1.0, f32::NAN]);
        let b = EmbeddingVector::new(vec![1.0, 1.0]);
        assert_eq!(
            vector_score(&a, &b),
            Err(MatchError::NonFiniteEmbedding { side: Side::Cv })
        );
    }

    #[test]
    fn test_score_bounded() {
        for offset in 0..20 {
            let score = vector_score(&ramp(16, 0.0), &ramp(16, offset as f32 * 0.5)).unwrap();
            assert!(score <= 100);
        }
    }

    #[test]
    fn test_normalized_has_unit_magnitude() {
        let v = EmbeddingVector::new(vec![3.0, 4.0]);
        let n = v.normalized();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(n.as_slice(), &[0.6, 0.8]);
        assert_eq!(vector_score(&v, &n).unwrap(), 100);
    }

    #[test]
    fn test_normalizing_inputs_keeps_score() {
        for offset in [0.2_f32, 0.9, 1.7] {
            let a = ramp(DIM, 0.0);
            let scaled = ramp(DIM, offset).as_slice().iter().map(|x| x * 3.0).collect();
            let b = EmbeddingVector::new(scaled);
            let raw = vector_score(&a, &b).unwrap();
            let unit = vector_score(&a.normalized(), &b.normalized()).unwrap();
            assert!(raw.abs_diff(unit) <= 1, "{raw} vs {unit}");
        }
    }

    #[test]
    fn test_normalized_zero_is_unchanged() {
        let zero = EmbeddingVector::new(vec![0.0; 4]);
        assert_eq!(zero.normalized(), zero);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_check_dimension() {
        let v = ramp(8, 0.0);
        assert!(v.check_dimension(8, Side::Cv).is_ok());
        assert!(EmbeddingVector::absent().check_dimension(8, Side::Role).is_ok());
        assert_eq!(
            v.check_dimension(384, Side::Role),
            Err(MatchError::UnexpectedDimension {
                side: Side::Role,
                expected: 384,
                actual: 8
            })
        );
    }
}
