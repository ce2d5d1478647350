//! Cosine distance over feature-vector rows

use ndarray::{Array2, ArrayView1};

/// Cosine distance `1 - a.b / (|a||b|)`.
///
/// By convention the distance is 1.0 when either vector has zero norm, so
/// all-zero rows never divide by zero. For the non-negative vectors this
/// pipeline produces the result lies in [0, 1].
pub fn cosine_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

/// Cosine distance between plain slices (centroids are held as `Vec<f64>`).
pub fn cosine_distance_slice(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

/// Symmetric `n x n` matrix of pairwise cosine distances between the rows
/// of a feature matrix. This is the O(n^2) heart of the pipeline and the
/// artifact served by the distance cache.
pub fn pairwise_distances(matrix: &Array2<f64>) -> Array2<f64> {
    let n = matrix.nrows();
    let mut distances = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = cosine_distance(matrix.row(i), matrix.row(j));
            distances[[i, j]] = d;
            distances[[j, i]] = d;
        }
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn identical_direction_is_zero() {
        let m = array![[1.0, 2.0, 0.0], [2.0, 4.0, 0.0]];
        let d = cosine_distance(m.row(0), m.row(1));
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn orthogonal_is_one() {
        let m = array![[1.0, 0.0], [0.0, 1.0]];
        let d = cosine_distance(m.row(0), m.row(1));
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_norm_is_one_by_convention() {
        let m = array![[0.0, 0.0], [1.0, 1.0]];
        assert_eq!(cosine_distance(m.row(0), m.row(1)), 1.0);
        assert_eq!(cosine_distance(m.row(0), m.row(0)), 1.0);
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let m = array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 0.0]];
        let d = pairwise_distances(&m);
        assert_eq!(d.shape(), &[3, 3]);
        for i in 0..3 {
            assert_eq!(d[[i, i]], 0.0);
            for j in 0..3 {
                assert_eq!(d[[i, j]], d[[j, i]]);
            }
        }
    }

    #[test]
    fn slice_distance_matches_view_distance() {
        let m = array![[1.0, 2.0, 3.0], [3.0, 1.0, 0.5]];
        let view = cosine_distance(m.row(0), m.row(1));
        let slice = cosine_distance_slice(&[1.0, 2.0, 3.0], &[3.0, 1.0, 0.5]);
        assert!((view - slice).abs() < 1e-12);
    }
}
