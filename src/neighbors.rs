//! Euclidean distance and nearest-neighbor ranking over labeled points.
//!
//! Every point carries its class label in the last coordinate, so distances
//! only look at the leading feature coordinates.

use thiserror::Error;

/// Errors raised by [`nearest`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeighborError {
    /// More neighbors were requested than there are points in the space.
    #[error("requested {requested} neighbors but the space only holds {available} points")]
    NotEnoughPoints { requested: usize, available: usize },
}

/// Euclidean distance between two labeled points, ignoring the trailing label.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "points must have the same length");

    let features = a.len().saturating_sub(1);
    a.iter()
        .zip(b)
        .take(features)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Returns the `k` smallest distances from `query` to the points of `space`,
/// in ascending order. Equal distances keep their insertion order.
pub fn nearest<P: AsRef<[f64]>>(
    space: &[P],
    query: &[f64],
    k: usize,
) -> Result<Vec<f64>, NeighborError> {
    if k > space.len() {
        return Err(NeighborError::NotEnoughPoints {
            requested: k,
            available: space.len(),
        });
    }

    let mut dists: Vec<f64> = space
        .iter()
        .map(|point| distance(query, point.as_ref()))
        .collect();
    dists.sort_by(f64::total_cmp);
    dists.truncate(k);

    Ok(dists)
}

/// Two-feature sample points; the last coordinate is the class.
pub const SAMPLE_POINTS: [[f64; 3]; 10] = [
    [2.7810836, 2.550537003, 0.0],
    [1.465489372, 2.362125076, 0.0],
    [3.396561688, 4.400293529, 0.0],
    [1.38807019, 1.850220317, 0.0],
    [3.06407232, 3.005305973, 0.0],
    [7.627531214, 2.759262235, 1.0],
    [5.332441248, 2.088626775, 1.0],
    [6.922596716, 1.77106367, 1.0],
    [8.675418651, -0.242068655, 1.0],
    [7.673756466, 3.508563011, 1.0],
];
