use nalgebra::Point3;

/// Euclidean distance `sqrt(Σ (xi − yi)²)` between two points.
pub fn euclidean_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Returns `count` indices spread evenly over `0..len`, always including the first
/// and last index when `count >= 2`. Duplicates are removed, so short inputs yield
/// fewer than `count` indices.
pub fn evenly_spaced_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }
    if count == 1 || len == 1 {
        return vec![0];
    }

    let last = (len - 1) as f64;
    let steps = (count - 1) as f64;
    let mut indices: Vec<usize> = (0..count)
        .map(|i| ((i as f64) * last / steps).round() as usize)
        .collect();
    indices.dedup();
    indices
}
