use ndarray::ArrayView2;

/// Smallest and largest finite sample, or `None` if there are none.
pub fn min_max(image: ArrayView2<f64>) -> Option<(f64, f64)> {
    image
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The `q`-th percentile (0 to 100) of the finite samples.
///
/// Uses linear interpolation between the two closest ranks, so `q = 100`
/// is the maximum and `q = 0` the minimum. `q` outside [0, 100] is clamped.
/// Infinite samples never move a bound; they saturate once mapped.
pub fn percentile(image: ArrayView2<f64>, q: f64) -> Option<f64> {
    let mut values: Vec<f64> = image.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f64::total_cmp);

    let rank = q.clamp(0.0, 100.0) / 100.0 * (values.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    if fraction == 0.0 || values[lower] == values[upper] {
        return Some(values[lower]);
    }

    Some(values[lower] + (values[upper] - values[lower]) * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_min_max_skips_nan() {
        let image = array![[f64::NAN, -2.0], [7.5, 3.0]];
        assert_eq!(min_max(image.view()), Some((-2.0, 7.5)));
    }

    #[test]
    fn test_min_max_empty() {
        let image = Array2::from_elem((2, 2), f64::NAN);
        assert_eq!(min_max(image.view()), None);
    }

    #[test]
    fn test_percentile_extremes() {
        let image = array![[4.0, 1.0], [3.0, 2.0]];
        assert_eq!(percentile(image.view(), 0.0), Some(1.0));
        assert_eq!(percentile(image.view(), 100.0), Some(4.0));
    }

    #[test]
    fn test_percentile_interpolates() {
        // ranks 0..=4 over values 10..=50; 30th percentile sits at rank 1.2
        let image = array![[10.0, 20.0, 30.0, 40.0, 50.0]];
        let p = percentile(image.view(), 30.0).unwrap();
        assert!((p - 22.0).abs() < 1e-12);
        assert_eq!(percentile(image.view(), 50.0), Some(30.0));
    }

    #[test]
    fn test_percentile_ignores_nan() {
        let image = array![[f64::NAN, 1.0, 3.0]];
        assert_eq!(percentile(image.view(), 50.0), Some(2.0));
    }

    #[test]
    fn test_infinities_do_not_poison_bounds() {
        let image = array![[1.0, 2.0, f64::INFINITY]];
        assert_eq!(percentile(image.view(), 100.0), Some(2.0));

        let image = array![[f64::NEG_INFINITY, 0.0, 5.0, f64::INFINITY]];
        assert_eq!(min_max(image.view()), Some((0.0, 5.0)));
    }

    #[test]
    fn test_percentile_equal_ranks() {
        let image = array![[3.0, 3.0, 3.0, 9.0]];
        assert_eq!(percentile(image.view(), 40.0), Some(3.0));
    }
}
