use ndarray::{Array2, ArrayView2};

/// Replaces every NaN sample with 0.0. All other samples are copied bit for bit.
pub fn sanitize(image: ArrayView2<f64>) -> Array2<f64> {
    image.mapv(|v| if v.is_nan() { 0.0 } else { v })
}

pub fn count_invalid(image: ArrayView2<f64>) -> usize {
    image.iter().filter(|v| v.is_nan()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sanitize_example_grid() {
        let image = array![
            [f64::NAN, 1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0, 7.0],
            [8.0, 9.0, 10.0, 11.0],
            [12.0, 13.0, 14.0, f64::NAN],
        ];
        let expected = array![
            [0.0, 1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0, 7.0],
            [8.0, 9.0, 10.0, 11.0],
            [12.0, 13.0, 14.0, 0.0],
        ];

        assert_eq!(count_invalid(image.view()), 2);
        assert_eq!(sanitize(image.view()), expected);
    }

    #[test]
    fn test_sanitize_keeps_valid_bits() {
        let image = Array2::from_shape_fn((16, 16), |(r, c)| {
            if (r * 16 + c) % 5 == 0 {
                f64::NAN
            } else {
                -1.0e-300 * (r as f64) + 3.0e12 * (c as f64) - 0.0
            }
        });

        let clean = sanitize(image.view());

        assert_eq!(clean.dim(), image.dim());
        assert_eq!(count_invalid(clean.view()), 0);
        for (before, after) in image.iter().zip(clean.iter()) {
            if before.is_nan() {
                assert_eq!(*after, 0.0);
            } else {
                assert_eq!(before.to_bits(), after.to_bits());
            }
        }
    }

    #[test]
    fn test_sanitize_all_nan() {
        let image = Array2::from_elem((3, 5), f64::NAN);
        let clean = sanitize(image.view());
        assert!(clean.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_infinities_are_not_missing_data() {
        let image = array![[f64::INFINITY, f64::NEG_INFINITY]];
        assert_eq!(sanitize(image.view()), image);
    }
}
