//! Post-processing helpers for acquired 1D traces and 2D masks.

use ndarray as nd;
use crate::error::{ StateError, StateResult };

/// Smooth a 1D trace with a uniform moving-average kernel of width `window`.
///
/// Matches "same"-mode convolution in the interior; the first `window / 2`
/// and last `(window + 1) / 2` samples are passed through unsmoothed instead
/// of being averaged against zero padding.
pub fn smooth_moving_avg(data: &nd::Array1<f64>, window: usize)
    -> StateResult<nd::Array1<f64>>
{
    let n = data.len();
    if window == 0 || window > n {
        return Err(StateError::InvalidWindow { window, len: n });
    }
    let shift = (window - 1) / 2;
    let mut out: nd::Array1<f64> = nd::Array1::zeros(n);
    for i in 0..n {
        let hi = (i + shift).min(n - 1);
        let lo = (i + shift + 1).saturating_sub(window);
        out[i] = data.slice(nd::s![lo..=hi]).sum() / window as f64;
    }
    for i in 0..window / 2 {
        out[i] = data[i];
    }
    for i in n - (window + 1) / 2..n {
        out[i] = data[i];
    }
    Ok(out)
}

/// Generate an `n`-by-`n` mask holding 1.0 inside the circle of radius
/// `radius` (defaulting to `n / 2`) centered at `(n / 2 + xc, n / 2 + yc)`
/// and 0.0 outside.
pub fn circle_mask(n: usize, radius: Option<f64>, xc: f64, yc: f64)
    -> nd::Array2<f64>
{
    let r = radius.unwrap_or(n as f64 / 2.0);
    let c = n as f64 / 2.0;
    nd::Array2::from_shape_fn(
        (n, n),
        |(row, col)| {
            let dx = col as f64 - c - xc;
            let dy = row as f64 - c - yc;
            if dx.powi(2) + dy.powi(2) <= r.powi(2) { 1.0 } else { 0.0 }
        },
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interior_averages_edges_pinned() {
        let data = nd::array![1.0, 2.0, 3.0, 4.0, 10.0];
        let sm = smooth_moving_avg(&data, 3).unwrap();
        assert_eq!(sm[0], 1.0);
        assert!((sm[1] - 2.0).abs() < 1e-12);
        assert!((sm[2] - 3.0).abs() < 1e-12);
        assert_eq!(sm[3], 4.0);
        assert_eq!(sm[4], 10.0);
    }

    #[test]
    fn unit_window_is_identity() {
        let data = nd::array![0.5, -1.0, 2.0];
        let sm = smooth_moving_avg(&data, 1).unwrap();
        assert_eq!(sm, data);
    }

    #[test]
    fn even_window() {
        let data = nd::array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sm = smooth_moving_avg(&data, 4).unwrap();
        assert_eq!(sm[0], 1.0);
        assert_eq!(sm[1], 2.0);
        // same-mode convolution centers an even kernel one step late
        assert!((sm[2] - 2.5).abs() < 1e-12);
        assert!((sm[3] - 3.5).abs() < 1e-12);
        assert_eq!(sm[4], 5.0);
        assert_eq!(sm[5], 6.0);
    }

    #[test]
    fn window_bounds() {
        let data = nd::array![1.0, 2.0, 3.0];
        assert_eq!(
            smooth_moving_avg(&data, 0),
            Err(StateError::InvalidWindow { window: 0, len: 3 }),
        );
        assert_eq!(
            smooth_moving_avg(&data, 4),
            Err(StateError::InvalidWindow { window: 4, len: 3 }),
        );
    }

    #[test]
    fn mask_covers_center() {
        let mask = circle_mask(5, None, 0.0, 0.0);
        assert_eq!(mask.shape(), &[5, 5]);
        assert_eq!(mask[[2, 2]], 1.0);
        assert_eq!(mask[[0, 0]], 0.0);
        assert_eq!(mask[[0, 4]], 0.0);
    }

    #[test]
    fn mask_radius_and_offset() {
        let all = circle_mask(4, Some(10.0), 0.0, 0.0);
        assert!(all.iter().all(|&v| v == 1.0));
        let point = circle_mask(4, Some(0.0), 0.0, 0.0);
        assert_eq!(point.sum(), 1.0);
        assert_eq!(point[[2, 2]], 1.0);
        let shifted = circle_mask(4, Some(0.0), 1.0, -1.0);
        assert_eq!(shifted[[1, 3]], 1.0);
        assert_eq!(shifted.sum(), 1.0);
    }
}
