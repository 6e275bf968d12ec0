use ndarray::{Array3, Axis};

use super::rotate::{premultiply, to_level};
use super::{require_pixels, Resize};
use crate::error::Result;
use crate::grid::{PixelGrid, CHANNELS};

/// Largest width or height a resize may produce
pub const MAX_DIMENSION: u32 = 65_535;

/// Largest pixel count a resampled output may have
pub const MAX_PIXELS: u64 = 1 << 26;

/// Contributions of source samples to one output sample
struct Kernel {
    start: usize,
    weights: Vec<f32>,
}

/// Resample to the size described by `target`.
///
/// Separable tent filter. The support widens with the downscale ratio, so
/// shrinking averages the covered area and enlarging is bilinear.
/// Interpolation runs on premultiplied alpha.
pub fn resize(grid: &PixelGrid, target: Resize) -> Result<PixelGrid> {
    require_pixels(grid)?;

    let (width, height) = grid.dimensions();
    let (new_width, new_height) = target.target(width, height)?;
    if (new_width, new_height) == (width, height) {
        return Ok(grid.clone());
    }

    let premultiplied = premultiply(grid.as_array());
    let horizontal = resample_axis(&premultiplied, Axis(1), new_width as usize);
    let resampled = resample_axis(&horizontal, Axis(0), new_height as usize);

    let mut out = Array3::<u8>::zeros((new_height as usize, new_width as usize, CHANNELS));
    for (mut pixel, sample) in out
        .lanes_mut(Axis(2))
        .into_iter()
        .zip(resampled.lanes(Axis(2)))
    {
        let alpha = sample[3];
        if alpha <= 0.0 {
            continue;
        }
        for c in 0..3 {
            pixel[c] = to_level(sample[c] * 255.0 / alpha);
        }
        pixel[3] = to_level(alpha);
    }

    PixelGrid::from_array(out, grid.mode())
}

fn resample_axis(data: &Array3<f32>, axis: Axis, new_len: usize) -> Array3<f32> {
    let kernels = kernels(data.len_of(axis), new_len);

    let mut shape = data.raw_dim();
    shape[axis.index()] = new_len;
    let mut out = Array3::<f32>::zeros(shape);

    for (i, kernel) in kernels.iter().enumerate() {
        let mut dst = out.index_axis_mut(axis, i);
        for (k, &weight) in kernel.weights.iter().enumerate() {
            let src = data.index_axis(axis, kernel.start + k);
            dst.scaled_add(weight, &src);
        }
    }
    out
}

fn kernels(src_len: usize, dst_len: usize) -> Vec<Kernel> {
    let ratio = src_len as f64 / dst_len as f64;
    let support = ratio.max(1.0);

    (0..dst_len)
        .map(|i| {
            // Output sample centre mapped into source sample space
            let center = (i as f64 + 0.5) * ratio - 0.5;
            let first = (center - support).floor().max(0.0) as usize;
            let last = ((center + support).ceil() as usize).min(src_len - 1);

            let mut weights: Vec<f32> = (first..=last)
                .map(|j| (1.0 - (j as f64 - center).abs() / support).max(0.0) as f32)
                .collect();

            // The nearest sample is always within half a sample of the
            // centre, so the total is positive
            let total: f32 = weights.iter().sum();
            weights.iter_mut().for_each(|w| *w /= total);

            Kernel {
                start: first,
                weights,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_weights_normalized() {
        for (src, dst) in [(10, 3), (3, 10), (7, 7), (1, 5), (5, 1)] {
            for kernel in kernels(src, dst) {
                let total: f32 = kernel.weights.iter().sum();
                assert!((total - 1.0).abs() < 1e-5, "{src}->{dst}: {total}");
                assert!(kernel.start + kernel.weights.len() <= src);
            }
        }
    }

    #[test]
    fn test_kernel_same_size_is_identity() {
        for (i, kernel) in kernels(5, 5).iter().enumerate() {
            for (k, &w) in kernel.weights.iter().enumerate() {
                let expected = if kernel.start + k == i { 1.0 } else { 0.0 };
                assert!((w - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_kernel_halving_averages_pairs() {
        let kernels = kernels(4, 2);
        // Output 0 is centred between source 0 and 1
        let first = &kernels[0];
        assert_eq!(first.start, 0);
        assert!((first.weights[0] - first.weights[1]).abs() < 1e-6);
    }
}
