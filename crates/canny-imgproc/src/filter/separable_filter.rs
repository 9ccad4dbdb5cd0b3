use canny_image::PixelBuffer;

use super::kernels;
use crate::error::CannyError;

/// Narrow a floating point accumulation to a byte.
///
/// The value is rounded to the nearest integer and clamped to `[0, 255]`.
#[inline]
pub fn saturate_u8(val: f64) -> u8 {
    val.round().clamp(0.0, 255.0) as u8
}

/// Half-open range of coordinates whose full kernel footprint lies inside `[0, len)`.
///
/// Empty when the image is narrower than the kernel.
#[inline]
fn interior(len: usize, half: usize) -> std::ops::Range<usize> {
    half..len.saturating_sub(half).max(half)
}

/// Convolve every interior row of `src` with `kernel`, writing into `dst`.
fn convolve_rows(src: &PixelBuffer, dst: &mut PixelBuffer, kernel: &[f64]) {
    let cols = src.cols();
    let half = kernel.len() / 2;
    let src_data = src.as_slice();
    let dst_data = dst.as_slice_mut();

    for r in interior(src.rows(), half) {
        let row = &src_data[r * cols..(r + 1) * cols];
        let row_dst = &mut dst_data[r * cols..(r + 1) * cols];

        for c in interior(cols, half) {
            let window = &row[c - half..c - half + kernel.len()];
            let acc = window
                .iter()
                .zip(kernel.iter())
                .map(|(&px, &k)| px as f64 * k)
                .sum::<f64>();
            row_dst[c] = saturate_u8(acc);
        }
    }
}

/// Convolve every interior column of `src` with `kernel`, writing into `dst`.
fn convolve_cols(src: &PixelBuffer, dst: &mut PixelBuffer, kernel: &[f64]) {
    let half = kernel.len() / 2;

    for r in interior(src.rows(), half) {
        for c in interior(src.cols(), half) {
            let acc = kernel
                .iter()
                .enumerate()
                .map(|(t, &k)| src.pixel(c, r - half + t) as f64 * k)
                .sum::<f64>();
            *dst.pixel_mut(c, r) = saturate_u8(acc);
        }
    }
}

/// Smooth an image with a 1-D kernel along each axis independently.
///
/// `dst_x` receives the horizontal convolution and `dst_y` the vertical one. Both
/// are first seeded with a full copy of `src`; only pixels whose kernel footprint
/// fits inside the image (`k/2 <= x < width - k/2` and `k/2 <= y < height - k/2`)
/// are recomputed, every other pixel keeps its unfiltered value.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst_x` - The horizontally smoothed image.
/// * `dst_y` - The vertically smoothed image.
/// * `kernel` - The 1-D kernel weights.
///
/// PRECONDITION: `src`, `dst_x` and `dst_y` must have the same size.
///
/// # Examples
///
/// ```
/// use canny_image::{ImageSize, PixelBuffer};
/// use canny_imgproc::filter::smooth_separable;
///
/// let size = ImageSize { width: 3, height: 3 };
/// let src = PixelBuffer::new(size, vec![0, 0, 0, 30, 60, 90, 0, 0, 0]).unwrap();
///
/// let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
/// let mut smoothed_y = PixelBuffer::from_size_val(size, 0);
/// smooth_separable(&src, &mut smoothed_x, &mut smoothed_y, &[0.25, 0.5, 0.25]).unwrap();
///
/// assert_eq!(smoothed_x.as_slice(), &[0, 0, 0, 30, 60, 90, 0, 0, 0]);
/// assert_eq!(smoothed_y.as_slice(), &[0, 0, 0, 30, 30, 90, 0, 0, 0]);
/// ```
pub fn smooth_separable(
    src: &PixelBuffer,
    dst_x: &mut PixelBuffer,
    dst_y: &mut PixelBuffer,
    kernel: &[f64],
) -> Result<(), CannyError> {
    if kernel.is_empty() {
        return Err(CannyError::InvalidKernelLength(0));
    }

    crate::ensure_same_size(src, &[&*dst_x, &*dst_y])?;

    dst_x.copy_from(src)?;
    dst_y.copy_from(src)?;

    convolve_rows(src, dst_x, kernel);
    convolve_cols(src, dst_y, kernel);

    Ok(())
}

/// Smooth an image with a normalized gaussian kernel along each axis.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst_x` - The horizontally smoothed image.
/// * `dst_y` - The vertically smoothed image.
/// * `kernel_size` - The number of taps of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// PRECONDITION: `src`, `dst_x` and `dst_y` must have the same size.
pub fn gaussian_smooth(
    src: &PixelBuffer,
    dst_x: &mut PixelBuffer,
    dst_y: &mut PixelBuffer,
    kernel_size: usize,
    sigma: f64,
) -> Result<(), CannyError> {
    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma)?;
    smooth_separable(src, dst_x, dst_y, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use canny_image::ImageSize;

    #[test]
    fn test_saturate_u8() {
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(254.6), 255);
        assert_eq!(saturate_u8(254.999_999), 255);
        assert_eq!(saturate_u8(300.0), 255);
        assert_eq!(saturate_u8(40.2), 40);
    }

    #[test]
    fn test_smooth_separable_impulse() -> Result<(), CannyError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = PixelBuffer::new(
            size,
            vec![
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
                0, 0, 200, 0, 0,
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
            ],
        )?;

        let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
        let mut smoothed_y = PixelBuffer::from_size_val(size, 0);
        smooth_separable(&img, &mut smoothed_x, &mut smoothed_y, &[0.25, 0.5, 0.25])?;

        #[rustfmt::skip]
        assert_eq!(
            smoothed_x.as_slice(),
            &[
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
                0, 50, 100, 50, 0,
                0, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
            ]
        );

        #[rustfmt::skip]
        assert_eq!(
            smoothed_y.as_slice(),
            &[
                0, 0, 0, 0, 0,
                0, 0, 50, 0, 0,
                0, 0, 100, 0, 0,
                0, 0, 50, 0, 0,
                0, 0, 0, 0, 0,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_smooth_separable_keeps_border() -> Result<(), CannyError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };

        #[rustfmt::skip]
        let img = PixelBuffer::new(
            size,
            vec![
                10, 20, 30, 40,
                50, 60, 70, 80,
                90, 100, 110, 120,
            ],
        )?;

        // stale contents in the destinations must be overwritten
        let mut smoothed_x = PixelBuffer::from_size_val(size, 255);
        let mut smoothed_y = PixelBuffer::from_size_val(size, 255);
        smooth_separable(&img, &mut smoothed_x, &mut smoothed_y, &[0.5, 0.0, 0.5])?;

        #[rustfmt::skip]
        assert_eq!(
            smoothed_x.as_slice(),
            &[
                10, 20, 30, 40,
                50, 60, 70, 80,
                90, 100, 110, 120,
            ]
        );

        #[rustfmt::skip]
        assert_eq!(
            smoothed_y.as_slice(),
            &[
                10, 20, 30, 40,
                50, 60, 70, 80,
                90, 100, 110, 120,
            ]
        );

        Ok(())
    }

    #[test]
    fn test_smooth_separable_reads_source_only() -> Result<(), CannyError> {
        // a shifting kernel would smear the ramp if outputs were read back as inputs
        let size = ImageSize {
            width: 5,
            height: 3,
        };

        #[rustfmt::skip]
        let img = PixelBuffer::new(
            size,
            vec![
                0, 0, 0, 0, 0,
                0, 10, 20, 30, 40,
                0, 0, 0, 0, 0,
            ],
        )?;

        let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
        let mut smoothed_y = PixelBuffer::from_size_val(size, 0);
        smooth_separable(&img, &mut smoothed_x, &mut smoothed_y, &[1.0, 0.0, 0.0])?;

        assert_eq!(&smoothed_x.as_slice()[5..10], &[0, 0, 10, 20, 40]);
        assert_eq!(&smoothed_y.as_slice()[5..10], &[0, 0, 0, 0, 40]);

        Ok(())
    }

    #[test]
    fn test_smooth_separable_kernel_one_is_identity() -> Result<(), CannyError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let data = (0..16).map(|v| (v * 15) as u8).collect::<Vec<_>>();
        let img = PixelBuffer::new(size, data)?;

        let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
        let mut smoothed_y = PixelBuffer::from_size_val(size, 0);
        gaussian_smooth(&img, &mut smoothed_x, &mut smoothed_y, 1, 0.5)?;

        assert_eq!(smoothed_x, img);
        assert_eq!(smoothed_y, img);

        Ok(())
    }

    #[test]
    fn test_smooth_separable_small_image_is_copy() -> Result<(), CannyError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let img = PixelBuffer::new(size, vec![7, 200])?;

        let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
        let mut smoothed_y = PixelBuffer::from_size_val(size, 0);
        gaussian_smooth(&img, &mut smoothed_x, &mut smoothed_y, 5, 1.0)?;

        assert_eq!(smoothed_x, img);
        assert_eq!(smoothed_y, img);

        Ok(())
    }

    #[test]
    fn test_smooth_separable_errors() {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let img = PixelBuffer::from_size_val(size, 0);
        let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
        let mut smoothed_y = PixelBuffer::from_size_val(size, 0);

        assert_eq!(
            smooth_separable(&img, &mut smoothed_x, &mut smoothed_y, &[]),
            Err(CannyError::InvalidKernelLength(0))
        );

        let mut wrong = PixelBuffer::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        );
        assert!(matches!(
            smooth_separable(&img, &mut smoothed_x, &mut wrong, &[1.0]),
            Err(CannyError::ImageError(_))
        ));
    }
}
