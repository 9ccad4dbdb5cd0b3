use canny_image::{ImageError, PixelBuffer};

/// Compute absolute central differences of the smoothed images.
///
/// For every interior pixel (`1 <= x <= width - 2`, `1 <= y <= height - 2`):
///
/// * `dx[x, y] = |smoothed_x[x + 1, y] - smoothed_x[x - 1, y]|`
/// * `dy[x, y] = |smoothed_y[x, y + 1] - smoothed_y[x, y - 1]|`
///
/// The x derivative is taken from the horizontally smoothed image and the y
/// derivative from the vertically smoothed one. `dx` and `dy` are seeded with
/// copies of `smoothed_x` and `smoothed_y`, so their outer frame carries the
/// smoothed values through unchanged.
///
/// # Arguments
///
/// * `smoothed_x` - The horizontally smoothed image.
/// * `smoothed_y` - The vertically smoothed image.
/// * `dx` - The derivative along x.
/// * `dy` - The derivative along y.
///
/// PRECONDITION: all the images must have the same size.
pub fn central_difference(
    smoothed_x: &PixelBuffer,
    smoothed_y: &PixelBuffer,
    dx: &mut PixelBuffer,
    dy: &mut PixelBuffer,
) -> Result<(), ImageError> {
    crate::ensure_same_size(smoothed_x, &[smoothed_y, &*dx, &*dy])?;

    dx.copy_from(smoothed_x)?;
    dy.copy_from(smoothed_y)?;

    let (cols, rows) = (smoothed_x.cols(), smoothed_x.rows());
    if cols < 3 || rows < 3 {
        return Ok(());
    }

    for r in 1..rows - 1 {
        for c in 1..cols - 1 {
            *dx.pixel_mut(c, r) = smoothed_x.pixel(c + 1, r).abs_diff(smoothed_x.pixel(c - 1, r));
            *dy.pixel_mut(c, r) = smoothed_y.pixel(c, r + 1).abs_diff(smoothed_y.pixel(c, r - 1));
        }
    }

    Ok(())
}

/// Compute the gradient magnitude `sqrt(dx^2 + dy^2)`, saturated to a byte.
///
/// The magnitude is clamped to 255 and truncated toward zero. Only the interior
/// pixels are computed; `dst` is seeded with a copy of `dx` so the outer frame
/// carries the `dx` values through.
///
/// # Arguments
///
/// * `dx` - The derivative along x.
/// * `dy` - The derivative along y.
/// * `dst` - The gradient magnitude.
///
/// PRECONDITION: all the images must have the same size.
///
/// # Examples
///
/// ```
/// use canny_image::{ImageSize, PixelBuffer};
/// use canny_imgproc::gradient::magnitude;
///
/// let size = ImageSize { width: 3, height: 3 };
/// let dx = PixelBuffer::from_size_val(size, 3);
/// let dy = PixelBuffer::from_size_val(size, 4);
///
/// let mut mag = PixelBuffer::from_size_val(size, 0);
/// magnitude(&dx, &dy, &mut mag).unwrap();
///
/// assert_eq!(mag.as_slice(), &[3, 3, 3, 3, 5, 3, 3, 3, 3]);
/// ```
pub fn magnitude(
    dx: &PixelBuffer,
    dy: &PixelBuffer,
    dst: &mut PixelBuffer,
) -> Result<(), ImageError> {
    crate::ensure_same_size(dx, &[dy, &*dst])?;

    dst.copy_from(dx)?;

    let (cols, rows) = (dx.cols(), dx.rows());
    if cols < 3 || rows < 3 {
        return Ok(());
    }

    for r in 1..rows - 1 {
        for c in 1..cols - 1 {
            let gx = dx.pixel(c, r) as f64;
            let gy = dy.pixel(c, r) as f64;
            *dst.pixel_mut(c, r) = gx.hypot(gy).min(255.0) as u8;
        }
    }

    Ok(())
}
