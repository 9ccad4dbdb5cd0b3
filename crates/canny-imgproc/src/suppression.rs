use std::f64::consts::FRAC_PI_4;

use canny_image::{ImageError, PixelBuffer};

/// Value written for pixels that survive the suppression.
pub const EDGE: u8 = 255;

/// Binarized local edge orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOrientation {
    /// The magnitude is compared with the neighbours along x.
    Horizontal,
    /// The magnitude is compared with the neighbours along y.
    Vertical,
}

impl EdgeOrientation {
    /// Classify the orientation from the gradient components.
    ///
    /// The pixel is [`EdgeOrientation::Vertical`] when `pi/4 < |atan2(dy, dx)| < 3pi/4`
    /// and [`EdgeOrientation::Horizontal`] otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use canny_imgproc::suppression::EdgeOrientation;
    ///
    /// assert_eq!(EdgeOrientation::from_gradient(0, 10), EdgeOrientation::Vertical);
    /// assert_eq!(EdgeOrientation::from_gradient(10, 0), EdgeOrientation::Horizontal);
    /// ```
    pub fn from_gradient(dx: u8, dy: u8) -> Self {
        let angle = (dy as f64).atan2(dx as f64).abs();
        if angle > FRAC_PI_4 && angle < 3.0 * FRAC_PI_4 {
            EdgeOrientation::Vertical
        } else {
            EdgeOrientation::Horizontal
        }
    }
}

/// Check whether the magnitude at `(x, y)` strictly exceeds its neighbours along the
/// comparison axis. Border pixels only compare with the neighbour that exists.
fn is_local_max(mag: &PixelBuffer, x: usize, y: usize, orientation: EdgeOrientation) -> bool {
    let (pos, len) = match orientation {
        EdgeOrientation::Horizontal => (x, mag.cols()),
        EdgeOrientation::Vertical => (y, mag.rows()),
    };

    // a single row or column has nothing to compare against
    if len < 2 {
        return false;
    }

    let neighbor = |p: usize| match orientation {
        EdgeOrientation::Horizontal => mag.pixel(p, y),
        EdgeOrientation::Vertical => mag.pixel(x, p),
    };

    let center = mag.pixel(x, y);
    let above_prev = pos == 0 || center > neighbor(pos - 1);
    let above_next = pos == len - 1 || center > neighbor(pos + 1);

    above_prev && above_next
}

/// Thin a gradient magnitude image to single pixel wide ridges.
///
/// Every pixel, the outer frame included, is classified with
/// [`EdgeOrientation::from_gradient`] and set to [`EDGE`] if its magnitude is a strict
/// local maximum along the matching axis, or to 0 otherwise.
///
/// # Arguments
///
/// * `mag` - The gradient magnitude.
/// * `dx` - The derivative along x.
/// * `dy` - The derivative along y.
/// * `dst` - The suppressed image, with values in `{0, 255}`.
///
/// PRECONDITION: all the images must have the same size.
pub fn non_max_suppression(
    mag: &PixelBuffer,
    dx: &PixelBuffer,
    dy: &PixelBuffer,
    dst: &mut PixelBuffer,
) -> Result<(), ImageError> {
    crate::ensure_same_size(mag, &[dx, dy, &*dst])?;

    for r in 0..mag.rows() {
        for c in 0..mag.cols() {
            let orientation = EdgeOrientation::from_gradient(dx.pixel(c, r), dy.pixel(c, r));
            *dst.pixel_mut(c, r) = if is_local_max(mag, c, r, orientation) {
                EDGE
            } else {
                0
            };
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canny_image::ImageSize;

    #[test]
    fn test_edge_orientation() {
        assert_eq!(EdgeOrientation::from_gradient(0, 0), EdgeOrientation::Horizontal);
        assert_eq!(EdgeOrientation::from_gradient(50, 0), EdgeOrientation::Horizontal);
        assert_eq!(EdgeOrientation::from_gradient(50, 49), EdgeOrientation::Horizontal);
        assert_eq!(EdgeOrientation::from_gradient(49, 50), EdgeOrientation::Vertical);
        assert_eq!(EdgeOrientation::from_gradient(0, 1), EdgeOrientation::Vertical);
    }

    #[test]
    fn test_non_max_suppression_horizontal() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 1,
        };
        let mag = PixelBuffer::new(size, vec![10, 20, 15, 15, 30])?;
        let dx = PixelBuffer::from_size_val(size, 100);
        let dy = PixelBuffer::from_size_val(size, 0);

        let mut suppressed = PixelBuffer::from_size_val(size, 0);
        non_max_suppression(&mag, &dx, &dy, &mut suppressed)?;

        // plateaus are not strict maxima, the last pixel only compares to the left
        assert_eq!(suppressed.as_slice(), &[0, 255, 0, 0, 255]);
        Ok(())
    }

    #[test]
    fn test_non_max_suppression_vertical() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 1,
            height: 4,
        };
        let mag = PixelBuffer::new(size, vec![9, 3, 7, 2])?;
        let dx = PixelBuffer::from_size_val(size, 0);
        let dy = PixelBuffer::from_size_val(size, 100);

        let mut suppressed = PixelBuffer::from_size_val(size, 0);
        non_max_suppression(&mag, &dx, &dy, &mut suppressed)?;

        assert_eq!(suppressed.as_slice(), &[255, 0, 255, 0]);
        Ok(())
    }

    #[test]
    fn test_non_max_suppression_uses_orientation() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };

        // the centre is a maximum along y but not along x
        #[rustfmt::skip]
        let mag = PixelBuffer::new(
            size,
            vec![
                0, 1, 0,
                90, 50, 90,
                0, 1, 0,
            ],
        )?;

        let mut suppressed = PixelBuffer::from_size_val(size, 0);

        let zeros = PixelBuffer::from_size_val(size, 0);
        let strong = PixelBuffer::from_size_val(size, 80);
        non_max_suppression(&mag, &zeros, &strong, &mut suppressed)?;
        assert_eq!(suppressed.pixel(1, 1), 255);

        non_max_suppression(&mag, &strong, &zeros, &mut suppressed)?;
        assert_eq!(suppressed.pixel(1, 1), 0);

        Ok(())
    }

    #[test]
    fn test_non_max_suppression_single_column_horizontal() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 1,
            height: 2,
        };
        let mag = PixelBuffer::new(size, vec![200, 100])?;
        let dx = PixelBuffer::from_size_val(size, 10);
        let dy = PixelBuffer::from_size_val(size, 0);

        let mut suppressed = PixelBuffer::from_size_val(size, 0);
        non_max_suppression(&mag, &dx, &dy, &mut suppressed)?;

        assert_eq!(suppressed.as_slice(), &[0, 0]);
        Ok(())
    }

    #[test]
    fn test_non_max_suppression_is_binary() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 6,
        };
        let data = (0..42).map(|v| ((v * 37) % 251) as u8).collect::<Vec<_>>();
        let mag = PixelBuffer::new(size, data.clone())?;
        let dx = PixelBuffer::new(size, data.iter().rev().copied().collect())?;
        let dy = PixelBuffer::new(size, data)?;

        let mut suppressed = PixelBuffer::from_size_val(size, 17);
        non_max_suppression(&mag, &dx, &dy, &mut suppressed)?;

        assert!(suppressed.as_slice().iter().all(|&v| v == 0 || v == EDGE));
        Ok(())
    }
}
