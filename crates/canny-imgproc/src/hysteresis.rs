use canny_image::PixelBuffer;

use crate::error::CannyError;
use crate::suppression::EDGE;

/// The high/low threshold pair used to confirm edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Magnitudes strictly above this value seed an edge.
    pub high: u8,
    /// Magnitudes strictly above this value extend an edge from a seed.
    pub low: u8,
}

impl Thresholds {
    /// Create a validated threshold pair.
    ///
    /// # Errors
    ///
    /// Returns [`CannyError::InvalidThresholds`] if `low > high`.
    pub fn new(high: u8, low: u8) -> Result<Self, CannyError> {
        let thresholds = Self { high, low };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that `low <= high`.
    pub fn validate(&self) -> Result<(), CannyError> {
        if self.low > self.high {
            return Err(CannyError::InvalidThresholds {
                high: self.high,
                low: self.low,
            });
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { high: 10, low: 4 }
    }
}

/// Mark pixels along a ray until the magnitude drops to `low` or below.
fn walk_ray(
    coords: impl Iterator<Item = (usize, usize)>,
    mag: &PixelBuffer,
    low: u8,
    dst: &mut PixelBuffer,
) {
    for (x, y) in coords {
        if mag.pixel(x, y) <= low {
            break;
        }
        *dst.pixel_mut(x, y) = EDGE;
    }
}

/// Promote suppressed ridges to edges with a high/low threshold pair.
///
/// A pixel is a seed when `suppressed` is [`EDGE`] and its magnitude is above
/// `thresholds.high`. From each seed four rays are walked along the seed's own
/// row and column (up, down, left, right), marking every pixel whose magnitude
/// is above `thresholds.low` and stopping at the first one that is not. Rays do
/// not branch from the pixels they mark, so diagonal continuations of an edge
/// are only kept when they were already present in `suppressed`.
///
/// `dst` starts as a copy of `suppressed`; pixels no ray visits keep that value.
///
/// # Arguments
///
/// * `suppressed` - The output of the non-maximum suppression.
/// * `mag` - The gradient magnitude.
/// * `thresholds` - The high/low threshold pair.
/// * `dst` - The edge image, with values in `{0, 255}` when `suppressed` is binary.
///
/// # Returns
///
/// The number of seed pixels.
///
/// PRECONDITION: all the images must have the same size.
pub fn hysteresis_threshold(
    suppressed: &PixelBuffer,
    mag: &PixelBuffer,
    thresholds: &Thresholds,
    dst: &mut PixelBuffer,
) -> Result<usize, CannyError> {
    thresholds.validate()?;
    crate::ensure_same_size(suppressed, &[mag, &*dst])?;

    dst.copy_from(suppressed)?;

    let (cols, rows) = (suppressed.cols(), suppressed.rows());
    let low = thresholds.low;
    let mut num_seeds = 0;

    for r in 0..rows {
        for c in 0..cols {
            if suppressed.pixel(c, r) != EDGE || mag.pixel(c, r) <= thresholds.high {
                continue;
            }
            num_seeds += 1;

            walk_ray((0..=r).rev().map(|y| (c, y)), mag, low, dst);
            walk_ray((r..rows).map(|y| (c, y)), mag, low, dst);
            walk_ray((0..=c).rev().map(|x| (x, r)), mag, low, dst);
            walk_ray((c..cols).map(|x| (x, r)), mag, low, dst);
        }
    }

    Ok(num_seeds)
}
