#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

use canny_image::{ImageError, PixelBuffer};

/// Error types for the edge detection pipeline.
pub mod error;

/// image filtering module.
pub mod filter;

/// finite-difference gradient estimation.
pub mod gradient;

/// non-maximum suppression of gradient magnitudes.
pub mod suppression;

/// hysteresis thresholding by axis-aligned ray walks.
pub mod hysteresis;

/// the full Canny pipeline and its configuration.
pub mod canny;

pub use crate::error::CannyError;

/// Return an error unless every buffer has the same size as `reference`.
pub(crate) fn ensure_same_size(
    reference: &PixelBuffer,
    others: &[&PixelBuffer],
) -> Result<(), ImageError> {
    for other in others {
        if other.size() != reference.size() {
            return Err(ImageError::InvalidImageSize(
                reference.width(),
                reference.height(),
                other.width(),
                other.height(),
            ));
        }
    }
    Ok(())
}
