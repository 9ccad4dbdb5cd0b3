#![deny(missing_docs)]
//! Owned grayscale pixel buffers used by the edge detection pipeline.

/// grayscale pixel buffer representation.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{ImageSize, PixelBuffer};
