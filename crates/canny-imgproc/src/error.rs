/// Errors that can occur while running the edge detection pipeline.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CannyError {
    /// Error related to the pixel buffers.
    #[error(transparent)]
    ImageError(#[from] canny_image::ImageError),

    /// The kernel length is zero, or even where an odd length is required.
    #[error("Invalid kernel length: {0}")]
    InvalidKernelLength(usize),

    /// Sigma must be finite and strictly positive.
    #[error("Invalid gaussian sigma: {0}")]
    InvalidSigma(f64),

    /// The raw kernel weights sum to zero (or a non-finite value) and cannot be normalized.
    #[error("Degenerate kernel, weights sum to {0}")]
    DegenerateKernel(f64),

    /// The low threshold exceeds the high threshold.
    #[error("Low threshold ({low}) must not exceed high threshold ({high})")]
    InvalidThresholds {
        /// The high threshold.
        high: u8,
        /// The low threshold.
        low: u8,
    },
}
