use std::time::Instant;

use canny_image::PixelBuffer;

use crate::error::CannyError;
use crate::filter::{kernels, smooth_separable};
use crate::gradient::{central_difference, magnitude};
use crate::hysteresis::hysteresis_threshold;
use crate::suppression::non_max_suppression;

pub use crate::hysteresis::Thresholds;

/// A stage of the Canny pipeline, reported before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannyStage {
    /// Gaussian smoothing along each axis.
    Smoothing,
    /// Derivatives and gradient magnitude.
    Gradient,
    /// Non-maximum suppression.
    Suppression,
    /// Hysteresis thresholding.
    Hysteresis,
}

impl std::fmt::Display for CannyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            CannyStage::Smoothing => "Smoothing...",
            CannyStage::Gradient => "Getting Gradient...",
            CannyStage::Suppression => "Suppressing...",
            CannyStage::Hysteresis => "Applying Threshold...",
        };
        f.write_str(label)
    }
}

/// Parameters of the Canny pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CannyConfig {
    /// Standard deviation of the gaussian kernel.
    pub sigma: f64,
    /// Number of taps of the gaussian kernel. Must be odd.
    pub kernel_length: usize,
    /// The hysteresis threshold pair.
    pub thresholds: Thresholds,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            kernel_length: 3,
            thresholds: Thresholds::default(),
        }
    }
}

impl CannyConfig {
    /// Set the gaussian sigma.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the gaussian kernel length.
    pub fn with_kernel_length(mut self, kernel_length: usize) -> Self {
        self.kernel_length = kernel_length;
        self
    }

    /// Set the hysteresis thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Validate the configuration and build the normalized smoothing kernel.
    ///
    /// # Errors
    ///
    /// * [`CannyError::InvalidKernelLength`] if the kernel length is zero or even.
    /// * [`CannyError::InvalidSigma`] if sigma is not finite and positive.
    /// * [`CannyError::DegenerateKernel`] if the kernel weights sum to zero.
    /// * [`CannyError::InvalidThresholds`] if the low threshold exceeds the high one.
    pub fn build_kernel(&self) -> Result<Vec<f64>, CannyError> {
        if self.kernel_length % 2 == 0 {
            return Err(CannyError::InvalidKernelLength(self.kernel_length));
        }
        self.thresholds.validate()?;
        kernels::gaussian_kernel_1d(self.kernel_length, self.sigma)
    }

    /// Validate the configuration without keeping the kernel.
    pub fn validate(&self) -> Result<(), CannyError> {
        self.build_kernel().map(|_| ())
    }
}

/// Every intermediate buffer produced by one run of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyStages {
    /// Horizontally smoothed input.
    pub smoothed_x: PixelBuffer,
    /// Vertically smoothed input.
    pub smoothed_y: PixelBuffer,
    /// Absolute derivative along x.
    pub dx: PixelBuffer,
    /// Absolute derivative along y.
    pub dy: PixelBuffer,
    /// Gradient magnitude.
    pub magnitude: PixelBuffer,
    /// Non-maximum suppression output.
    pub suppressed: PixelBuffer,
    /// Final binary edge mask.
    pub edges: PixelBuffer,
}

/// Run the Canny pipeline and keep every intermediate buffer.
///
/// The configuration is validated before any buffer is allocated. `on_stage` is
/// called right before each stage starts.
///
/// # Arguments
///
/// * `src` - The grayscale input image.
/// * `config` - The pipeline parameters.
/// * `on_stage` - Progress callback.
pub fn canny_stages(
    src: &PixelBuffer,
    config: &CannyConfig,
    mut on_stage: impl FnMut(CannyStage),
) -> Result<CannyStages, CannyError> {
    let kernel = config.build_kernel()?;
    let size = src.size();

    on_stage(CannyStage::Smoothing);
    log::debug!("{} {size}", CannyStage::Smoothing);
    let start = Instant::now();
    let mut smoothed_x = PixelBuffer::from_size_val(size, 0);
    let mut smoothed_y = PixelBuffer::from_size_val(size, 0);
    smooth_separable(src, &mut smoothed_x, &mut smoothed_y, &kernel)?;
    log::debug!("smoothing took {:?}", start.elapsed());

    on_stage(CannyStage::Gradient);
    log::debug!("{} {size}", CannyStage::Gradient);
    let start = Instant::now();
    let mut dx = PixelBuffer::from_size_val(size, 0);
    let mut dy = PixelBuffer::from_size_val(size, 0);
    central_difference(&smoothed_x, &smoothed_y, &mut dx, &mut dy)?;
    let mut mag = PixelBuffer::from_size_val(size, 0);
    magnitude(&dx, &dy, &mut mag)?;
    log::debug!("gradient took {:?}", start.elapsed());

    on_stage(CannyStage::Suppression);
    log::debug!("{} {size}", CannyStage::Suppression);
    let start = Instant::now();
    let mut suppressed = PixelBuffer::from_size_val(size, 0);
    non_max_suppression(&mag, &dx, &dy, &mut suppressed)?;
    log::debug!("suppression took {:?}", start.elapsed());

    on_stage(CannyStage::Hysteresis);
    log::debug!("{} {size}", CannyStage::Hysteresis);
    let start = Instant::now();
    let mut edges = PixelBuffer::from_size_val(size, 0);
    let num_seeds = hysteresis_threshold(&suppressed, &mag, &config.thresholds, &mut edges)?;
    log::debug!(
        "hysteresis took {:?}, {num_seeds} seeds above {}",
        start.elapsed(),
        config.thresholds.high
    );

    Ok(CannyStages {
        smoothed_x,
        smoothed_y,
        dx,
        dy,
        magnitude: mag,
        suppressed,
        edges,
    })
}

/// Run the Canny pipeline, reporting each stage to `on_stage`.
pub fn canny_with_progress(
    src: &PixelBuffer,
    config: &CannyConfig,
    on_stage: impl FnMut(CannyStage),
) -> Result<PixelBuffer, CannyError> {
    Ok(canny_stages(src, config, on_stage)?.edges)
}

/// Compute the binary edge mask of a grayscale image.
///
/// # Arguments
///
/// * `src` - The grayscale input image.
/// * `config` - The pipeline parameters.
///
/// # Returns
///
/// An image of the same size whose pixels are 255 on edges and 0 elsewhere.
///
/// # Examples
///
/// ```
/// use canny_image::{ImageSize, PixelBuffer};
/// use canny_imgproc::canny::{canny, CannyConfig};
///
/// let size = ImageSize { width: 5, height: 5 };
/// let mut img = PixelBuffer::from_size_val(size, 0);
/// img.set_pixel(2, 2, 255).unwrap();
///
/// let edges = canny(&img, &CannyConfig::default()).unwrap();
/// assert_eq!(edges.size(), size);
/// assert!(edges.as_slice().iter().all(|&v| v == 0 || v == 255));
/// ```
pub fn canny(src: &PixelBuffer, config: &CannyConfig) -> Result<PixelBuffer, CannyError> {
    canny_with_progress(src, config, |_| {})
}
