use crate::error::CannyError;

/// Step of the Riemann sum used to integrate the gaussian density over a tap.
pub const INTEGRATION_STEP: f64 = 1e-4;

/// Evaluate the zero-mean gaussian probability density at `x`.
///
/// # Arguments
///
/// * `x` - The point to evaluate.
/// * `sigma` - The standard deviation of the gaussian.
pub fn gaussian_pdf(x: f64, sigma: f64) -> f64 {
    let sigma_sq = sigma * sigma;
    (-(x * x) / (2.0 * sigma_sq)).exp() / (2.0 * std::f64::consts::PI * sigma_sq).sqrt()
}

/// Integrate the gaussian density over `[start, end)` with a left Riemann sum.
fn gaussian_integral(start: f64, end: f64, sigma: f64) -> f64 {
    let steps = ((end - start) / INTEGRATION_STEP).round() as usize;
    (0..steps)
        .map(|k| gaussian_pdf(start + k as f64 * INTEGRATION_STEP, sigma) * INTEGRATION_STEP)
        .sum()
}

/// Create an unnormalized gaussian kernel by integrating over each pixel footprint.
///
/// The tap at index `i` covers the unit interval centred on `x = i - kernel_size / 2`,
/// so its weight is the gaussian mass over `[x - 0.5, x + 0.5]` rather than the
/// density sampled at `x`.
///
/// # Arguments
///
/// * `kernel_size` - The number of taps of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector with the raw kernel weights.
///
/// # Errors
///
/// Returns [`CannyError::InvalidKernelLength`] if `kernel_size` is zero and
/// [`CannyError::InvalidSigma`] if `sigma` is not finite and positive.
pub fn gaussian_integral_kernel_1d(kernel_size: usize, sigma: f64) -> Result<Vec<f64>, CannyError> {
    if kernel_size == 0 {
        return Err(CannyError::InvalidKernelLength(kernel_size));
    }

    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CannyError::InvalidSigma(sigma));
    }

    let half = (kernel_size / 2) as isize;

    let kernel = (0..kernel_size)
        .map(|i| {
            let x = (i as isize - half) as f64;
            gaussian_integral(x - 0.5, x + 0.5, sigma)
        })
        .collect();

    Ok(kernel)
}

/// Scale a kernel so its weights sum to one.
///
/// # Errors
///
/// Returns [`CannyError::DegenerateKernel`] if the weights sum to zero or to a
/// non-finite value.
pub fn normalize_kernel(kernel: &[f64]) -> Result<Vec<f64>, CannyError> {
    let sum = kernel.iter().sum::<f64>();

    if !sum.is_finite() || sum <= 0.0 {
        return Err(CannyError::DegenerateKernel(sum));
    }

    let scale = 1.0 / sum;
    Ok(kernel.iter().map(|k| k * scale).collect())
}

/// Create a normalized gaussian kernel.
///
/// Shorthand for [`gaussian_integral_kernel_1d`] followed by [`normalize_kernel`].
///
/// # Examples
///
/// ```
/// use canny_imgproc::filter::kernels::gaussian_kernel_1d;
///
/// let kernel = gaussian_kernel_1d(3, 0.5).unwrap();
/// assert_eq!(kernel.len(), 3);
/// assert!((kernel.iter().sum::<f64>() - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Result<Vec<f64>, CannyError> {
    let kernel = normalize_kernel(&gaussian_integral_kernel_1d(kernel_size, sigma)?)?;
    log::trace!("gaussian kernel (size {kernel_size}, sigma {sigma}): {kernel:?}");
    Ok(kernel)
}
