//! Filter operations
//!
//! This module provides the gaussian kernel construction and the separable smoothing
//! used as the first stage of the edge detection pipeline.

/// Filter kernels
pub mod kernels;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
