use std::path::Path;

use canny_image::{ImageError, ImageSize, PixelBuffer};

use crate::error::IoError;

/// Convert a decoded luma image into a [`PixelBuffer`].
///
/// # Arguments
///
/// * `image` - The 8-bit luma image.
///
/// # Returns
///
/// A pixel buffer with the same size and row-major samples.
pub fn pixel_buffer_from_luma(image: image::GrayImage) -> Result<PixelBuffer, IoError> {
    let size = ImageSize {
        width: image.width() as usize,
        height: image.height() as usize,
    };
    Ok(PixelBuffer::new(size, image.into_raw())?)
}

/// Convert a [`PixelBuffer`] into a luma image ready for encoding.
///
/// # Arguments
///
/// * `src` - The pixel buffer to convert.
///
/// # Returns
///
/// An 8-bit luma image holding a copy of the samples.
pub fn luma_from_pixel_buffer(src: &PixelBuffer) -> Result<image::GrayImage, IoError> {
    let data = src.as_slice().to_vec();
    let len = data.len();
    image::GrayImage::from_raw(src.width() as u32, src.height() as u32, data).ok_or(
        IoError::ImageCreationError(ImageError::InvalidDataLength(len, src.size().num_pixels())),
    )
}

/// Reads an image from the given file path and converts it to grayscale.
///
/// The method tries to read from any image format enabled in the image crate.
/// Color images are reduced to luma, no orientation metadata is applied.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A grayscale pixel buffer.
pub fn read_image_any_mono8(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(&file_path)?;

    let img = image::ImageReader::new(std::io::Cursor::new(&bytes))
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} as {:?} {}x{}",
        file_path.display(),
        img.color(),
        img.width(),
        img.height()
    );

    pixel_buffer_from_luma(img.into_luma8())
}
