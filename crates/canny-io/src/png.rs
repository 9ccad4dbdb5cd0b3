use std::{fs::File, io::BufWriter, path::Path};

use canny_image::PixelBuffer;
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};

use crate::{error::IoError, functional::luma_from_pixel_buffer};

/// Write a grayscale image as a single channel (mono8) PNG file.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `image` - The grayscale image to write.
pub fn write_image_png_mono8(
    file_path: impl AsRef<Path>,
    image: &PixelBuffer,
) -> Result<(), IoError> {
    let luma = luma_from_pixel_buffer(image)?;
    let file = BufWriter::new(File::create(file_path)?);

    PngEncoder::new(file)
        .write_image(
            luma.as_raw(),
            luma.width(),
            luma.height(),
            ExtendedColorType::L8,
        )
        .map_err(|e| IoError::PngEncodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::read_image_any_mono8;
    use canny_image::ImageSize;

    #[test]
    fn read_write_png_mono8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("edges.png");

        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let image = PixelBuffer::new(size, (0..20).map(|v| (v * 13) as u8).collect())?;
        write_image_png_mono8(&file_path, &image)?;

        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_any_mono8(&file_path)?;
        assert_eq!(image_back, image);
        Ok(())
    }

    #[test]
    fn write_png_mono8_edge_mask() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("mask.png");

        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let mut mask = PixelBuffer::from_size_val(size, 0);
        mask.set_pixel(1, 1, 255)?;
        write_image_png_mono8(&file_path, &mask)?;

        // the file decodes as a one channel image with the same samples
        let decoded = image::open(&file_path)?;
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!(decoded.into_luma8().into_raw(), mask.as_slice());
        Ok(())
    }
}
