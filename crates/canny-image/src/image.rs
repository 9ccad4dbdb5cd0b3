use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use canny_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A rectangular grid of 8-bit intensities stored row-major.
///
/// The pixel at `(x, y)` lives at index `y * width + x`. The buffer owns its
/// storage: cloning it performs a deep copy, so two buffers never share memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: ImageSize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new pixel buffer from row-major intensities.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use canny_image::{ImageSize, PixelBuffer};
    ///
    /// let image = PixelBuffer::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, ImageError> {
        if data.len() != size.num_pixels() {
            return Err(ImageError::InvalidDataLength(data.len(), size.num_pixels()));
        }

        Ok(Self { size, data })
    }

    /// Create a new pixel buffer with every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use canny_image::{ImageSize, PixelBuffer};
    ///
    /// let image = PixelBuffer::from_size_val(ImageSize { width: 3, height: 2 }, 7);
    ///
    /// assert_eq!(image.as_slice(), &[7, 7, 7, 7, 7, 7]);
    /// ```
    pub fn from_size_val(size: ImageSize, val: u8) -> Self {
        Self {
            size,
            data: vec![val; size.num_pixels()],
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the raw row-major pixel data.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the raw row-major pixel data mutably.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Overwrite every pixel with the contents of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageSize`] if the buffers differ in size.
    pub fn copy_from(&mut self, src: &PixelBuffer) -> Result<(), ImageError> {
        if self.size != src.size {
            return Err(ImageError::InvalidImageSize(
                src.width(),
                src.height(),
                self.width(),
                self.height(),
            ));
        }
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Get the pixel value at `(x, y)` with bounds checking.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u8, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok(self.data[y * self.width() + x])
    }

    /// Set the pixel value at `(x, y)` with bounds checking.
    pub fn set_pixel(&mut self, x: usize, y: usize, val: u8) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let width = self.width();
        self.data[y * width + x] = val;
        Ok(())
    }

    /// Get the pixel value at `(x, y)`.
    ///
    /// PRECONDITION: `x < width` and `y < height`. Checked in debug builds only;
    /// callers are expected to iterate inside ranges they computed themselves.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        debug_assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) out of bounds for {}",
            self.size
        );
        self.data[y * self.size.width + x]
    }

    /// Get a mutable reference to the pixel at `(x, y)`.
    ///
    /// PRECONDITION: `x < width` and `y < height`, see [`PixelBuffer::pixel`].
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut u8 {
        debug_assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) out of bounds for {}",
            self.size
        );
        let width = self.size.width;
        &mut self.data[y * width + x]
    }
}
