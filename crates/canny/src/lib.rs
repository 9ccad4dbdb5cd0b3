#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use canny_image as image;

#[doc(inline)]
pub use canny_imgproc as imgproc;

#[doc(inline)]
pub use canny_io as io;
