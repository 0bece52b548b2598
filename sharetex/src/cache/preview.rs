//! Decoded preview images.

use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

/// Formats tried, in order, when decoding cached preview bytes.
const DECODE_ORDER: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Bmp];

/// Shared handle to a decoded RGBA image.
#[derive(Debug, Clone)]
pub struct ImageHandle(Arc<RgbaImage>);

impl ImageHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Raw RGBA8 pixel bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.0.as_raw()
    }

    /// Decoded size in bytes.
    pub fn byte_len(&self) -> usize {
        self.0.as_raw().len()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

/// Decode preview bytes, trying PNG, then JPEG, then BMP.
pub fn decode_image(bytes: &[u8]) -> Option<ImageHandle> {
    DECODE_ORDER.iter().find_map(|format| {
        image::load_from_memory_with_format(bytes, *format)
            .ok()
            .map(|decoded| ImageHandle::new(decoded.to_rgba8()))
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::io::Cursor;

    /// Encode a small gradient in `format`.
    pub fn encoded(format: ImageFormat, width: u32, height: u32) -> (RgbaImage, Vec<u8>) {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255])
        });
        let mut bytes = Cursor::new(Vec::new());
        if format == ImageFormat::Jpeg {
            // JPEG has no alpha channel
            image::DynamicImage::ImageRgba8(image.clone())
                .to_rgb8()
                .write_to(&mut bytes, format)
                .unwrap();
        } else {
            image.write_to(&mut bytes, format).unwrap();
        }
        (image, bytes.into_inner())
    }
}
