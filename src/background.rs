use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::error::BrushResult;

/// Decoded raster drawn underneath all shapes.
///
/// Cloning is cheap: the pixels are shared. Every decoded image gets a fresh
/// id so backends can cache uploaded textures per image.
#[derive(Clone)]
pub struct BackgroundImage {
    id: Uuid,
    width: u32,
    height: u32,
    pixels: Arc<image::RgbaImage>,
}

// Pixel data is far too large to be useful in debug output
impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl BackgroundImage {
    /// Decode an encoded image (PNG, JPEG, ...) from memory
    pub fn decode(bytes: &[u8]) -> BrushResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        let image = Self::from_rgba(decoded.to_rgba8());
        info!("Decoded background image: {}x{}", image.width, image.height);
        Ok(image)
    }

    /// Wrap an already decoded RGBA buffer
    pub fn from_rgba(pixels: image::RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        let id = Uuid::new_v4();
        debug!("Background image {} is {}x{}", id, width, height);
        Self {
            id,
            width,
            height,
            pixels: Arc::new(pixels),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Natural width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixels, row-major
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::BrushError;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let image = BackgroundImage::decode(&encoded_png(4, 3)).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.rgba().len(), 4 * 3 * 4);
        assert_eq!(&image.rgba()[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = BackgroundImage::decode(b"definitely not an image");
        assert!(matches!(result, Err(BrushError::ImageDecode(_))));
    }

    #[test]
    fn test_each_image_gets_its_own_id() {
        let a = BackgroundImage::from_rgba(image::RgbaImage::new(1, 1));
        let b = BackgroundImage::from_rgba(image::RgbaImage::new(1, 1));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }
}
