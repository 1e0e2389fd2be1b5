// Frame publication - engine raster → displayable image
//
// The engine's alpha byte carries no meaning, so every published pixel is
// forced fully opaque.

use crate::video::{FrameError, FrameResult};

const OPAQUE: u32 = 0xFF00_0000;

/// Forces the alpha byte of a packed 0xAARRGGBB pixel to 0xFF
#[inline(always)]
pub const fn force_opaque(pixel: u32) -> u32 {
    pixel | OPAQUE
}

/// Owned ARGB surface, row-major, origin top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl DisplayImage {
    /// Opaque black image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![OPAQUE; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Converts to an egui image for texture upload
    pub fn to_color_image(&self) -> egui::ColorImage {
        let mut image = egui::ColorImage::new([self.width, self.height], egui::Color32::BLACK);
        for (dst, &src) in image.pixels.iter_mut().zip(&self.pixels) {
            let [_, r, g, b] = src.to_be_bytes();
            *dst = egui::Color32::from_rgb(r, g, b);
        }
        image
    }
}

/// Copies engine frames into a display image it owns
pub struct FramePublisher {
    image: DisplayImage,
    published: u64,
}

impl FramePublisher {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: DisplayImage::new(width, height),
            published: 0,
        }
    }

    /// Rewrites the whole image from `src`.
    ///
    /// `src` must hold exactly `width * height` pixels. The image is always
    /// re-derived from the source, never cached.
    pub fn publish(&mut self, src: &[u32]) -> FrameResult<&DisplayImage> {
        let expected = self.image.width * self.image.height;
        if src.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: src.len(),
            });
        }

        for (dst, &pixel) in self.image.pixels.iter_mut().zip(src) {
            *dst = force_opaque(pixel);
        }
        self.published += 1;

        Ok(&self.image)
    }

    pub fn image(&self) -> &DisplayImage {
        &self.image
    }

    /// Number of successful publications
    pub fn published_count(&self) -> u64 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_opaque() {
        assert_eq!(force_opaque(0x0011_2233), 0xFF11_2233);
        assert_eq!(force_opaque(0x7F11_2233), 0xFF11_2233);
        assert_eq!(force_opaque(0xFFFF_FFFF), 0xFFFF_FFFF);
    }

    #[test]
    fn test_publish_uniform_buffer() {
        let mut publisher = FramePublisher::new(4, 3);
        let src = vec![0x0011_2233; 12];
        let image = publisher.publish(&src).unwrap();
        assert!(image.pixels().iter().all(|&p| p == 0xFF11_2233));
    }

    #[test]
    fn test_publish_preserves_layout() {
        let mut publisher = FramePublisher::new(3, 2);
        let src: Vec<u32> = (0..6).collect();
        let image = publisher.publish(&src).unwrap();

        assert_eq!(image.pixel(0, 0), Some(0xFF00_0000));
        assert_eq!(image.pixel(2, 0), Some(0xFF00_0002));
        assert_eq!(image.pixel(0, 1), Some(0xFF00_0003));
        assert_eq!(image.pixel(2, 1), Some(0xFF00_0005));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.pixel(0, 2), None);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut publisher = FramePublisher::new(4, 4);
        let err = publisher.publish(&[0; 15]).unwrap_err();
        assert_eq!(err, FrameError::SizeMismatch { expected: 16, actual: 15 });
        assert_eq!(publisher.published_count(), 0);
    }

    #[test]
    fn test_rederives_from_source() {
        let mut publisher = FramePublisher::new(2, 1);
        publisher.publish(&[0x0000_0001, 0x0000_0002]).unwrap();
        let image = publisher.publish(&[0x0000_0003, 0x0000_0004]).unwrap();
        assert_eq!(image.pixels(), &[0xFF00_0003, 0xFF00_0004]);
        assert_eq!(publisher.published_count(), 2);
    }

    #[test]
    fn test_to_color_image() {
        let mut publisher = FramePublisher::new(1, 1);
        let image = publisher.publish(&[0x0011_2233]).unwrap();
        let color = image.to_color_image();
        assert_eq!(color.size, [1, 1]);
        assert_eq!(color.pixels[0], egui::Color32::from_rgb(0x11, 0x22, 0x33));
    }
}
