use image::RgbaImage;

/// An opaque RGB color sample.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three channels, in `[0, 255]`.
    #[inline]
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }
}

/// Per-pixel color queries over a chart raster.
pub trait PixelSource {
    /// Raster size in pixels, `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`, or `None` when the pixel is outside the raster or
    /// the raster has no data.
    fn pixel(&self, x: u32, y: u32) -> Option<Rgb>;
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_pixel_checked(x, y)
            .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn brightness_is_channel_mean() {
        assert_eq!(Rgb::new(0, 0, 0).brightness(), 0.0);
        assert_eq!(Rgb::new(255, 255, 255).brightness(), 255.0);
        assert_eq!(Rgb::new(30, 60, 90).brightness(), 60.0);
    }

    #[test]
    fn rgba_image_reports_pixels_and_bounds() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 200, 255]));
        assert_eq!(PixelSource::dimensions(&img), (3, 2));
        assert_eq!(img.pixel(2, 1), Some(Rgb::new(10, 20, 200)));
        assert_eq!(img.pixel(3, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }
}
