//! Chart images and their identity.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use image::RgbaImage;

use crate::pixel::{PixelSource, Rgb};

/// Errors that can occur when loading a chart.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The image could not be read or decoded.
    #[error("failed to load chart image: {0}")]
    Image(#[from] image::ImageError),

    /// The image decoded to zero pixels.
    #[error("chart image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Identity token of a chart, used to key classification caches.
///
/// Two charts with the same id are assumed to carry the same pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartId(pub u64);

impl ChartId {
    /// Derive an id from a file path.
    pub fn from_path(path: &Path) -> Self {
        let mut h = DefaultHasher::new();
        path.hash(&mut h);
        Self(h.finish())
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart:{:016x}", self.0)
    }
}

/// A raster nautical chart.
///
/// A chart may be *blank*: it has dimensions but no pixel data, and every
/// pixel query returns `None`. Classifying a blank chart yields a grid of
/// non-navigable sentinel cells.
#[derive(Debug, Clone)]
pub struct Chart {
    id: ChartId,
    width: u32,
    height: u32,
    image: Option<RgbaImage>,
}

impl Chart {
    /// Wrap an already decoded image.
    pub fn from_image(id: ChartId, image: RgbaImage) -> Self {
        Self {
            id,
            width: image.width(),
            height: image.height(),
            image: Some(image),
        }
    }

    /// A chart of the given size without pixel data.
    pub fn blank(id: ChartId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            image: None,
        }
    }

    /// Load a chart image from disk. The id is derived from the path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(ChartError::Empty {
                width: image.width(),
                height: image.height(),
            });
        }
        log::debug!(
            "loaded chart {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(ChartId::from_path(path), image))
    }

    /// Load a chart, falling back to a blank chart of `fallback` size when
    /// the image cannot be loaded.
    pub fn open_or_blank(path: impl AsRef<Path>, fallback: (u32, u32)) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(chart) => chart,
            Err(err) => {
                log::warn!(
                    "{err}; using blank {}x{} chart for {}",
                    fallback.0,
                    fallback.1,
                    path.display()
                );
                Self::blank(ChartId::from_path(path), fallback.0, fallback.1)
            }
        }
    }

    #[inline]
    pub fn id(&self) -> ChartId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the chart has no pixel data.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.image.is_none()
    }
}

impl PixelSource for Chart {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.image.as_ref()?.pixel(x, y)
    }
}
