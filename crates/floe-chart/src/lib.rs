//! Raster nautical charts and their classification into cost grids.
//!
//! - [`PixelSource`] abstracts over anything that can answer per-pixel
//!   color queries; [`image::RgbaImage`] and [`Chart`] implement it.
//! - [`Chart`] is a loaded chart image plus the [`ChartId`] used to key
//!   classification caches.
//! - [`TerrainClassifier`] sub-samples every grid cell, separates water from
//!   ice and land by a blue-dominance rule, and derives the cell's
//!   risk/time/fuel/weather attributes.

mod chart;
mod classify;
mod pixel;

pub use chart::{Chart, ChartError, ChartId};
pub use classify::{ClassifierConfig, NoiseConfig, TerrainClassifier};
pub use pixel::{PixelSource, Rgb};
