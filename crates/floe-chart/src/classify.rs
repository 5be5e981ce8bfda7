//! Terrain classification: raster chart → per-cell cost grid.
//!
//! Each grid cell is probed at a fixed interior lattice of sample pixels.
//! A sample is water when its blue channel dominates red and green by a
//! margin and exceeds a brightness floor. The fraction of non-water samples
//! (the *ice ratio*) and the mean brightness drive the cell's costs:
//!
//! ```text
//! risk    = ice * k1 + (brightness / 255) * k2 + noise
//! time    = 1 + ice * k3 + noise
//! fuel    = 1 + ice * k4 + noise
//! weather = 1 + ice * k5 + noise
//! ```
//!
//! A cell is navigable when at least one sample lands on water, so that
//! narrow channels narrower than a cell are kept.

use floe_core::{Cell, CostGrid, Point, Vec2};
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};

use crate::pixel::{PixelSource, Rgb};

/// Upper bounds of the uniform noise added to each cost attribute.
///
/// Each term is drawn from `[0, amplitude)`; an amplitude of zero disables
/// that term.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoiseConfig {
    pub risk: f64,
    pub time: f64,
    pub fuel: f64,
    pub weather: f64,
}

impl NoiseConfig {
    /// No noise at all; classification becomes a pure function of pixels.
    pub const NONE: Self = Self {
        risk: 0.0,
        time: 0.0,
        fuel: 0.0,
        weather: 0.0,
    };
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            risk: 0.5,
            time: 0.2,
            fuel: 0.2,
            weather: 1.0,
        }
    }
}

/// Parameters of the terrain classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Samples per axis of the interior lattice (5 → 25 samples per cell).
    pub samples_per_axis: u32,
    /// Amount by which blue must exceed both red and green.
    pub water_margin: u8,
    /// Blue must be strictly above this value.
    pub brightness_floor: u8,
    /// k1: risk per unit of ice ratio.
    pub risk_ice: f64,
    /// k2: risk per unit of normalized brightness.
    pub risk_brightness: f64,
    /// k3: extra time multiplier per unit of ice ratio.
    pub time_ice: f64,
    /// k4: extra fuel multiplier per unit of ice ratio.
    pub fuel_ice: f64,
    /// k5: extra weather severity per unit of ice ratio.
    pub weather_ice: f64,
    pub noise: NoiseConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            samples_per_axis: 5,
            water_margin: 20,
            brightness_floor: 100,
            risk_ice: 8.0,
            risk_brightness: 2.0,
            time_ice: 2.0,
            fuel_ice: 1.5,
            weather_ice: 3.0,
            noise: NoiseConfig::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn with_samples_per_axis(mut self, n: u32) -> Self {
        self.samples_per_axis = n;
        self
    }

    pub fn with_water_rule(mut self, margin: u8, floor: u8) -> Self {
        self.water_margin = margin;
        self.brightness_floor = floor;
        self
    }

    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = noise;
        self
    }
}

/// Tally of the samples taken inside one cell.
#[derive(Debug, Default, Clone, Copy)]
struct SampleTally {
    samples: u32,
    water: u32,
    brightness: f64,
}

/// Converts chart rasters into [`CostGrid`]s.
#[derive(Debug, Clone, Default)]
pub struct TerrainClassifier {
    config: ClassifierConfig,
}

impl TerrainClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Grid dimensions `(cols, rows)` covering a `width × height` raster
    /// with cells of `spacing` pixels. Partial cells at the right and bottom
    /// edges count as whole cells.
    pub fn grid_size(width: u32, height: u32, spacing: u32) -> (i32, i32) {
        let s = spacing.max(1);
        (width.div_ceil(s) as i32, height.div_ceil(s) as i32)
    }

    /// Whether a single pixel color counts as open water.
    #[inline]
    pub fn is_water(&self, px: Rgb) -> bool {
        let margin = u16::from(self.config.water_margin);
        let (r, g, b) = (u16::from(px.r), u16::from(px.g), u16::from(px.b));
        b > r + margin && b > g + margin && px.b > self.config.brightness_floor
    }

    /// Whether the pixel under a continuous chart position is open water.
    /// Positions outside the raster, or on a raster without data, are not.
    pub fn is_water_at<S: PixelSource + ?Sized>(&self, source: &S, pos: Vec2) -> bool {
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return false;
        }
        source
            .pixel(pos.x.floor() as u32, pos.y.floor() as u32)
            .is_some_and(|px| self.is_water(px))
    }

    /// The conservative cell emitted when no sample of a cell falls inside
    /// the raster: maximal cost, non-navigable.
    pub fn sentinel(&self) -> Cell {
        let c = &self.config;
        Cell {
            risk: c.risk_ice + c.risk_brightness,
            time: 1.0 + c.time_ice,
            fuel: 1.0 + c.fuel_ice,
            weather: 1.0 + c.weather_ice,
            navigable: false,
        }
    }

    /// Classify a whole raster into a cost grid of `spacing`-pixel cells.
    ///
    /// `rng` feeds the noise terms; pass a seeded generator for
    /// reproducible grids.
    pub fn classify<S, R>(&self, source: &S, spacing: u32, rng: &mut R) -> CostGrid
    where
        S: PixelSource + ?Sized,
        R: Rng + ?Sized,
    {
        if spacing == 0 {
            log::warn!("grid spacing of 0 pixels requested, using 1");
        }
        let spacing = spacing.max(1);
        let (width, height) = source.dimensions();
        let (cols, rows) = Self::grid_size(width, height, spacing);
        let grid = CostGrid::from_fn(cols, rows, |p| self.classify_cell(source, p, spacing, rng));
        log::debug!(
            "classified {width}x{height} chart into {cols}x{rows} cells, {} navigable",
            grid.navigable_count()
        );
        grid
    }

    /// Classify the single grid cell `cell` of a raster.
    pub fn classify_cell<S, R>(&self, source: &S, cell: Point, spacing: u32, rng: &mut R) -> Cell
    where
        S: PixelSource + ?Sized,
        R: Rng + ?Sized,
    {
        let tally = self.tally(source, cell, spacing.max(1));
        if tally.samples == 0 {
            return self.sentinel();
        }

        let c = &self.config;
        let samples = f64::from(tally.samples);
        let water_ratio = f64::from(tally.water) / samples;
        let ice_ratio = 1.0 - water_ratio;
        let brightness = tally.brightness / samples;

        Cell {
            risk: ice_ratio * c.risk_ice
                + (brightness / 255.0) * c.risk_brightness
                + noise(rng, c.noise.risk),
            time: 1.0 + ice_ratio * c.time_ice + noise(rng, c.noise.time),
            fuel: 1.0 + ice_ratio * c.fuel_ice + noise(rng, c.noise.fuel),
            weather: 1.0 + ice_ratio * c.weather_ice + noise(rng, c.noise.weather),
            navigable: tally.water >= 1,
        }
    }

    fn tally<S: PixelSource + ?Sized>(&self, source: &S, cell: Point, spacing: u32) -> SampleTally {
        let mut tally = SampleTally::default();
        if cell.x < 0 || cell.y < 0 {
            return tally;
        }
        let (width, height) = source.dimensions();
        let x0 = u64::from(cell.x as u32) * u64::from(spacing);
        let y0 = u64::from(cell.y as u32) * u64::from(spacing);
        let n = u64::from(self.config.samples_per_axis.max(1));

        for j in 1..=n {
            let y = y0 + j * u64::from(spacing) / (n + 1);
            if y >= u64::from(height) {
                continue;
            }
            for i in 1..=n {
                let x = x0 + i * u64::from(spacing) / (n + 1);
                if x >= u64::from(width) {
                    continue;
                }
                let Some(px) = source.pixel(x as u32, y as u32) else {
                    continue;
                };
                tally.samples += 1;
                tally.brightness += px.brightness();
                if self.is_water(px) {
                    tally.water += 1;
                }
            }
        }
        tally
    }
}

#[inline]
fn noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        return 0.0;
    }
    let u: f64 = StandardUniform.sample(rng);
    amplitude * u
}
