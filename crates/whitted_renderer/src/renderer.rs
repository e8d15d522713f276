//! Whitted ray tracing renderer.
//!
//! Traces one primary ray per pixel through a [`View`] and stores the
//! shaded colors in an [`ImageBuffer`]. No anti-aliasing, no gamma.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;
use thiserror::Error;
use whitted_core::{Color, Scene};

use crate::View;

/// Largest accepted image width or height.
pub const MAX_DIMENSION: u32 = 16_384;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum number of reflection/refraction bounces
    pub depth: u32,
    /// Refractive index of the medium the camera sits in
    pub index: f64,
    /// Color for primary rays that hit nothing
    pub background: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            depth: 4,
            index: 1.0,
            background: [0.0, 0.0, 0.0],
        }
    }
}

/// Errors from reading a render configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("image size {width}x{height} out of range (1..={max} per side)", max = MAX_DIMENSION)]
    InvalidSize { width: u32, height: u32 },
}

impl RenderConfig {
    /// Read a TOML file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("Loaded render config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Check that the image size is non-empty and bounded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |n: u32| (1..=MAX_DIMENSION).contains(&n);
        if in_range(self.width) && in_range(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn background(&self) -> Color {
        Color::from_array(self.background)
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Row-major image, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Convert to RGBA bytes, clamping every channel.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer_with_format(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
    }
}

/// Shade a single pixel. `row` counts from the bottom of the image.
pub fn render_pixel(view: &View, scene: &Scene, col: u32, row: u32, config: &RenderConfig) -> Color {
    let w = view.width();
    let u = 2.0 * w * col as f64 / config.width as f64 - w;
    let v = 2.0 * w * row as f64 / config.height as f64 - w;
    let (orig, dir) = view.cast_ray(u, v);
    scene.ray_trace_with_background(orig, dir, config.index, config.depth, config.background())
}

/// Render the entire scene to an image buffer.
///
/// This is a simple single-threaded loop over every pixel.
pub fn render(view: &View, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    log::info!(
        "Rendering {}x{} at depth {} ({} surfaces, {} lights)",
        config.width,
        config.height,
        config.depth,
        scene.num_surfaces(),
        scene.lights().len()
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(config.width, config.height);
    for row in 0..config.height {
        for col in 0..config.width {
            let color = render_pixel(view, scene, col, row, config);
            image.set(col, config.height - 1 - row, color);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
