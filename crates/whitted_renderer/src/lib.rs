//! Whitted Renderer - headless camera and image output.
//!
//! Turns a [`whitted_core::Scene`] into pixels: a [`View`] generates one
//! primary ray per pixel, [`render`] shades them with
//! [`Scene::ray_trace`](whitted_core::Scene::ray_trace) and the resulting
//! [`ImageBuffer`] can be written out as PNG.

mod renderer;
mod view;

pub use renderer::{
    clamp_01, color_to_rgba, render, render_pixel, ConfigError, ImageBuffer, RenderConfig,
    MAX_DIMENSION,
};
pub use view::{Projection, View};

/// Re-export the color type from whitted_core
pub use whitted_core::Color;
