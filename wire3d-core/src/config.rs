/// Render configuration passed explicitly into the frame pipeline
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clip::NEAR_PLANE;
use crate::raster::{Color, POINT_RADIUS};

/// Largest accepted vertex marker half-size, in pixels
pub const MAX_POINT_RADIUS: i32 = 64;

/// Settings that would break the frame pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NearPlane(f32),
    PointRadius(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NearPlane(z) => {
                write!(f, "near_plane must be a finite distance above 0, got {z}")
            }
            ConfigError::PointRadius(r) => {
                write!(f, "point_radius must be within 0..={MAX_POINT_RADIUS}, got {r}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Requested canvas width in pixels. Embedders size their pixel buffer
    /// from it; `render_frame` itself maps onto the buffer's own size.
    pub width: u32,
    /// Requested canvas height in pixels, see `width`
    pub height: u32,
    /// View-space distance of the near clip plane
    pub near_plane: f32,
    pub background: Color,
    pub line_color: Color,
    pub point_color: Color,
    pub point_radius: i32,
    /// Draw a marker on every projected vertex
    pub draw_vertices: bool,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the settings the pipeline relies on. Deserialized configs should
    /// pass through here before reaching `render_frame`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near_plane.is_finite() && self.near_plane > 0.0) {
            return Err(ConfigError::NearPlane(self.near_plane));
        }
        if !(0..=MAX_POINT_RADIUS).contains(&self.point_radius) {
            return Err(ConfigError::PointRadius(self.point_radius));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            near_plane: NEAR_PLANE,
            background: Color::BLACK,
            line_color: Color::RED,
            point_color: Color::YELLOW,
            point_radius: POINT_RADIUS,
            draw_vertices: true,
        }
    }
}
