//! Map overlay rendering.
//!
//! Labeled arrays are rasterized into colored PNG frames and laid over a
//! basemap tile layer in a self-contained HTML document.

mod basemap;
mod colormaps;
mod html;
mod overlay;
mod regrid;

pub use basemap::{TileLayer, WORLD_IMAGERY_URL};
pub use colormaps::{Colormap, Ramp, Rgba};
pub use overlay::{GeoBounds, MapOverlay, RenderedFrame};
pub use regrid::{block_factors, decimate, DisplayGrid};

use crate::error::{FloodVizError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Presentation options for [`MapOverlay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Plot width in pixels.
    pub width: u32,
    /// Plot height in pixels.
    pub height: u32,
    /// Colormap name; `_r` reverses.
    pub colormap: String,
    /// Aggregate grids larger than the plot down to its pixel size.
    pub decimate: bool,
    /// Overlay opacity, 0.0 to 1.0.
    pub alpha: f64,
    /// Draw a colorbar legend.
    pub colorbar: bool,
    /// Show the value under the cursor.
    pub hover: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 250,
            colormap: "gist_earth_r".to_string(),
            decimate: true,
            alpha: 0.5,
            colorbar: true,
            hover: true,
        }
    }
}

impl RenderOptions {
    /// Defaults with decimation switched on or off.
    pub fn with_decimation(decimate: bool) -> Self {
        Self {
            decimate,
            ..Self::default()
        }
    }

    /// Load options from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FloodVizError::file_open(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check ranges and resolve the colormap.
    pub fn validate(&self) -> Result<Colormap> {
        if self.width == 0 || self.height == 0 {
            return Err(FloodVizError::InvalidOptions(format!(
                "plot size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(FloodVizError::InvalidOptions(format!(
                "alpha must be within 0..=1, got {}",
                self.alpha
            )));
        }
        Colormap::from_name(&self.colormap)
    }
}
