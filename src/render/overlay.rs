//! Rasterized map overlays.

use super::html;
use super::regrid::{decimate, DisplayGrid};
use super::{Colormap, RenderOptions, Rgba, TileLayer};
use crate::data::LabeledArray;
use crate::error::{FloodVizError, Result};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use ndarray::{s, Array2};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Geographic extent of the overlay image, cell edges included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoBounds {
    /// Southern edge latitude.
    pub south: f64,
    /// Western edge longitude.
    pub west: f64,
    /// Northern edge latitude.
    pub north: f64,
    /// Eastern edge longitude.
    pub east: f64,
}

impl GeoBounds {
    /// Extent of cell-centered axes, widened by half a cell on each side.
    fn from_centers(lat: &[f64], lon: &[f64]) -> Self {
        let (south, north) = edges(lat);
        let (west, east) = edges(lon);
        Self { south, west, north, east }
    }
}

fn edges(centers: &[f64]) -> (f64, f64) {
    let lo = centers.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = centers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let half = if centers.len() > 1 {
        (hi - lo) / (centers.len() - 1) as f64 / 2.0
    } else {
        0.0
    };
    (lo - half, hi + half)
}

/// One rendered time step.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Timestamp label for time-indexed overlays.
    pub label: Option<String>,
    /// Values as drawn: north-up, west-left.
    pub values: Array2<f64>,
    /// PNG-encoded RGBA raster of `values`.
    pub png: Vec<u8>,
}

/// A labeled array drawn as a colored image over a basemap.
#[derive(Debug, Clone)]
pub struct MapOverlay {
    name: String,
    array: LabeledArray,
    basemap: TileLayer,
    options: RenderOptions,
    bounds: GeoBounds,
    range: Option<(f64, f64)>,
    frames: Vec<RenderedFrame>,
}

impl MapOverlay {
    /// Rasterize every frame of `array` with `options`.
    pub fn build(
        array: LabeledArray,
        name: impl Into<String>,
        basemap: TileLayer,
        options: RenderOptions,
    ) -> Result<Self> {
        let colormap = options.validate()?;
        let name = name.into();

        let (rows, cols) = (array.lat.len(), array.lon.len());
        if rows == 0 || cols == 0 {
            return Err(FloodVizError::dimension_mismatch(format!(
                "nothing to draw: grid is {}x{}",
                rows, cols
            )));
        }
        let range = array.min_max();
        let bounds = GeoBounds::from_centers(&array.lat.to_vec(), &array.lon.to_vec());
        let labels: Vec<Option<String>> = match array.time {
            Some(ref times) => times
                .iter()
                .map(|t| Some(t.format("%Y-%m-%d %H:%M:%S").to_string()))
                .collect(),
            None => vec![None],
        };

        let mut frames = Vec::with_capacity(labels.len());
        for (i, label) in labels.into_iter().enumerate() {
            let frame = array.frame(i).ok_or_else(|| {
                FloodVizError::dimension_mismatch(format!("frame {} missing from '{}'", i, array.name))
            })?;
            let grid = if options.decimate {
                decimate(
                    frame,
                    array.lat.view(),
                    array.lon.view(),
                    options.height as usize,
                    options.width as usize,
                )
            } else {
                DisplayGrid::native(frame, array.lat.view(), array.lon.view())
            };

            let values = north_up(&grid);
            let png = encode_png(&values, colormap, range)?;
            frames.push(RenderedFrame { label, values, png });
        }

        tracing::info!(
            name = %name,
            frames = frames.len(),
            missing = array.missing_count(),
            "Rendered map overlay"
        );

        Ok(Self {
            name,
            array,
            basemap,
            options,
            bounds,
            range,
            frames,
        })
    }

    /// Title of the overlay.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The labeled array the overlay was drawn from.
    pub fn array(&self) -> &LabeledArray {
        &self.array
    }

    /// Basemap beneath the overlay.
    pub fn basemap(&self) -> &TileLayer {
        &self.basemap
    }

    /// Presentation options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Geographic extent of the image.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Color scale limits; `None` when every cell is missing.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// Rendered frames in time order.
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Render the interactive HTML document.
    pub fn to_html(&self) -> Result<String> {
        html::render_document(self)
    }

    /// Write the overlay as a self-contained HTML document.
    pub fn save_html(&self, path: &Path) -> Result<()> {
        let document = self.to_html()?;
        fs::write(path, document).map_err(|e| FloodVizError::file_write(path, e))?;
        tracing::info!(path = %path.display(), "Saved map overlay");
        Ok(())
    }
}

/// Reorder a display grid so row 0 is the northernmost and column 0 the westernmost.
fn north_up(grid: &DisplayGrid) -> Array2<f64> {
    let flip_rows = is_ascending(grid.lat.as_slice());
    let flip_cols = is_descending(grid.lon.as_slice());
    let view = grid.values.view();
    let view = match (flip_rows, flip_cols) {
        (true, true) => view.slice_move(s![..;-1, ..;-1]),
        (true, false) => view.slice_move(s![..;-1, ..]),
        (false, true) => view.slice_move(s![.., ..;-1]),
        (false, false) => view,
    };
    view.to_owned()
}

fn is_ascending(axis: Option<&[f64]>) -> bool {
    matches!(axis, Some(a) if a.len() > 1 && a[0] < a[a.len() - 1])
}

fn is_descending(axis: Option<&[f64]>) -> bool {
    matches!(axis, Some(a) if a.len() > 1 && a[0] > a[a.len() - 1])
}

/// Color each cell and encode the raster as PNG. Missing cells are transparent.
fn encode_png(values: &Array2<f64>, colormap: Colormap, range: Option<(f64, f64)>) -> Result<Vec<u8>> {
    let (rows, cols) = values.dim();
    let mut pixels = Vec::with_capacity(rows * cols * 4);
    for &v in values.iter() {
        let color = match range {
            Some((min, max)) if v.is_finite() => {
                let t = if max > min { (v - min) / (max - min) } else { 0.5 };
                colormap.color(t)
            }
            _ => Rgba::TRANSPARENT,
        };
        pixels.extend_from_slice(&color.0);
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&pixels, cols as u32, rows as u32, ColorType::Rgba8)?;
    Ok(png)
}
