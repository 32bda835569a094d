//! The flood output visualizer.
//!
//! [`Visualizer`] composes the reading, labeling and rendering steps into
//! one-call pipelines for a single output file ([`Visualizer::show`]) or a
//! numbered series of outputs ([`Visualizer::animate`]).

use crate::data::{GridTable, LabeledArray, ReferenceCoords, DEFAULT_CACHE_KIND, DEFAULT_HEADER_LINES};
use crate::error::{FloodVizError, Result};
use crate::render::{MapOverlay, RenderOptions, TileLayer};
use crate::util::{date_range, Frequency, PathTemplate};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Inputs for [`Visualizer::animate`].
#[derive(Debug, Clone)]
pub struct AnimationRequest {
    /// Frame path template, e.g. `results/res-%04d.wd`.
    pub path_template: PathTemplate,
    /// Variable name.
    pub name: String,
    /// Reference coordinate cache.
    pub cache_path: PathBuf,
    /// First frame index (inclusive).
    pub start_index: i64,
    /// Last frame index (exclusive).
    pub end_index: i64,
    /// Timestamp of the first frame.
    pub start: NaiveDateTime,
    /// Spacing between frames.
    pub frequency: Frequency,
    /// Aggregate large grids to display size.
    pub decimate: bool,
    /// Sentinel for cells without data.
    pub undefined: f64,
}

/// Renders flood model outputs over a fixed satellite basemap.
#[derive(Debug, Clone)]
pub struct Visualizer {
    basemap: TileLayer,
}

impl Visualizer {
    /// Create a visualizer with the world imagery basemap.
    pub fn new() -> Result<Self> {
        Ok(Self {
            basemap: TileLayer::world_imagery()?,
        })
    }

    /// The basemap shared by every overlay.
    pub fn basemap(&self) -> &TileLayer {
        &self.basemap
    }

    /// Draw a labeled array over the basemap.
    pub fn render_map(&self, array: LabeledArray, name: &str, options: RenderOptions) -> Result<MapOverlay> {
        MapOverlay::build(array, name, self.basemap.clone(), options)
    }

    /// Read, label and draw a single grid output.
    pub fn show(
        &self,
        grid_path: &Path,
        name: &str,
        cache_path: &Path,
        decimate: bool,
        undefined: f64,
    ) -> Result<MapOverlay> {
        self.show_with(
            grid_path,
            name,
            cache_path,
            DEFAULT_HEADER_LINES,
            undefined,
            RenderOptions::with_decimation(decimate),
        )
    }

    /// [`Visualizer::show`] with an explicit header length and presentation options.
    pub fn show_with(
        &self,
        grid_path: &Path,
        name: &str,
        cache_path: &Path,
        header_lines: usize,
        undefined: f64,
        options: RenderOptions,
    ) -> Result<MapOverlay> {
        let table = GridTable::read(grid_path, header_lines)?;
        let coords = ReferenceCoords::read(cache_path, DEFAULT_CACHE_KIND)?;
        let array = LabeledArray::from_table(table, &coords, name, undefined)?;
        self.render_map(array, name, options)
    }

    /// Read a numbered series of grid outputs and draw them with a time slider.
    pub fn animate(&self, request: &AnimationRequest) -> Result<MapOverlay> {
        self.animate_with(request, RenderOptions::with_decimation(request.decimate))
    }

    /// [`Visualizer::animate`] with explicit presentation options.
    pub fn animate_with(&self, request: &AnimationRequest, options: RenderOptions) -> Result<MapOverlay> {
        let array = self.load_series(request)?;
        self.render_map(array, &request.name, options)
    }

    /// Read and stack the frames of an animation without rendering them.
    pub fn load_series(&self, request: &AnimationRequest) -> Result<LabeledArray> {
        let periods = request
            .end_index
            .checked_sub(request.start_index)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                FloodVizError::dimension_mismatch(format!(
                    "invalid frame range {}..{}",
                    request.start_index, request.end_index
                ))
            })?;
        let coords = ReferenceCoords::read(&request.cache_path, DEFAULT_CACHE_KIND)?;

        let mut frames = Vec::new();
        for index in request.start_index..request.end_index {
            let path = request.path_template.format(index);
            tracing::debug!(index, path = %path.display(), "Loading frame");
            let table = GridTable::read(&path, DEFAULT_HEADER_LINES)?;
            frames.push(LabeledArray::from_table(table, &coords, request.name.as_str(), request.undefined)?);
        }

        let dates = date_range(request.start, periods, request.frequency)?;
        LabeledArray::stack_time(frames, dates)
    }
}
