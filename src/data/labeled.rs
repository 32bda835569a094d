//! Coordinate-labeled arrays.

use super::{GridTable, ReferenceCoords};
use crate::error::{FloodVizError, Result};
use chrono::NaiveDateTime;
use ndarray::{Array1, Array2, ArrayD, ArrayView2, Axis, IxDyn};

/// Sentinel written by the model for cells without data.
pub const DEFAULT_UNDEFINED: f64 = -9999.0;

/// Grid values labeled with latitude/longitude axes, optionally stacked in time.
///
/// `data` is shaped `[lat, lon]`, or `[time, lat, lon]` when `time` is set.
/// Missing cells are NaN.
#[derive(Debug, Clone)]
pub struct LabeledArray {
    /// Variable name (e.g. "depth", "elevation").
    pub name: String,
    /// Latitude axis.
    pub lat: Array1<f64>,
    /// Longitude axis.
    pub lon: Array1<f64>,
    /// Time axis for stacked arrays.
    pub time: Option<Vec<NaiveDateTime>>,
    /// Cell values.
    pub data: ArrayD<f64>,
}

impl LabeledArray {
    /// Label a grid table with coordinates, masking `undefined` cells as missing.
    ///
    /// Axis lengths are checked against the table shape.
    pub fn from_table(
        table: GridTable,
        coords: &ReferenceCoords,
        name: impl Into<String>,
        undefined: f64,
    ) -> Result<Self> {
        let (rows, cols) = table.shape();
        if coords.lat.len() != rows || coords.lon.len() != cols {
            return Err(FloodVizError::dimension_mismatch(format!(
                "grid is {}x{} but coordinates are {} lat x {} lon",
                rows,
                cols,
                coords.lat.len(),
                coords.lon.len()
            )));
        }

        let mut values = table.values;
        values.mapv_inplace(|v| if v == undefined { f64::NAN } else { v });

        Ok(Self {
            name: name.into(),
            lat: coords.lat.clone(),
            lon: coords.lon.clone(),
            time: None,
            data: values.into_dyn(),
        })
    }

    /// Stack 2D arrays along a new leading `time` axis.
    ///
    /// `times[i]` labels `frames[i]`. The result takes its name and
    /// coordinates from the first frame.
    pub fn stack_time(frames: Vec<LabeledArray>, times: Vec<NaiveDateTime>) -> Result<Self> {
        if frames.len() != times.len() {
            return Err(FloodVizError::dimension_mismatch(format!(
                "{} frames but {} timestamps",
                frames.len(),
                times.len()
            )));
        }
        let first = frames.first().ok_or(FloodVizError::NoFrames)?;
        let shape = first.data.shape().to_vec();

        for (i, frame) in frames.iter().enumerate() {
            if frame.is_time_indexed() || frame.data.ndim() != 2 {
                return Err(FloodVizError::dimension_mismatch(format!(
                    "frame {} is not a 2D lat/lon array",
                    i
                )));
            }
            if frame.data.shape() != shape.as_slice() {
                return Err(FloodVizError::dimension_mismatch(format!(
                    "frame {} has shape {:?}, expected {:?}",
                    i,
                    frame.data.shape(),
                    shape
                )));
            }
        }

        let views: Vec<_> = frames.iter().map(|f| f.data.view()).collect();
        let data = ndarray::stack(Axis(0), &views)?;

        tracing::debug!(name = %first.name, frames = frames.len(), "Stacked frames along time");
        Ok(Self {
            name: first.name.clone(),
            lat: first.lat.clone(),
            lon: first.lon.clone(),
            time: Some(times),
            data,
        })
    }

    /// Whether the array carries a time axis.
    pub fn is_time_indexed(&self) -> bool {
        self.time.is_some()
    }

    /// Dimension names in storage order.
    pub fn dims(&self) -> Vec<&'static str> {
        if self.is_time_indexed() {
            vec!["time", "lat", "lon"]
        } else {
            vec!["lat", "lon"]
        }
    }

    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of time steps (1 for a plain 2D array).
    pub fn frame_count(&self) -> usize {
        match self.time {
            Some(ref t) => t.len(),
            None => 1,
        }
    }

    /// A single `[lat, lon]` frame.
    pub fn frame(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        let view = if self.is_time_indexed() {
            if index >= self.data.shape()[0] {
                return None;
            }
            self.data.index_axis(Axis(0), index)
        } else if index == 0 {
            self.data.view()
        } else {
            return None;
        };
        view.into_dimensionality().ok()
    }

    /// Owned copy of every frame, in time order.
    pub fn frames(&self) -> Vec<Array2<f64>> {
        (0..self.frame_count())
            .filter_map(|i| self.frame(i).map(|f| f.to_owned()))
            .collect()
    }

    /// Value at the given multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.data.get(IxDyn(index)).copied()
    }

    /// Count of missing (NaN) cells.
    pub fn missing_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }

    /// Minimum and maximum over finite cells.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut count = 0usize;
        for &v in self.data.iter() {
            if v.is_finite() {
                if v < min { min = v; }
                if v > max { max = v; }
                count += 1;
            }
        }
        if count > 0 { Some((min, max)) } else { None }
    }
}
