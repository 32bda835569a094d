//! Decimation of large grids to display resolution.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

/// A frame ready to rasterize, with the coordinates of its cell centers.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGrid {
    /// Cell values, `[lat, lon]`.
    pub values: Array2<f64>,
    /// Latitude of each row.
    pub lat: Array1<f64>,
    /// Longitude of each column.
    pub lon: Array1<f64>,
}

impl DisplayGrid {
    /// Use a frame at its native resolution.
    pub fn native(values: ArrayView2<'_, f64>, lat: ArrayView1<'_, f64>, lon: ArrayView1<'_, f64>) -> Self {
        Self {
            values: values.to_owned(),
            lat: lat.to_owned(),
            lon: lon.to_owned(),
        }
    }

    /// `(rows, cols)`.
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }
}

/// Block factors that bring `rows x cols` within `max_rows x max_cols`.
///
/// Never below 1: grids are not upsampled.
pub fn block_factors(rows: usize, cols: usize, max_rows: usize, max_cols: usize) -> (usize, usize) {
    let factor = |n: usize, max: usize| if max == 0 { 1 } else { ceil_div(n, max).max(1) };
    (factor(rows, max_rows), factor(cols, max_cols))
}

/// Aggregate a frame by NaN-skipping block means so it fits `max_rows x max_cols`.
///
/// Each output coordinate is the mean of the coordinates it covers.
/// Blocks with no valid cell stay missing.
pub fn decimate(
    values: ArrayView2<'_, f64>,
    lat: ArrayView1<'_, f64>,
    lon: ArrayView1<'_, f64>,
    max_rows: usize,
    max_cols: usize,
) -> DisplayGrid {
    let (rows, cols) = values.dim();
    let (fr, fc) = block_factors(rows, cols, max_rows, max_cols);
    if fr == 1 && fc == 1 {
        return DisplayGrid::native(values, lat, lon);
    }

    let out_rows = ceil_div(rows, fr);
    let out_cols = ceil_div(cols, fc);
    let mut out = Array2::from_elem((out_rows, out_cols), f64::NAN);

    for r in 0..out_rows {
        let r0 = r * fr;
        let r1 = (r0 + fr).min(rows);
        for c in 0..out_cols {
            let c0 = c * fc;
            let c1 = (c0 + fc).min(cols);
            let block = values.slice(s![r0..r1, c0..c1]);

            let mut sum = 0.0;
            let mut count = 0usize;
            for &v in block.iter() {
                if !v.is_nan() {
                    sum += v;
                    count += 1;
                }
            }
            if count > 0 {
                out[[r, c]] = sum / count as f64;
            }
        }
    }

    tracing::debug!(
        from = ?(rows, cols),
        to = ?(out_rows, out_cols),
        "Decimated grid for display"
    );

    DisplayGrid {
        values: out,
        lat: block_mean_axis(lat, fr),
        lon: block_mean_axis(lon, fc),
    }
}

fn block_mean_axis(axis: ArrayView1<'_, f64>, factor: usize) -> Array1<f64> {
    let values: Vec<f64> = axis.iter().copied().collect();
    values
        .chunks(factor)
        .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
        .collect()
}

fn ceil_div(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}
