//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const ROWS: usize = 10;
pub const COLS: usize = 8;

/// Write an ESRI-style grid with a six-line header.
pub fn write_grid(path: &Path, values: &[Vec<f64>]) {
    let rows = values.len();
    let cols = values.first().map_or(0, |r| r.len());
    let mut text = String::new();
    writeln!(text, "ncols         {}", cols).unwrap();
    writeln!(text, "nrows         {}", rows).unwrap();
    writeln!(text, "xllcorner     10.0").unwrap();
    writeln!(text, "yllcorner     50.0").unwrap();
    writeln!(text, "cellsize      0.01").unwrap();
    writeln!(text, "NODATA_value  -9999").unwrap();
    for row in values {
        let line: Vec<String> = row.iter().map(|v| format!("{:.3}", v)).collect();
        writeln!(text, "{}", line.join(" ")).unwrap();
    }
    fs::write(path, text).unwrap();
}

/// A `ROWS x COLS` grid filled with `base + row + col / 10`, with three undefined cells.
pub fn sample_grid(base: f64) -> Vec<Vec<f64>> {
    let mut values: Vec<Vec<f64>> = (0..ROWS)
        .map(|r| (0..COLS).map(|c| base + r as f64 + c as f64 / 10.0).collect())
        .collect();
    values[0][0] = -9999.0;
    values[4][5] = -9999.0;
    values[9][7] = -9999.0;
    values
}

pub fn sample_lats() -> Vec<f64> {
    (0..ROWS).map(|i| 50.09 - i as f64 * 0.01).collect()
}

pub fn sample_lons() -> Vec<f64> {
    (0..COLS).map(|j| 10.005 + j as f64 * 0.01).collect()
}

/// Write a NetCDF domain cache with `lat` and `lon` coordinate variables.
pub fn write_cache(path: &Path, lats: &[f64], lons: &[f64]) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("lat", lats.len()).unwrap();
    file.add_dimension("lon", lons.len()).unwrap();
    {
        let mut var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        var.put_values(lats, ..).unwrap();
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        var.put_values(lons, ..).unwrap();
    }
    {
        let elevation = vec![0.0f32; lats.len() * lons.len()];
        let mut var = file.add_variable::<f32>("elevation", &["lat", "lon"]).unwrap();
        var.put_values(&elevation, ..).unwrap();
    }
}

/// Grid + cache in a temporary directory.
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub cache: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("domain.nc");
        write_cache(&cache, &sample_lats(), &sample_lons());
        Self { dir, cache }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `res-%04d.wd` frames for `range`, frame `i` offset by `i * 100`.
    pub fn write_frames(&self, range: std::ops::Range<usize>) {
        for i in range {
            write_grid(&self.path(&format!("res-{:04}.wd", i)), &sample_grid(i as f64 * 100.0));
        }
    }
}
