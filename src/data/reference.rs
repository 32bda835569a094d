//! Cached model-domain coordinates.

use crate::error::{FloodVizError, Result};
use ndarray::Array1;
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default cache format kind.
pub const DEFAULT_CACHE_KIND: &str = "nc";

/// Supported reference cache formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheFormat {
    /// Self-describing NetCDF file with `lat` and `lon` variables.
    #[default]
    NetCdf,
}

impl FromStr for CacheFormat {
    type Err = FloodVizError;

    fn from_str(kind: &str) -> Result<Self> {
        match kind {
            "nc" => Ok(Self::NetCdf),
            other => Err(FloodVizError::unsupported_format(other)),
        }
    }
}

impl fmt::Display for CacheFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetCdf => f.write_str("nc"),
        }
    }
}

/// Latitude and longitude axes of the model domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCoords {
    /// Latitudes, one per grid row.
    pub lat: Array1<f64>,
    /// Longitudes, one per grid column.
    pub lon: Array1<f64>,
}

impl ReferenceCoords {
    /// Build from explicit axes.
    pub fn new(lat: impl Into<Array1<f64>>, lon: impl Into<Array1<f64>>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Read coordinates from a cache file of the given kind.
    ///
    /// The kind is checked before the file is touched.
    pub fn read(path: &Path, kind: &str) -> Result<Self> {
        match kind.parse::<CacheFormat>()? {
            CacheFormat::NetCdf => Self::read_netcdf(path),
        }
    }

    fn read_netcdf(path: &Path) -> Result<Self> {
        std::fs::metadata(path).map_err(|e| FloodVizError::file_open(path, e))?;
        let file = netcdf::open(path)
            .map_err(|e| FloodVizError::NetCDF(format!("Failed to open {}: {}", path.display(), e)))?;

        let lat = read_axis(&file, "lat", path)?;
        let lon = read_axis(&file, "lon", path)?;

        tracing::debug!(
            path = %path.display(),
            lat = lat.len(),
            lon = lon.len(),
            "Read reference coordinates"
        );
        Ok(Self { lat, lon })
    }
}

fn read_axis(file: &netcdf::File, name: &str, path: &Path) -> Result<Array1<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| FloodVizError::MissingCoordinate {
            name: name.to_string(),
            path: path.to_path_buf(),
        })?;

    if var.dimensions().len() != 1 {
        return Err(FloodVizError::dimension_mismatch(format!(
            "coordinate '{}' must be one-dimensional, found {} dimensions",
            name,
            var.dimensions().len()
        )));
    }

    Ok(Array1::from(read_values(&var)?))
}

fn read_values(var: &netcdf::Variable<'_>) -> Result<Vec<f64>> {
    fn widen<T: Into<f64>>(values: Vec<T>) -> Vec<f64> {
        values.into_iter().map(Into::into).collect()
    }

    let vartype = var.vartype();
    let values = match vartype {
        NcVariableType::Float(FloatType::F64) => var.get_values::<f64, _>(..)?,
        NcVariableType::Float(FloatType::F32) => widen(var.get_values::<f32, _>(..)?),
        NcVariableType::Int(IntType::I64) => var
            .get_values::<i64, _>(..)?
            .into_iter()
            .map(|x| x as f64)
            .collect(),
        NcVariableType::Int(IntType::I32) => widen(var.get_values::<i32, _>(..)?),
        NcVariableType::Int(IntType::I16) => widen(var.get_values::<i16, _>(..)?),
        NcVariableType::Int(IntType::I8) => widen(var.get_values::<i8, _>(..)?),
        NcVariableType::Int(IntType::U64) => var
            .get_values::<u64, _>(..)?
            .into_iter()
            .map(|x| x as f64)
            .collect(),
        NcVariableType::Int(IntType::U32) => widen(var.get_values::<u32, _>(..)?),
        NcVariableType::Int(IntType::U16) => widen(var.get_values::<u16, _>(..)?),
        NcVariableType::Int(IntType::U8) => widen(var.get_values::<u8, _>(..)?),
        NcVariableType::Char | NcVariableType::String => {
            return Err(FloodVizError::NetCDF(format!(
                "Coordinate '{}' holds character data",
                var.name()
            )));
        }
        _ => {
            return Err(FloodVizError::NetCDF(format!(
                "Unsupported coordinate type: {:?}",
                vartype
            )));
        }
    };
    Ok(values)
}
