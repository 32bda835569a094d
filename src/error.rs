//! Error types for floodviz.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for floodviz operations.
pub type Result<T> = std::result::Result<T, FloodVizError>;

/// Errors that can occur while reading, shaping or rendering flood outputs.
#[derive(Debug, Error)]
pub enum FloodVizError {
    /// Failed to open a file for reading.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Grid text could not be parsed as a numeric table.
    #[error("Malformed grid file {path} at line {line}: {message}")]
    GridParse {
        /// Grid file path.
        path: PathBuf,
        /// 1-based line number in the file.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Unsupported reference cache format.
    #[error("Unsupported cache format: {kind}")]
    UnsupportedFormat {
        /// Requested format kind.
        kind: String,
    },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Reference cache lacks a coordinate variable.
    #[error("Coordinate '{name}' not found in {path}")]
    MissingCoordinate {
        /// Coordinate variable name.
        name: String,
        /// Cache file path.
        path: PathBuf,
    },

    /// Array shapes, axis lengths or list lengths disagree.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A time-indexed array was requested from zero frames.
    #[error("No frames to stack along time")]
    NoFrames,

    /// Colormap name is not known.
    #[error("Unknown colormap: {name}")]
    UnknownColormap {
        /// Requested colormap name.
        name: String,
    },

    /// Rendering options are out of range.
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    /// Basemap URL template lacks tile placeholders.
    #[error("Invalid tile URL template: {url}")]
    InvalidTileTemplate {
        /// Offending template.
        url: String,
    },

    /// Frame path template is malformed.
    #[error("Invalid path template '{template}': {reason}")]
    InvalidPathTemplate {
        /// Offending template.
        template: String,
        /// What went wrong.
        reason: String,
    },

    /// Frequency alias is not recognised.
    #[error("Invalid frequency: {freq}")]
    InvalidFrequency {
        /// Offending alias.
        freq: String,
    },

    /// Date string could not be parsed.
    #[error("Invalid date: {input}")]
    InvalidDate {
        /// Offending input.
        input: String,
    },

    /// Date arithmetic overflowed.
    #[error("Date range overflows the supported calendar")]
    DateOverflow,

    /// Raster encoding failed.
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Embedded metadata could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FloodVizError {
    /// Create a FileOpen error.
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a FileWrite error.
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(kind: impl Into<String>) -> Self {
        Self::UnsupportedFormat { kind: kind.into() }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch(message.into())
    }

    /// Whether this error came from the operating system's file layer.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::FileOpen { .. } | Self::FileWrite { .. } | Self::Io(_)
        )
    }
}

impl From<netcdf::Error> for FloodVizError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}

impl From<ndarray::ShapeError> for FloodVizError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::DimensionMismatch(err.to_string())
    }
}
