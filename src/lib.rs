//! floodviz - render flood model outputs as interactive map overlays.
//!
//! floodviz reads the plain-text raster outputs of a 2D hydrodynamic model
//! (such as LISFLOOD-FP), labels them with the latitude/longitude axes of a
//! cached NetCDF domain file and draws them over a satellite basemap in a
//! self-contained HTML page.
//!
//! # Features
//!
//! - Whitespace-delimited grid reading with configurable header length
//! - Sentinel masking of cells without data
//! - Time-indexed stacks of numbered outputs with a slider
//! - Block-mean decimation of large grids to display size
//! - Colormaps with `_r` reversal, colorbar and hover readout
//!
//! # Example
//!
//! ```ignore
//! use floodviz::Visualizer;
//! use std::path::Path;
//!
//! let viz = Visualizer::new()?;
//! let overlay = viz.show(
//!     Path::new("results/res-0010.wd"),
//!     "depth",
//!     Path::new("cache/domain.nc"),
//!     true,
//!     -9999.0,
//! )?;
//! overlay.save_html(Path::new("depth.html"))?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod render;
pub mod util;
pub mod visualizer;

pub use error::{FloodVizError, Result};
pub use visualizer::{AnimationRequest, Visualizer};
