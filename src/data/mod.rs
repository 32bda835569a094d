//! Data reading and representation.
//!
//! This module reads model grid outputs and cached domain coordinates and
//! combines them into coordinate-labeled arrays.

mod grid;
mod labeled;
mod reference;

pub use grid::{GridTable, DEFAULT_HEADER_LINES};
pub use labeled::{LabeledArray, DEFAULT_UNDEFINED};
pub use reference::{CacheFormat, ReferenceCoords, DEFAULT_CACHE_KIND};
