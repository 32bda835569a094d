//! Utility functions.
//!
//! This module provides frame path templating and timestamp helpers.

mod path_template;
mod time;

pub use path_template::PathTemplate;
pub use time::{date_range, parse_datetime, Frequency, FrequencyUnit};
