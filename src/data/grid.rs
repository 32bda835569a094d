//! Plain-text grid output reader.

use crate::error::{FloodVizError, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Number of header lines written ahead of the data block (ESRI ASCII raster).
pub const DEFAULT_HEADER_LINES: usize = 6;

/// A rectangular numeric table read from a grid output file.
///
/// Rows map to latitude indices, columns to longitude indices.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTable {
    /// Cell values, `[row, col]`.
    pub values: Array2<f64>,
}

impl GridTable {
    /// Wrap an existing array.
    pub fn new(values: Array2<f64>) -> Self {
        Self { values }
    }

    /// Read a whitespace-delimited grid file, skipping `header_lines` lines.
    pub fn read(path: &Path, header_lines: usize) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FloodVizError::file_open(path, e))?;
        let table = Self::parse(&text, header_lines).map_err(|(line, message)| {
            FloodVizError::GridParse {
                path: path.to_path_buf(),
                line,
                message,
            }
        })?;

        tracing::debug!(
            path = %path.display(),
            rows = table.rows(),
            cols = table.cols(),
            "Read grid file"
        );
        Ok(table)
    }

    /// Parse grid text. Errors carry the 1-based line number.
    fn parse(text: &str, header_lines: usize) -> std::result::Result<Self, (usize, String)> {
        let mut width: Option<usize> = None;
        let mut values = Vec::new();
        let mut rows = 0usize;

        for (idx, line) in text.lines().enumerate().skip(header_lines) {
            let line_no = idx + 1;
            let start = values.len();
            for token in line.split_whitespace() {
                let value: f64 = token
                    .parse()
                    .map_err(|_| (line_no, format!("not a number: '{}'", token)))?;
                values.push(value);
            }

            let count = values.len() - start;
            if count == 0 {
                continue;
            }
            match width {
                None => width = Some(count),
                Some(w) if w != count => {
                    return Err((line_no, format!("expected {} fields, found {}", w, count)));
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let cols = width.unwrap_or(0);
        let values = Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| (header_lines + 1, e.to_string()))?;
        Ok(Self { values })
    }

    /// Number of rows (latitudes).
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (longitudes).
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ncols 3\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\nNODATA_value -9999\n";

    #[test]
    fn skips_exactly_the_header() {
        let text = format!("{}1 2 3\n4 5 6\n", HEADER);
        let table = GridTable::parse(&text, 6).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.values[[1, 2]], 6.0);
    }

    #[test]
    fn short_header_keeps_extra_lines_as_data() {
        let text = "h1\n1 2\n3 4\n";
        let table = GridTable::parse(text, 1).unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.values[[0, 0]], 1.0);
    }

    #[test]
    fn tolerates_irregular_spacing_and_blank_lines() {
        let text = format!("{}  1\t2   3  \n\n4 5 6\n\n", HEADER);
        let table = GridTable::parse(&text, 6).unwrap();
        assert_eq!(table.shape(), (2, 3));
    }

    #[test]
    fn ragged_row_reports_line() {
        let text = format!("{}1 2 3\n4 5\n", HEADER);
        let (line, message) = GridTable::parse(&text, 6).unwrap_err();
        assert_eq!(line, 8);
        assert!(message.contains("expected 3"));
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        let text = format!("{}1 x 3\n", HEADER);
        let (line, _) = GridTable::parse(&text, 6).unwrap_err();
        assert_eq!(line, 7);
    }

    #[test]
    fn header_only_file_is_empty() {
        let table = GridTable::parse(HEADER, 6).unwrap();
        assert_eq!(table.shape(), (0, 0));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GridTable::read(Path::new("/nonexistent/res-0001.wd"), 6).unwrap_err();
        assert!(err.is_io());
    }
}
