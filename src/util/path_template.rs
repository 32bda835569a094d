//! printf-style frame path templates.

use crate::error::{FloodVizError, Result};
use std::path::PathBuf;

/// How the frame index is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    width: usize,
    zero_pad: bool,
}

/// A path containing exactly one integer placeholder, e.g. `out/res-%04d.wd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    prefix: String,
    suffix: String,
    placeholder: Placeholder,
}

impl PathTemplate {
    /// Parse a template. Accepts `%d`, `%i`, `%s` with an optional
    /// width (`%5d`) or zero-padded width (`%05d`); `%%` is a literal `%`.
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| FloodVizError::InvalidPathTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholder = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if placeholder.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                out.push('%');
                continue;
            }

            let zero_pad = chars.peek() == Some(&'0');
            if zero_pad {
                chars.next();
            }
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            match chars.next() {
                Some('d') | Some('i') | Some('s') => {}
                Some(other) => return Err(invalid(&format!("unsupported conversion '%{}'", other))),
                None => return Err(invalid("incomplete placeholder")),
            }
            if placeholder.is_some() {
                return Err(invalid("more than one placeholder"));
            }
            let width = if digits.is_empty() {
                0
            } else {
                digits.parse().map_err(|_| invalid("placeholder width too large"))?
            };
            placeholder = Some(Placeholder { width, zero_pad });
        }

        let placeholder = placeholder.ok_or_else(|| invalid("no placeholder for the frame index"))?;
        Ok(Self {
            template: template.to_string(),
            prefix,
            suffix,
            placeholder,
        })
    }

    /// Substitute `index` into the template.
    pub fn format(&self, index: i64) -> PathBuf {
        let Placeholder { width, zero_pad } = self.placeholder;
        let number = if zero_pad {
            format!("{:0width$}", index, width = width)
        } else {
            format!("{:>width$}", index, width = width)
        };
        PathBuf::from(format!("{}{}{}", self.prefix, number, self.suffix))
    }

    /// The original template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl std::str::FromStr for PathTemplate {
    type Err = FloodVizError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_padded_index() {
        let t = PathTemplate::parse("out/res-%04d.wd").unwrap();
        assert_eq!(t.format(7), PathBuf::from("out/res-0007.wd"));
        assert_eq!(t.format(12345), PathBuf::from("out/res-12345.wd"));
    }

    #[test]
    fn plain_and_space_padded() {
        assert_eq!(PathTemplate::parse("f%d").unwrap().format(3), PathBuf::from("f3"));
        assert_eq!(PathTemplate::parse("f%3i").unwrap().format(3), PathBuf::from("f  3"));
        assert_eq!(PathTemplate::parse("f%s.asc").unwrap().format(10), PathBuf::from("f10.asc"));
    }

    #[test]
    fn literal_percent() {
        let t = PathTemplate::parse("100%%/f-%02d").unwrap();
        assert_eq!(t.format(1), PathBuf::from("100%/f-01"));
    }

    #[test]
    fn negative_index_keeps_sign() {
        let t = PathTemplate::parse("f%03d").unwrap();
        assert_eq!(t.format(-5), PathBuf::from("f-05"));
    }

    #[test]
    fn rejects_bad_templates() {
        for bad in ["res.wd", "a%d-%d", "a%f", "a%", "a%05"] {
            assert!(
                matches!(PathTemplate::parse(bad), Err(FloodVizError::InvalidPathTemplate { .. })),
                "accepted {}",
                bad
            );
        }
    }
}
