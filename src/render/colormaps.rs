//! Color mapping functions for map overlays.

use crate::error::{FloodVizError, Result};
use std::str::FromStr;

/// An RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Fully transparent pixel used for missing cells.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// `#rrggbb` form, ignoring alpha.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Base color ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    /// Black through blue, green and tan to white; terrain-like.
    GistEarth,
    /// Perceptually uniform, colorblind-friendly.
    Viridis,
    /// Perceptually uniform.
    Plasma,
    /// HSV sweep from blue to red.
    Rainbow,
    /// White to dark blue.
    Blues,
    /// Blue-white-red diverging.
    CoolWarm,
}

// Anchor stops (position, r, g, b) for the piecewise-linear ramps.
const GIST_EARTH: &[(f64, [u8; 3])] = &[
    (0.00, [0, 0, 0]),
    (0.12, [30, 42, 120]),
    (0.25, [46, 94, 132]),
    (0.38, [60, 131, 120]),
    (0.50, [78, 148, 82]),
    (0.62, [122, 163, 78]),
    (0.75, [176, 172, 96]),
    (0.88, [208, 186, 160]),
    (1.00, [253, 250, 250]),
];

const VIRIDIS: &[(f64, [u8; 3])] = &[
    (0.00, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.50, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.00, [253, 231, 37]),
];

const PLASMA: &[(f64, [u8; 3])] = &[
    (0.00, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.50, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.00, [240, 249, 33]),
];

const BLUES: &[(f64, [u8; 3])] = &[
    (0.00, [247, 251, 255]),
    (0.50, [107, 174, 214]),
    (1.00, [8, 48, 107]),
];

const COOLWARM: &[(f64, [u8; 3])] = &[
    (0.00, [59, 76, 192]),
    (0.50, [221, 221, 221]),
    (1.00, [180, 4, 38]),
];

impl Ramp {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "gist_earth" => Some(Self::GistEarth),
            "viridis" => Some(Self::Viridis),
            "plasma" => Some(Self::Plasma),
            "rainbow" => Some(Self::Rainbow),
            "Blues" | "blues" => Some(Self::Blues),
            "coolwarm" => Some(Self::CoolWarm),
            _ => None,
        }
    }

    fn rgb(self, t: f64) -> [u8; 3] {
        match self {
            Self::GistEarth => interpolate(GIST_EARTH, t),
            Self::Viridis => interpolate(VIRIDIS, t),
            Self::Plasma => interpolate(PLASMA, t),
            Self::Rainbow => rainbow_color(t),
            Self::Blues => interpolate(BLUES, t),
            Self::CoolWarm => interpolate(COOLWARM, t),
        }
    }
}

/// A named colormap, optionally reversed (`_r` suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colormap {
    ramp: Ramp,
    reversed: bool,
}

impl Colormap {
    /// Look up a colormap by name, e.g. `gist_earth_r`.
    pub fn from_name(name: &str) -> Result<Self> {
        let unknown = || FloodVizError::UnknownColormap {
            name: name.to_string(),
        };
        if let Some(ramp) = Ramp::from_name(name) {
            return Ok(Self { ramp, reversed: false });
        }
        let base = name.strip_suffix("_r").ok_or_else(unknown)?;
        let ramp = Ramp::from_name(base).ok_or_else(unknown)?;
        Ok(Self { ramp, reversed: true })
    }

    /// Map a normalized value (0.0 to 1.0) to an opaque color.
    pub fn color(self, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };
        let [r, g, b] = self.ramp.rgb(t);
        Rgba([r, g, b, 255])
    }

    /// Evenly spaced colors from low to high, for legends.
    pub fn samples(self, n: usize) -> Vec<Rgba> {
        match n {
            0 => Vec::new(),
            1 => vec![self.color(0.5)],
            _ => (0..n).map(|i| self.color(i as f64 / (n - 1) as f64)).collect(),
        }
    }
}

impl FromStr for Colormap {
    type Err = FloodVizError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

fn interpolate(stops: &[(f64, [u8; 3])], t: f64) -> [u8; 3] {
    let upper = stops
        .iter()
        .position(|&(pos, _)| pos >= t)
        .unwrap_or(stops.len() - 1);
    if upper == 0 {
        return stops[0].1;
    }
    let (p0, c0) = stops[upper - 1];
    let (p1, c1) = stops[upper];
    let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    [lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2])]
}

/// Rainbow/Spectral colormap.
fn rainbow_color(t: f64) -> [u8; 3] {
    // HSV to RGB conversion with H varying from 240° (blue) to 0° (red)
    let h = (1.0 - t) * 240.0;
    let c = 1.0;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else {
        (0.0, x, c)
    };

    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_map_swaps_ends() {
        let fwd = Colormap::from_name("gist_earth").unwrap();
        let rev = Colormap::from_name("gist_earth_r").unwrap();
        assert_eq!(fwd.color(0.0), rev.color(1.0));
        assert_eq!(fwd.color(1.0), rev.color(0.0));
        // low values are light, high values dark in the default map
        assert_eq!(rev.color(0.0).0, [253, 250, 250, 255]);
        assert_eq!(rev.color(1.0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn interpolates_between_stops() {
        let cmap = Colormap::from_name("coolwarm").unwrap();
        assert_eq!(cmap.color(0.5).0, [221, 221, 221, 255]);
        assert_eq!(cmap.color(0.25).0, [140, 149, 207, 255]);
    }

    #[test]
    fn clamps_out_of_range() {
        let cmap = Colormap::from_name("viridis").unwrap();
        assert_eq!(cmap.color(-3.0), cmap.color(0.0));
        assert_eq!(cmap.color(7.0), cmap.color(1.0));
    }

    #[test]
    fn rainbow_runs_blue_to_red() {
        let cmap = Colormap::from_name("rainbow").unwrap();
        assert_eq!(cmap.color(0.0).0, [0, 0, 255, 255]);
        assert_eq!(cmap.color(1.0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn unknown_names_fail() {
        for bad in ["jet", "_r", "viridis_rr", ""] {
            assert!(matches!(
                Colormap::from_name(bad),
                Err(FloodVizError::UnknownColormap { .. })
            ));
        }
    }

    #[test]
    fn legend_samples() {
        let cmap = Colormap::from_name("Blues").unwrap();
        let samples = cmap.samples(3);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].hex(), "#f7fbff");
        assert_eq!(samples[2].hex(), "#08306b");
    }
}
