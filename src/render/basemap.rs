//! Basemap tile layer.

use crate::error::{FloodVizError, Result};

/// ArcGIS World Imagery tiles, addressed by zoom/row/column.
pub const WORLD_IMAGERY_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{Z}/{Y}/{X}.jpg";

const WORLD_IMAGERY_ATTRIBUTION: &str = "Tiles &copy; Esri";

/// A templated XYZ tile source drawn beneath the data overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    url_template: String,
    attribution: String,
}

impl TileLayer {
    /// Build a tile layer from a template holding `{Z}`, `{Y}` and `{X}`
    /// (case-insensitive) placeholders.
    pub fn new(url_template: impl Into<String>, attribution: impl Into<String>) -> Result<Self> {
        let url_template = url_template.into();
        let upper = url_template.to_ascii_uppercase();
        let complete = ["{Z}", "{Y}", "{X}"].iter().all(|p| upper.contains(p));
        if !complete || !(upper.starts_with("HTTP://") || upper.starts_with("HTTPS://")) {
            return Err(FloodVizError::InvalidTileTemplate { url: url_template });
        }
        Ok(Self {
            url_template,
            attribution: attribution.into(),
        })
    }

    /// The fixed satellite imagery basemap.
    pub fn world_imagery() -> Result<Self> {
        Self::new(WORLD_IMAGERY_URL, WORLD_IMAGERY_ATTRIBUTION)
    }

    /// Template as given.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Attribution HTML shown on the map.
    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// Template with lowercase `{z}/{y}/{x}` placeholders, as web map clients expect.
    pub fn client_template(&self) -> String {
        self.url_template
            .replace("{Z}", "{z}")
            .replace("{Y}", "{y}")
            .replace("{X}", "{x}")
    }
}
