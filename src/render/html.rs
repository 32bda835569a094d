//! Self-contained HTML document for a map overlay.

use super::{GeoBounds, MapOverlay};
use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

const LEGEND_STOPS: usize = 11;

/// Leaflet page template. `__TITLE__` and `__CONFIG__` are substituted.
const DOCUMENT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>__TITLE__</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <style>
        body { margin: 0; padding: 12px; font-family: sans-serif; font-size: 0.85rem; }
        h1 { font-size: 1.1rem; margin: 0 0 8px 0; }
        .leaflet-image-layer { image-rendering: pixelated; }
        .panel { display: flex; align-items: center; gap: 10px; margin-top: 8px; }
        #colorbar { height: 12px; flex: 1; max-width: 320px; border: 1px solid #999; }
        #readout { min-height: 1.2em; font-family: monospace; }
        .hidden { display: none !important; }
    </style>
</head>
<body>
    <h1>__TITLE__</h1>
    <div id="map"></div>
    <div class="panel hidden" id="time-panel">
        <input type="range" id="time-slider" min="0" value="0" step="1">
        <span id="time-label"></span>
    </div>
    <div class="panel hidden" id="legend">
        <span id="range-min"></span>
        <div id="colorbar"></div>
        <span id="range-max"></span>
    </div>
    <div class="panel"><span id="readout"></span></div>
    <script type="application/json" id="floodviz-config">__CONFIG__</script>
    <script>
    (function () {
        const cfg = JSON.parse(document.getElementById('floodviz-config').textContent);
        const mapDiv = document.getElementById('map');
        mapDiv.style.width = cfg.width + 'px';
        mapDiv.style.height = cfg.height + 'px';

        const map = L.map('map');
        L.tileLayer(cfg.tiles, { attribution: cfg.attribution, maxZoom: 19 }).addTo(map);
        const b = cfg.bounds;
        const extent = [[b.south, b.west], [b.north, b.east]];
        const overlay = L.imageOverlay(cfg.frames[0].src, extent, { opacity: cfg.alpha }).addTo(map);
        map.fitBounds(extent);

        let current = 0;
        const fmt = (v) => (v === null || v === undefined) ? 'NaN' : Number(v).toPrecision(6);

        if (cfg.frames.length > 1 || cfg.frames[0].label !== null) {
            const panel = document.getElementById('time-panel');
            const slider = document.getElementById('time-slider');
            const label = document.getElementById('time-label');
            panel.classList.remove('hidden');
            slider.max = cfg.frames.length - 1;
            const select = (i) => {
                current = i;
                overlay.setUrl(cfg.frames[i].src);
                label.textContent = 'time: ' + cfg.frames[i].label;
            };
            slider.addEventListener('input', () => select(parseInt(slider.value, 10)));
            select(0);
        }

        if (cfg.colorbar && cfg.range !== null) {
            document.getElementById('legend').classList.remove('hidden');
            document.getElementById('colorbar').style.background =
                'linear-gradient(to right, ' + cfg.legend.join(', ') + ')';
            document.getElementById('range-min').textContent = fmt(cfg.range[0]);
            document.getElementById('range-max').textContent = fmt(cfg.range[1]);
        }

        if (cfg.hover) {
            const readout = document.getElementById('readout');
            map.on('mousemove', (e) => {
                const values = cfg.frames[current].values;
                const rows = values.length;
                const cols = rows > 0 ? values[0].length : 0;
                const lat = e.latlng.lat, lon = e.latlng.lng;
                if (lat < b.south || lat > b.north || lon < b.west || lon > b.east || rows === 0) {
                    readout.textContent = '';
                    return;
                }
                const r = Math.min(rows - 1, Math.floor((b.north - lat) / (b.north - b.south || 1) * rows));
                const c = Math.min(cols - 1, Math.floor((lon - b.west) / (b.east - b.west || 1) * cols));
                readout.textContent = 'lon: ' + lon.toFixed(5) + '  lat: ' + lat.toFixed(5) +
                    '  ' + cfg.name + ': ' + fmt(values[r][c]);
            });
            map.on('mouseout', () => { readout.textContent = ''; });
        }
    })();
    </script>
</body>
</html>
"#;

#[derive(Serialize)]
struct DocumentConfig<'a> {
    name: &'a str,
    width: u32,
    height: u32,
    alpha: f64,
    colorbar: bool,
    hover: bool,
    tiles: String,
    attribution: &'a str,
    bounds: GeoBounds,
    range: Option<[f64; 2]>,
    legend: Vec<String>,
    frames: Vec<FrameConfig>,
}

#[derive(Serialize)]
struct FrameConfig {
    label: Option<String>,
    src: String,
    values: Option<Vec<Vec<Option<f64>>>>,
}

pub(super) fn render_document(overlay: &MapOverlay) -> Result<String> {
    let options = overlay.options();
    let colormap = options.validate()?;

    let frames = overlay
        .frames()
        .iter()
        .map(|frame| FrameConfig {
            label: frame.label.clone(),
            src: format!("data:image/png;base64,{}", STANDARD.encode(&frame.png)),
            values: options.hover.then(|| {
                frame
                    .values
                    .rows()
                    .into_iter()
                    .map(|row| row.iter().map(|&v| v.is_finite().then_some(v)).collect())
                    .collect()
            }),
        })
        .collect();

    let config = DocumentConfig {
        name: overlay.name(),
        width: options.width,
        height: options.height,
        alpha: options.alpha,
        colorbar: options.colorbar,
        hover: options.hover,
        tiles: overlay.basemap().client_template(),
        attribution: overlay.basemap().attribution(),
        bounds: overlay.bounds(),
        range: overlay.value_range().map(|(lo, hi)| [lo, hi]),
        legend: colormap.samples(LEGEND_STOPS).into_iter().map(|c| c.hex()).collect(),
        frames,
    };

    let json = serde_json::to_string(&config)?;
    Ok(DOCUMENT_HTML
        .replace("__TITLE__", &html_escape::encode_text(overlay.name()))
        .replace("__CONFIG__", &json.replace("</", "<\\/")))
}
