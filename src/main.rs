//! floodviz - render flood model outputs as interactive map overlays.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use floodviz::data::{DEFAULT_HEADER_LINES, DEFAULT_UNDEFINED};
use floodviz::render::RenderOptions;
use floodviz::util::{parse_datetime, Frequency, PathTemplate};
use floodviz::{AnimationRequest, Visualizer};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "floodviz")]
#[command(about = "Render flood model grid outputs as map overlays", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a single grid output
    Show {
        /// Grid output file
        grid: PathBuf,

        #[command(flatten)]
        common: CommonArgs,

        /// Number of header lines before the data block
        #[arg(long, default_value_t = DEFAULT_HEADER_LINES)]
        header_lines: usize,
    },
    /// Draw a numbered series of grid outputs with a time slider
    Animate {
        /// printf-style path template, e.g. results/res-%04d.wd
        template: PathTemplate,

        #[command(flatten)]
        common: CommonArgs,

        /// First output index (inclusive)
        #[arg(long)]
        start_index: i64,

        /// Last output index (exclusive)
        #[arg(long)]
        end_index: i64,

        /// Timestamp of the first output (YYYY-MM-DD[THH:MM:SS])
        #[arg(long)]
        start_date: String,

        /// Spacing between outputs, e.g. D, 6H, 15min
        #[arg(long, default_value = "D")]
        freq: Frequency,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Variable name shown on the map
    #[arg(long)]
    name: String,

    /// Cached NetCDF file holding the lat/lon axes
    #[arg(long)]
    cache: PathBuf,

    /// Output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Sentinel value for cells without data
    #[arg(long, default_value_t = DEFAULT_UNDEFINED, allow_negative_numbers = true)]
    undef: f64,

    /// JSON file with rendering options
    #[arg(long)]
    style: Option<PathBuf>,

    /// Draw every cell instead of aggregating to display size
    #[arg(long)]
    no_decimate: bool,

    /// Plot width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Plot height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Colormap name (append _r to reverse)
    #[arg(long)]
    cmap: Option<String>,

    /// Overlay opacity between 0 and 1
    #[arg(long)]
    alpha: Option<f64>,
}

impl CommonArgs {
    /// Style file (or defaults) overridden by explicit flags.
    fn render_options(&self) -> Result<RenderOptions> {
        let mut options = match self.style {
            Some(ref path) => RenderOptions::from_file(path)
                .with_context(|| format!("Failed to load style {}", path.display()))?,
            None => RenderOptions::default(),
        };
        if self.no_decimate {
            options.decimate = false;
        }
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(ref cmap) = self.cmap {
            options.colormap = cmap.clone();
        }
        if let Some(alpha) = self.alpha {
            options.alpha = alpha;
        }
        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_ref())?;
    tracing::info!("Starting floodviz");

    let viz = Visualizer::new()?;
    match cli.command {
        Command::Show {
            grid,
            common,
            header_lines,
        } => {
            let options = common.render_options()?;
            let overlay = viz.show_with(&grid, &common.name, &common.cache, header_lines, common.undef, options)?;
            overlay.save_html(&common.output)?;
            println!(
                "Wrote {} ({} missing cells)",
                common.output.display(),
                overlay.array().missing_count()
            );
        }
        Command::Animate {
            template,
            common,
            start_index,
            end_index,
            start_date,
            freq,
        } => {
            let options = common.render_options()?;
            let request = AnimationRequest {
                path_template: template,
                name: common.name.clone(),
                cache_path: common.cache.clone(),
                start_index,
                end_index,
                start: parse_datetime(&start_date)?,
                frequency: freq,
                decimate: options.decimate,
                undefined: common.undef,
            };
            let overlay = viz.animate_with(&request, options)?;
            overlay.save_html(&common.output)?;
            println!(
                "Wrote {} ({} frames)",
                common.output.display(),
                overlay.frames().len()
            );
        }
    }

    tracing::info!("floodviz finished");
    Ok(())
}

fn init_logging(log_path: Option<&PathBuf>) -> Result<()> {
    // Set up file logging if --log option is provided
    if let Some(log_path) = log_path {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}
