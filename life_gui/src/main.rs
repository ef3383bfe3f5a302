// main.rs - Conway's Game of Life in an egui window

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use life::{Controller, Fill, Grid, LoopOptions, Settings, Simulation, patterns};

mod ui;

use ui::{EguiSurface, LifeApp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FillMode {
    Dead,
    Random,
    Pattern,
}

#[derive(Debug, Parser)]
#[command(name = "life", about = "Conway's Game of Life")]
struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = 50)]
    rows: usize,
    /// Number of grid columns
    #[arg(long, default_value_t = 50)]
    cols: usize,
    /// How the grid is filled at startup
    #[arg(long, value_enum, default_value_t = FillMode::Dead)]
    fill: FillMode,
    /// Live-cell probability for `--fill random`
    #[arg(long, default_value_t = 0.25)]
    probability: f64,
    /// Seed for `--fill random`
    #[arg(long)]
    seed: Option<u64>,
    /// Pattern name for `--fill pattern`
    #[arg(long, default_value = "Glider")]
    pattern: String,
    /// TOML file with window settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pause after each frame, in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
    /// Frame-rate cap
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

impl Args {
    fn initial_fill(&self) -> Result<Fill> {
        Ok(match self.fill {
            FillMode::Dead => Fill::Dead,
            FillMode::Random => Fill::Random { probability: self.probability, seed: self.seed },
            FillMode::Pattern => {
                let pattern = patterns::find(&self.pattern).ok_or_else(|| {
                    let known: Vec<_> = patterns::names().collect();
                    anyhow!("unknown pattern {:?}, expected one of {}", self.pattern, known.join(", "))
                })?;
                Fill::Pattern(pattern)
            }
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    let grid = Grid::new(args.rows, args.cols, args.initial_fill()?).context("building the grid")?;

    let controller = Controller::new(EguiSurface::default(), settings.clone(), &grid)
        .context("sizing the window")?;
    let (width, height) = {
        let geometry = controller.geometry();
        (geometry.width as f32, geometry.height as f32)
    };
    let simulation = Simulation::new(
        grid,
        controller,
        LoopOptions { delay_ms: args.delay_ms, fps_cap: args.fps },
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        &settings.caption,
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(simulation))),
    )
    .map_err(|err| anyhow!("window error: {err}"))
}
