// main.rs - Game of Life window. eframe owns the frame loop and calls into
// the conway core once per refresh; the update loop runs on tokio.

use std::time::Duration;

use clap::Parser;
use conway::{Canvas, Coordinator, Game, Settings, UpdateLoopError};
use eframe::egui;
use tokio::task::JoinHandle;

mod ui;

use ui::LifeWindow;

const JOIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "conway_window")]
#[command(version)]
#[command(about = "Conway's Game of Life with the update loop synchronized to the render loop")]
struct Cli {
    /// Grid width in cells (one cell per pixel)
    #[arg(long, default_value_t = conway::grid::SCREEN_WIDTH)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = conway::grid::SCREEN_HEIGHT)]
    height: usize,

    /// Random placements when seeding [default: a tenth of the cells]
    #[arg(long)]
    initial_cells: Option<usize>,

    /// Update period in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Stop after this many seconds, 0 runs until the window is closed
    #[arg(long, default_value_t = 10)]
    auto_shutdown_secs: u64,

    /// Random seed for reproducible seeding
    #[arg(long)]
    seed: Option<u64>,

    /// Stamp a named pattern (e.g. "Glider", "Gosper Glider Gun") instead of random cells
    #[arg(long)]
    pattern: Option<String>,
}

impl Cli {
    fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            width: self.width,
            height: self.height,
            initial_live_cells: self.initial_cells.unwrap_or(self.width * self.height / 10),
            tick: Duration::from_millis(self.tick_ms),
            auto_shutdown: (self.auto_shutdown_secs > 0).then(|| Duration::from_secs(self.auto_shutdown_secs)),
            hex_grid: defaults.hex_grid,
            seed: self.seed,
            pattern: self.pattern,
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Cli::parse().into_settings();
    log::info!("Starting Game of Life {}x{}", settings.width, settings.height);
    log::info!("Tick: {:?}, auto-shutdown: {:?}", settings.tick, settings.auto_shutdown);

    if let Err(e) = run(settings) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = Coordinator::from_settings(&settings)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let update_loop = coordinator.spawn(runtime.handle());

    let renderer = coordinator.renderer(Canvas::new(settings.width, settings.height), settings.hex_grid);
    let (width, height) = renderer.layout(0.0, 0.0);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_resizable(false),
        ..Default::default()
    };

    let window = LifeWindow::new(renderer);
    if let Err(e) = eframe::run_native(
        "Game of Life",
        options,
        Box::new(move |_cc| Box::new(window)),
    ) {
        // Fatal: exit before the runtime or the update loop is touched
        log::error!("fatal host error: {e}");
        std::process::exit(1);
    }

    coordinator.request_shutdown();
    join_update_loop(&runtime, update_loop);
    Ok(())
}

/// Waits for the update task after the window has gone.
fn join_update_loop(runtime: &tokio::runtime::Runtime, update_loop: JoinHandle<Result<(), UpdateLoopError>>) {
    match runtime.block_on(async { tokio::time::timeout(JOIN_TIMEOUT, update_loop).await }) {
        Ok(Ok(Ok(()))) => log::info!("update loop joined"),
        Ok(Ok(Err(e))) => log::error!("update loop failed: {e}"),
        Ok(Err(e)) => log::error!("update task panicked: {e}"),
        Err(_) => log::error!("update loop did not stop within {JOIN_TIMEOUT:?}"),
    }
}
