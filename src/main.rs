mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::EcgViewerApp;
use clap::Parser;
use cli::Cli;
use data::filter::build_window;
use data::loader::{load_peak_file, load_signal_table};
use data::model::PeakLabel;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let table = load_signal_table(&cli.csv)?;
    if table.is_empty() {
        log::warn!("{} contains no leads", cli.csv.display());
    }
    log::info!(
        "Loaded {} leads of {} samples from {}",
        table.len(),
        table.sample_count(),
        cli.csv.display()
    );

    let peak_file = load_peak_file(&cli.json)?;

    // Every failure above and here aborts before a window is opened.
    let window = build_window(
        &table,
        &peak_file,
        &cli.lead,
        cli.sample_limit(),
        cli.sampling_rate,
    )?;

    let counts: Vec<String> = PeakLabel::ALL
        .into_iter()
        .map(|label| format!("{label}={}", window.marker_count(label)))
        .collect();
    log::info!(
        "Showing {} samples of lead '{}' with markers {}",
        window.signal.len(),
        window.lead,
        counts.join(" ")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(window);

    // Blocks until the viewer window is closed.
    eframe::run_native(
        "ECG Peak Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(EcgViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the viewer window")
}
