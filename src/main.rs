mod app;
mod chart;
mod color;
mod data;
mod fallback;
mod report;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::IrisExplorerApp;
use data::model::Measurement;
use data::{loader, stats};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // ---- Step 1: load ----
    let table = loader::load_bundled().context("loading bundled dataset")?;
    println!("✅ Dataset loaded successfully!\n");

    // ---- Step 2: inspect ----
    println!("🔹 First {} rows of dataset:", report::HEAD_ROWS);
    println!("{}\n", report::head(&table, report::HEAD_ROWS));

    println!("🔹 Dataset Info:");
    println!("{}\n", report::info(&table));

    println!("🔹 Missing Values:");
    println!("{}\n", report::missing_values(&table));

    let table = table.drop_nulls();

    // ---- Step 3: aggregate ----
    println!("🔹 Summary Statistics:");
    println!("{}\n", report::summary_statistics(&stats::describe(&table)?));

    let means = stats::grouped_mean(&table, Measurement::PetalLength)?;
    println!("🔹 Average Petal Length per Species:");
    println!("{}\n", report::grouped_means(&means));

    let (longest, _) = means.max_category();
    println!("🌸 Species with longest average petals: {longest}\n");

    // ---- Step 4: charts ----
    let charts = chart::build_all(&table, &means);
    if let Err(e) = show_charts(AppState::new(charts, table.len(), means)) {
        log::error!("Could not open chart window: {e}");
    }

    // ---- Step 5: optional user dataset ----
    let outcome = fallback::try_load(Path::new(fallback::FALLBACK_PATH));
    println!("{}", outcome.message());

    Ok(())
}

/// Open the chart window and block until it is closed.
fn show_charts(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Iris Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(IrisExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
