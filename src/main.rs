use std::path::Path;

use eframe::egui;

use launchboard::app::DashboardApp;
use launchboard::data::loader;

fn main() -> eframe::Result {
    env_logger::init();

    // The dataset is the only input; without it there is nothing to show.
    let path = Path::new(loader::DEFAULT_DATASET);
    let table = match loader::load_file(path) {
        Ok(table) => table,
        Err(e) => {
            log::error!("failed to load {}: {e:#}", path.display());
            eprintln!("Error: failed to load {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} launch records from {} sites",
        table.len(),
        table.sites.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(table)))),
    )
}
