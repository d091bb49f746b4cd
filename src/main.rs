use std::path::Path;

use transit_dashboard::{
    config::DashboardConfig, errors::error_types::ErrorTypes, ui::app::DashboardApp,
};

const CONFIG_PATH: &str = "dashboard.json";

fn main() -> Result<(), ErrorTypes> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load(Path::new(CONFIG_PATH))?;
    log::info!("Starting SmartTransit with {:?}", config);

    eframe::run_native(
        "SmartTransit",
        eframe::NativeOptions::default(),
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc.egui_ctx.clone(), &config)))),
    )
    .map_err(|e| ErrorTypes::new(600, format!("Failed to start the UI: {}", e)))
}
