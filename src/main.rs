use clap::Parser;
use eframe::egui;

use price_dashboard::app::PriceDashboardApp;
use price_dashboard::cli::Args;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Args::parse().into_config();
    log::debug!("starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Predictive Pricing – Actual vs Predicted",
        options,
        Box::new(move |_cc| Ok(Box::new(PriceDashboardApp::new(config)))),
    )
}
