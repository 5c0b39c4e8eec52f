use eframe::egui;

use crate::cli::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, summary, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PriceDashboardApp {
    pub state: AppState,
}

impl PriceDashboardApp {
    /// Build the app and open the configured dataset, if any.
    ///
    /// A dataset that fails to load leaves the dashboard empty with the error
    /// in the top bar.
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.data_path.clone();
        let mut state = AppState::new(config);
        if let Some(path) = path {
            // load_path already logged and recorded the failure for display.
            state.load_path(&path).ok();
        }
        Self { state }
    }
}

impl eframe::App for PriceDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, table, plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a scored dataset to start  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    summary::selected_product(ui, &self.state);
                    ui.separator();
                    summary::global_performance(ui, &self.state);
                    ui.separator();
                    table::top_errors(ui, &self.state);
                    ui.separator();
                    plot::price_scatter(ui, &self.state);
                });
        });
    }
}
