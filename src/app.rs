use eframe::egui;

use crate::data::model::LaunchTable;
use crate::state::AppState;
use crate::ui::{panels, pie, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Native dashboard window. Layout mirrors the page order: title, site
/// dropdown, proportion chart, payload range selector, correlation chart.
pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(table: LaunchTable) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + dataset summary ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            panels::header_bar(ui, &self.state);
        });

        // ---- Central panel: controls and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(8.0);
                    panels::site_selector(ui, &mut self.state);
                    ui.add_space(12.0);
                    pie::pie_chart(ui, &self.state.pie);
                    ui.add_space(16.0);
                    panels::payload_slider(ui, &mut self.state);
                    ui.add_space(12.0);
                    plot::scatter_plot(ui, &self.state);
                    ui.add_space(8.0);
                });
        });
    }
}
