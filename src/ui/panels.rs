use eframe::egui::{self, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Header bar
// ---------------------------------------------------------------------------

/// Title and dataset summary shown in the top panel.
pub fn header_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("SpaceX Launch Records Dashboard");
        ui.label(format!(
            "{} launches across {} sites",
            state.table().len(),
            state.table().sites.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// Single-select launch-site dropdown. Selecting an entry updates the state,
/// which rebuilds both charts.
pub fn site_selector(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Launch Site:");

        let current_label = state.selected_site_label().to_string();
        let options = state.site_options.clone();
        egui::ComboBox::from_id_salt("site_dropdown")
            .selected_text(current_label)
            .width(260.0)
            .show_ui(ui, |ui: &mut Ui| {
                for opt in &options {
                    let selected = state.selected_site == opt.value;
                    if ui.selectable_label(selected, &opt.label).clicked() {
                        state.set_site(opt.value.clone());
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Payload range selector
// ---------------------------------------------------------------------------

/// Dual-handle payload range selector, stepping in 1000 kg increments.
/// Dragging a handle past its partner swaps the bounds in the state.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let (min, max) = state.table().payload_bounds();
    let mut low = state.payload_low;
    let mut high = state.payload_high;

    ui.label("Payload range (Kg):");
    ui.horizontal(|ui: &mut Ui| {
        ui.add(
            egui::Slider::new(&mut low, min..=max)
                .step_by(1000.0)
                .text("min"),
        );
        ui.add_space(16.0);
        ui.add(
            egui::Slider::new(&mut high, min..=max)
                .step_by(1000.0)
                .text("max"),
        );
    });

    state.set_payload_range(low, high);
}
