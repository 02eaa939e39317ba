use eframe::egui::{self, RichText, Ui};

use crate::color::label_color;
use crate::data::model::{Markers, PeakLabel};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – recording summary and landmark toggles
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Recording");
    ui.separator();

    egui::Grid::new("recording_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Lead");
            ui.strong(&state.window.lead);
            ui.end_row();

            ui.label("Samples");
            ui.label(state.window.signal.len().to_string());
            ui.end_row();

            ui.label("Sampling rate");
            ui.label(format!("{} Hz", state.window.sampling_rate_hz));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Landmarks");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.show_all();
        }
        if ui.small_button("None").clicked() {
            state.hide_all();
        }
    });

    for label in PeakLabel::ALL {
        let count = state.window.marker_count(label);
        let mut text = RichText::new(format!("{label}  ({count})")).color(label_color(label));
        if state.window.markers(label).is_none_or(Markers::is_empty) {
            text = text.weak();
        }
        let mut checked = state.is_visible(label);
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_label(label);
        }
    }

    ui.add_space(8.0);
    ui.heading("Rhythm");
    ui.separator();

    match state.window.rhythm() {
        Some(rhythm) => {
            ui.label(format!(
                "Mean RR: {:.1} samples ({:.3} s)",
                rhythm.mean_rr_samples, rhythm.mean_rr_seconds
            ));
            ui.label(format!("Heart rate: {:.1} bpm", rhythm.heart_rate_bpm));
        }
        None => {
            ui.label("Fewer than two R peaks in view.");
        }
    }

    if let Some(mean) = state.window.reported_rr.mean() {
        ui.label(format!(
            "Reported RR: {} intervals, mean {mean:.2}",
            state.window.reported_rr.values.len()
        ));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "ECG ({}) – {} samples, {} markers visible",
            state.window.lead,
            state.window.signal.len(),
            state.visible_marker_count()
        ));

        ui.separator();

        if ui.button("Reset view").clicked() {
            state.reset_view = true;
        }
    });
}
