use eframe::egui::Ui;
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{SIGNAL_COLOR, label_color};
use crate::data::model::PeakLabel;
use crate::state::AppState;

pub const TITLE: &str = "ECG with P, Q, R, S, T peak detection";

// ---------------------------------------------------------------------------
// ECG plot (central panel)
// ---------------------------------------------------------------------------

/// Render the signal trace with the landmark overlay.
pub fn ecg_plot(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(TITLE);
    });

    let mut plot = Plot::new("ecg_plot")
        .legend(Legend::default())
        .x_axis_label("Time (samples)")
        .y_axis_label("ECG amplitude")
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if state.take_reset() {
        plot = plot.reset();
    }

    let window = &state.window;
    let visible = &state.visible_labels;

    plot.show(ui, |plot_ui| {
        let trace: PlotPoints = window.signal_points().into();
        plot_ui.line(
            Line::new(trace)
                .name(format!("ECG ({})", window.lead))
                .color(SIGNAL_COLOR)
                .width(1.5),
        );

        // Markers are drawn after the trace so they sit on top of it.
        for label in PeakLabel::ALL {
            if !visible.contains(&label) {
                continue;
            }
            let Some(markers) = window.markers(label) else {
                continue;
            };
            let points: PlotPoints = markers.points().into();
            plot_ui.points(
                Points::new(points)
                    .name(label.to_string())
                    .color(label_color(label))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0),
            );
        }
    });
}
