use eframe::egui::Color32;

use crate::data::model::PeakLabel;

// ---------------------------------------------------------------------------
// Fixed trace and landmark colours
// ---------------------------------------------------------------------------

/// Colour of the ECG trace.
pub const SIGNAL_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);
const PURPLE: Color32 = Color32::from_rgb(128, 0, 128);
const RED: Color32 = Color32::from_rgb(220, 20, 20);
const GREEN: Color32 = Color32::from_rgb(0, 160, 0);
const MAGENTA: Color32 = Color32::from_rgb(255, 0, 255);

/// Marker colour for a landmark label.
pub const fn label_color(label: PeakLabel) -> Color32 {
    match label {
        PeakLabel::P => ORANGE,
        PeakLabel::Q => PURPLE,
        PeakLabel::R => RED,
        PeakLabel::S => GREEN,
        PeakLabel::T => MAGENTA,
    }
}
