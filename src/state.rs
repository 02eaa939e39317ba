use std::collections::BTreeSet;

use crate::data::model::{EcgWindow, PeakLabel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The loaded window; fixed for the lifetime of the viewer.
    pub window: EcgWindow,

    /// Labels whose scatter series are drawn.
    pub visible_labels: BTreeSet<PeakLabel>,

    /// Set by "Reset view"; the plot consumes it on the next frame.
    pub reset_view: bool,
}

impl AppState {
    pub fn new(window: EcgWindow) -> Self {
        Self {
            window,
            visible_labels: PeakLabel::ALL.into_iter().collect(),
            reset_view: false,
        }
    }

    pub fn is_visible(&self, label: PeakLabel) -> bool {
        self.visible_labels.contains(&label)
    }

    /// Show or hide a label's markers.
    pub fn toggle_label(&mut self, label: PeakLabel) {
        if !self.visible_labels.remove(&label) {
            self.visible_labels.insert(label);
        }
    }

    pub fn show_all(&mut self) {
        self.visible_labels = PeakLabel::ALL.into_iter().collect();
    }

    pub fn hide_all(&mut self) {
        self.visible_labels.clear();
    }

    /// Markers currently drawn, over all visible labels.
    pub fn visible_marker_count(&self) -> usize {
        self.visible_labels
            .iter()
            .map(|&label| self.window.marker_count(label))
            .sum()
    }

    /// Returns the pending reset request and clears it.
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_view)
    }
}
