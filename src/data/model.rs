use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// PeakLabel – one of the five cardiac landmarks
// ---------------------------------------------------------------------------

/// Canonical waveform landmark of a cardiac cycle.
///
/// Declaration order is the display order, so `BTreeMap<PeakLabel, _>`
/// iterates P, Q, R, S, T.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeakLabel {
    P,
    Q,
    R,
    S,
    T,
}

impl PeakLabel {
    pub const ALL: [Self; 5] = [Self::P, Self::Q, Self::R, Self::S, Self::T];

    /// Key used for this label in the peak JSON.
    pub const fn key(self) -> &'static str {
        match self {
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.key() == key)
    }
}

impl fmt::Display for PeakLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// SignalTable – one row per lead
// ---------------------------------------------------------------------------

/// A single named channel of the recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub name: String,
    pub samples: Vec<f64>,
}

/// All leads of the signal file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalTable {
    pub leads: Vec<Lead>,
}

impl SignalTable {
    /// Samples of the first lead with the given name.
    pub fn lead(&self, name: &str) -> Option<&[f64]> {
        self.leads
            .iter()
            .find(|lead| lead.name == name)
            .map(|lead| lead.samples.as_slice())
    }

    pub fn lead_names(&self) -> Vec<String> {
        self.leads.iter().map(|lead| lead.name.clone()).collect()
    }

    /// Number of leads.
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Samples per lead (all rows share the same length).
    pub fn sample_count(&self) -> usize {
        self.leads.first().map_or(0, |lead| lead.samples.len())
    }
}

// ---------------------------------------------------------------------------
// PeakSet / RrIntervals – contents of the peak JSON
// ---------------------------------------------------------------------------

/// Landmark indices per label. A label that is absent has no peaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakSet {
    indices: BTreeMap<PeakLabel, Vec<usize>>,
}

impl PeakSet {
    pub fn insert(&mut self, label: PeakLabel, indices: Vec<usize>) {
        self.indices.insert(label, indices);
    }

    /// Indices for `label`; empty when the label was never supplied.
    pub fn get(&self, label: PeakLabel) -> &[usize] {
        self.indices
            .get(&label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl FromIterator<(PeakLabel, Vec<usize>)> for PeakSet {
    fn from_iter<I: IntoIterator<Item = (PeakLabel, Vec<usize>)>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

/// RR intervals as reported by the upstream detector, units as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RrIntervals {
    pub values: Vec<f64>,
}

impl RrIntervals {
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

/// Parsed peak file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakFile {
    pub peaks: PeakSet,
    pub intervals: RrIntervals,
}

// ---------------------------------------------------------------------------
// EcgWindow – the slice of the recording that gets plotted
// ---------------------------------------------------------------------------

/// A scatter series: landmark positions paired with the signal amplitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markers {
    pub indices: Vec<usize>,
    pub amplitudes: Vec<f64>,
}

impl Markers {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `[x, y]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.indices
            .iter()
            .zip(&self.amplitudes)
            .map(|(&i, &y)| [i as f64, y])
            .collect()
    }
}

/// Heart rhythm derived from consecutive R peaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmSummary {
    pub mean_rr_samples: f64,
    pub mean_rr_seconds: f64,
    pub heart_rate_bpm: f64,
}

/// Everything the viewer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct EcgWindow {
    pub lead: String,
    pub signal: Vec<f64>,
    pub markers: BTreeMap<PeakLabel, Markers>,
    pub reported_rr: RrIntervals,
    pub sampling_rate_hz: u32,
}

impl EcgWindow {
    pub fn markers(&self, label: PeakLabel) -> Option<&Markers> {
        self.markers.get(&label)
    }

    pub fn marker_count(&self, label: PeakLabel) -> usize {
        self.markers(label).map_or(0, Markers::len)
    }

    /// `[index, amplitude]` pairs of the signal trace.
    pub fn signal_points(&self) -> Vec<[f64; 2]> {
        self.signal
            .iter()
            .enumerate()
            .map(|(i, &y)| [i as f64, y])
            .collect()
    }

    /// Mean RR interval and heart rate from the windowed R peaks.
    /// `None` with fewer than two R peaks.
    pub fn rhythm(&self) -> Option<RhythmSummary> {
        let r = &self.markers(PeakLabel::R)?.indices;
        if r.len() < 2 || self.sampling_rate_hz == 0 {
            return None;
        }
        let span = r.windows(2).map(|w| w[1].abs_diff(w[0])).sum::<usize>();
        let mean_rr_samples = span as f64 / (r.len() - 1) as f64;
        if mean_rr_samples <= 0.0 {
            return None;
        }
        let mean_rr_seconds = mean_rr_samples / f64::from(self.sampling_rate_hz);
        Some(RhythmSummary {
            mean_rr_samples,
            mean_rr_seconds,
            heart_rate_bpm: 60.0 / mean_rr_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_with_r(r: Vec<usize>, rate: u32) -> EcgWindow {
        let amplitudes = vec![0.0; r.len()];
        EcgWindow {
            lead: "lead2".to_string(),
            signal: vec![0.0; 2000],
            markers: [(PeakLabel::R, Markers { indices: r, amplitudes })]
                .into_iter()
                .collect(),
            reported_rr: RrIntervals::default(),
            sampling_rate_hz: rate,
        }
    }

    #[test]
    fn label_keys_round_trip() {
        for label in PeakLabel::ALL {
            assert_eq!(PeakLabel::from_key(label.key()), Some(label));
        }
        assert_eq!(PeakLabel::from_key("U"), None);
        assert_eq!(PeakLabel::from_key("r"), None);
    }

    #[test]
    fn absent_label_has_no_peaks() {
        let peaks: PeakSet = [(PeakLabel::R, vec![1, 2])].into_iter().collect();
        assert_eq!(peaks.get(PeakLabel::R), &[1, 2]);
        assert!(peaks.get(PeakLabel::S).is_empty());
        assert!(peaks.get(PeakLabel::T).is_empty());
    }

    #[test]
    fn rhythm_from_regular_r_peaks() {
        // 400 samples apart at 500 Hz → 0.8 s → 75 bpm
        let window = window_with_r(vec![100, 500, 900, 1300], 500);
        let rhythm = window.rhythm().unwrap();
        assert!((rhythm.mean_rr_samples - 400.0).abs() < 1e-9);
        assert!((rhythm.mean_rr_seconds - 0.8).abs() < 1e-9);
        assert!((rhythm.heart_rate_bpm - 75.0).abs() < 1e-9);
    }

    #[test]
    fn rhythm_needs_two_r_peaks() {
        assert!(window_with_r(vec![100], 500).rhythm().is_none());
        assert!(window_with_r(vec![], 500).rhythm().is_none());
    }

    #[test]
    fn reported_rr_mean() {
        let rr = RrIntervals {
            values: vec![0.8, 0.9, 1.0],
        };
        assert!((rr.mean().unwrap() - 0.9).abs() < 1e-9);
        assert!(RrIntervals::default().mean().is_none());
    }
}
