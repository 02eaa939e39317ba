use std::collections::BTreeMap;

use anyhow::Result;

use super::error::LoadError;
use super::model::{EcgWindow, Markers, PeakFile, PeakLabel, PeakSet, SignalTable};

// ---------------------------------------------------------------------------
// Window selection: first N samples, peaks that fall inside them
// ---------------------------------------------------------------------------

/// First `limit` samples of `samples` (all of them when shorter).
pub fn truncate(samples: &[f64], limit: usize) -> Vec<f64> {
    samples[..samples.len().min(limit)].to_vec()
}

/// Keep indices strictly below `limit`, preserving order.
pub fn filter_indices(indices: &[usize], limit: usize) -> Vec<usize> {
    indices.iter().copied().filter(|&i| i < limit).collect()
}

/// Apply [`filter_indices`] to every label. Absent labels stay empty.
pub fn filter_peaks(peaks: &PeakSet, limit: usize) -> PeakSet {
    PeakLabel::ALL
        .into_iter()
        .map(|label| (label, filter_indices(peaks.get(label), limit)))
        .collect()
}

/// Signal amplitude at each index.
///
/// Fails on the first index past the end of `signal`, which happens when the
/// peak file disagrees with the signal file.
pub fn gather(
    signal: &[f64],
    label: PeakLabel,
    indices: &[usize],
) -> Result<Markers, LoadError> {
    let amplitudes = indices
        .iter()
        .map(|&index| {
            signal
                .get(index)
                .copied()
                .ok_or(LoadError::PeakIndexOutOfRange {
                    label,
                    index,
                    len: signal.len(),
                })
        })
        .collect::<Result<Vec<f64>, LoadError>>()?;

    Ok(Markers {
        indices: indices.to_vec(),
        amplitudes,
    })
}

/// Build the plotted window for `lead` from the loaded files.
pub fn build_window(
    table: &SignalTable,
    peak_file: &PeakFile,
    lead: &str,
    limit: usize,
    sampling_rate_hz: u32,
) -> Result<EcgWindow> {
    let samples = table.lead(lead).ok_or_else(|| LoadError::LeadNotFound {
        lead: lead.to_string(),
        available: table.lead_names(),
    })?;

    let signal = truncate(samples, limit);
    let peaks = filter_peaks(&peak_file.peaks, limit);

    let markers = PeakLabel::ALL
        .into_iter()
        .map(|label| Ok((label, gather(&signal, label, peaks.get(label))?)))
        .collect::<Result<BTreeMap<PeakLabel, Markers>, LoadError>>()?;

    Ok(EcgWindow {
        lead: lead.to_string(),
        signal,
        markers,
        reported_rr: peak_file.intervals.clone(),
        sampling_rate_hz,
    })
}
