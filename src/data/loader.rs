use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Lead, PeakFile, PeakLabel, PeakSet, RrIntervals, SignalTable};

// ---------------------------------------------------------------------------
// Signal CSV loader
// ---------------------------------------------------------------------------

/// Load the signal table from a CSV file.
///
/// Layout: one header row (column labels, ignored), then one row per lead
/// with the lead name in the first column and samples in the rest:
///
/// ```text
/// lead,0,1,2,...
/// lead1,0.01,0.02,0.05,...
/// lead2,-0.10,-0.08,0.40,...
/// ```
pub fn load_signal_table(path: &Path) -> Result<SignalTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening signal CSV {}", path.display()))?;
    read_signal_table(file).with_context(|| format!("reading signal CSV {}", path.display()))
}

/// Parse a signal table from any reader. Rows of unequal length are rejected
/// by the CSV reader itself. Lead names are kept verbatim; only sample cells
/// are trimmed.
pub fn read_signal_table<R: Read>(source: R) -> Result<SignalTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let mut table = SignalTable::default();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut cells = record.iter();
        let Some(name) = cells.next() else {
            continue;
        };

        let samples = cells
            .enumerate()
            .map(|(j, cell)| parse_sample(cell, name, j))
            .collect::<Result<Vec<f64>>>()?;

        if table.lead(name).is_some() {
            log::warn!("Duplicate lead '{name}' at CSV row {row_no}; keeping the first one");
            continue;
        }

        table.leads.push(Lead {
            name: name.to_string(),
            samples,
        });
    }

    Ok(table)
}

fn parse_sample(cell: &str, lead: &str, j: usize) -> Result<f64> {
    let cell = cell.trim();
    // Empty cells are missing readings.
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .with_context(|| format!("lead '{lead}', sample {j}: '{cell}' is not a number"))
}

// ---------------------------------------------------------------------------
// Peak JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema, as written by the detector:
///
/// ```json
/// {
///   "peaks": { "P": [...], "Q": [...], "R": [120, 480], "S": [...], "T": [...] },
///   "intervals": { "RR": [0.72, 0.75] }
/// }
/// ```
///
/// `peaks` is required; each label inside it is optional. `intervals` is
/// informational only, so it is kept untyped and never fails the load.
#[derive(Debug, Deserialize)]
struct RawPeakFile {
    peaks: BTreeMap<String, Vec<usize>>,
    #[serde(default)]
    intervals: Option<JsonValue>,
}

/// Load the peak file from disk.
pub fn load_peak_file(path: &Path) -> Result<PeakFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading peak JSON {}", path.display()))?;
    parse_peak_file(&text).with_context(|| format!("parsing peak JSON {}", path.display()))
}

/// Parse the peak JSON text.
pub fn parse_peak_file(text: &str) -> Result<PeakFile> {
    let raw: RawPeakFile = serde_json::from_str(text).context("parsing JSON")?;

    let mut peaks = PeakSet::default();
    for (key, indices) in raw.peaks {
        match PeakLabel::from_key(&key) {
            Some(label) => peaks.insert(label, indices),
            None => log::debug!("Ignoring unknown peak label '{key}'"),
        }
    }

    let intervals = raw
        .intervals
        .as_ref()
        .map(reported_intervals)
        .unwrap_or_default();

    Ok(PeakFile { peaks, intervals })
}

/// Read `intervals.RR`. Any other shape is logged and dropped.
fn reported_intervals(block: &JsonValue) -> RrIntervals {
    let values = block
        .get("RR")
        .and_then(JsonValue::as_array)
        .and_then(|arr| arr.iter().map(JsonValue::as_f64).collect::<Option<Vec<f64>>>());

    match values {
        Some(values) => RrIntervals { values },
        None => {
            log::warn!("Ignoring malformed 'intervals' block: {block}");
            RrIntervals::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LEADS: &str = "\
lead,0,1,2,3,4,5,6,7,8,9
lead1,0.0,0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.8,0.9
lead2,1.0,1.1,1.2,1.3,1.4,1.5,1.6,1.7,1.8,1.9
";

    #[test]
    fn csv_rows_become_leads() -> Result<()> {
        let table = read_signal_table(TWO_LEADS.as_bytes())?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.lead_names(), vec!["lead1", "lead2"]);
        assert_eq!(table.sample_count(), 10);
        assert_eq!(table.lead("lead2").map(|s| s[3]), Some(1.3));
        assert!(table.lead("lead3").is_none());
        Ok(())
    }

    #[test]
    fn csv_empty_cell_is_nan() -> Result<()> {
        let table = read_signal_table("h,0,1,2\nlead1,1.0,,3.0\n".as_bytes())?;
        let samples = table.lead("lead1").unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples[1].is_nan());
        Ok(())
    }

    #[test]
    fn csv_keeps_lead_names_verbatim_and_trims_samples() -> Result<()> {
        let table = read_signal_table("h,0,1\n lead2, 1.5 ,2.5\n".as_bytes())?;
        assert_eq!(table.lead(" lead2"), Some(&[1.5, 2.5][..]));
        assert!(table.lead("lead2").is_none());
        Ok(())
    }

    #[test]
    fn csv_rejects_ragged_rows() {
        let ragged = "h,0,1,2\nlead1,1,2,3\nlead2,1,2\n";
        assert!(read_signal_table(ragged.as_bytes()).is_err());
    }

    #[test]
    fn csv_rejects_non_numeric_sample() {
        let err = read_signal_table("h,0,1\nlead1,1.0,abc\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("abc"));
    }

    #[test]
    fn csv_duplicate_lead_keeps_first() -> Result<()> {
        let table = read_signal_table("h,0\nlead1,1.0\nlead1,2.0\n".as_bytes())?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.lead("lead1"), Some(&[1.0][..]));
        Ok(())
    }

    #[test]
    fn missing_csv_file_is_an_error() {
        let err = load_signal_table(Path::new("/nonexistent/ecg.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/ecg.csv"));
    }

    #[test]
    fn peak_json_with_all_labels_and_intervals() -> Result<()> {
        let file = parse_peak_file(
            r#"{
                "peaks": {"P": [1], "Q": [2], "R": [3, 9], "S": [4], "T": [5]},
                "intervals": {"RR": [0.8, 1.0]}
            }"#,
        )?;
        assert_eq!(file.peaks.get(PeakLabel::R), &[3, 9]);
        assert_eq!(file.peaks.get(PeakLabel::T), &[5]);
        assert_eq!(file.intervals.values, vec![0.8, 1.0]);
        Ok(())
    }

    #[test]
    fn peak_json_missing_label_is_empty() -> Result<()> {
        let file = parse_peak_file(r#"{"peaks": {"R": [2, 5, 12]}}"#)?;
        assert_eq!(file.peaks.get(PeakLabel::R), &[2, 5, 12]);
        assert!(file.peaks.get(PeakLabel::S).is_empty());
        assert!(file.intervals.values.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_intervals_still_yield_peaks() -> Result<()> {
        for intervals in [
            "[0.8, 0.9]",
            r#"{"RR": [0.8, null]}"#,
            r#"{"RR": "n/a"}"#,
            r#"{"rr": [0.8]}"#,
            "null",
        ] {
            let text = format!(r#"{{"peaks": {{"R": [2, 5]}}, "intervals": {intervals}}}"#);
            let file = parse_peak_file(&text)?;
            assert_eq!(file.peaks.get(PeakLabel::R), &[2, 5], "intervals = {intervals}");
            assert!(file.intervals.values.is_empty(), "intervals = {intervals}");
        }
        Ok(())
    }

    #[test]
    fn peak_json_ignores_unknown_labels() -> Result<()> {
        let file = parse_peak_file(r#"{"peaks": {"U": [1], "R": [2]}}"#)?;
        assert_eq!(file.peaks.get(PeakLabel::R), &[2]);
        Ok(())
    }

    #[test]
    fn peak_json_without_peaks_key_fails() {
        let err = parse_peak_file(r#"{"intervals": {"RR": []}}"#).unwrap_err();
        assert!(format!("{err:#}").contains("peaks"));
    }

    #[test]
    fn malformed_peak_json_fails() {
        assert!(parse_peak_file("{\"peaks\": {\"R\": [1, 2").is_err());
        assert!(parse_peak_file(r#"{"peaks": {"R": [-1]}}"#).is_err());
    }
}
