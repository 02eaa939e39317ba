use std::path::PathBuf;

use clap::Parser;

/// Display an ECG lead with its detected P, Q, R, S, T landmarks.
#[derive(Debug, Parser)]
#[command(name = "ecg-peak-viewer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the ECG signal CSV (one row per lead, first column is the lead name)
    #[arg(long)]
    pub csv: PathBuf,

    /// Path to the JSON file of detected peaks
    #[arg(long)]
    pub json: PathBuf,

    /// Name of the lead to display
    #[arg(long, default_value = "lead2")]
    pub lead: String,

    /// Number of samples to display
    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub samples: u64,

    /// Sampling rate in Hz, used for the heart-rate summary
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub sampling_rate: u32,
}

impl Cli {
    /// Sample limit as an index bound.
    pub fn sample_limit(&self) -> usize {
        usize::try_from(self.samples).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["ecg-peak-viewer", "--csv", "a.csv", "--json", "b.json"])
            .unwrap();
        assert_eq!(cli.csv, PathBuf::from("a.csv"));
        assert_eq!(cli.json, PathBuf::from("b.json"));
        assert_eq!(cli.lead, "lead2");
        assert_eq!(cli.sample_limit(), 5000);
        assert_eq!(cli.sampling_rate, 500);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cli = Cli::try_parse_from([
            "ecg-peak-viewer",
            "--csv",
            "a.csv",
            "--json",
            "b.json",
            "--lead",
            "lead1",
            "--samples",
            "8",
            "--sampling-rate",
            "250",
        ])
        .unwrap();
        assert_eq!(cli.lead, "lead1");
        assert_eq!(cli.sample_limit(), 8);
        assert_eq!(cli.sampling_rate, 250);
    }

    #[test]
    fn csv_and_json_are_required() {
        assert!(Cli::try_parse_from(["ecg-peak-viewer", "--csv", "a.csv"]).is_err());
        assert!(Cli::try_parse_from(["ecg-peak-viewer", "--json", "b.json"]).is_err());
    }

    #[test]
    fn samples_must_be_positive() {
        for bad in ["0", "-3", "many"] {
            let parsed = Cli::try_parse_from([
                "ecg-peak-viewer",
                "--csv",
                "a.csv",
                "--json",
                "b.json",
                "--samples",
                bad,
            ]);
            assert!(parsed.is_err(), "--samples {bad} should be rejected");
        }
    }
}
